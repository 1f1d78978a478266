//! Schedule feed DTOs.
//!
//! These types map directly to the published JSON. The feed has shipped with
//! Spanish key names (`lunesAViernes`, `nombre`, `referencia`, ...) as well as
//! English ones, so both are accepted. Every field is optional: a missing
//! bucket is an empty bucket and a missing field is an empty value.
//!
//! Parsing is lenient below the top level. A field of the wrong JSON type is
//! treated as missing, and a record that is not an object becomes an empty
//! record, so one bad entry never discards the rest of the timetable.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

/// The whole feed: one array of departures per day bucket.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScheduleDto {
    /// Monday to Friday.
    #[serde(default, alias = "lunesAViernes", deserialize_with = "lenient_bucket")]
    pub weekday: Vec<DepartureDto>,

    #[serde(default, alias = "sabados", deserialize_with = "lenient_bucket")]
    pub saturday: Vec<DepartureDto>,

    #[serde(default, alias = "domingos", deserialize_with = "lenient_bucket")]
    pub sunday: Vec<DepartureDto>,
}

/// One departure as published.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DepartureDto {
    /// "HH:MM" departure time.
    #[serde(default, alias = "nombre", deserialize_with = "lenient_string")]
    pub name: Option<String>,

    /// Direction reference, e.g. "Ida Centro - Norte".
    #[serde(
        default,
        rename = "directionRef",
        alias = "referencia",
        deserialize_with = "lenient_string"
    )]
    pub direction_ref: Option<String>,

    /// Stops walked by the trip, in order. Non-string entries are dropped.
    #[serde(default, alias = "recorrido", deserialize_with = "lenient_stops")]
    pub stops: Option<Vec<String>>,
}

fn lenient_bucket<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<DepartureDto>, D::Error> {
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        debug!("day bucket is not an array, treating as empty");
        return Ok(Vec::new());
    };

    Ok(items
        .into_iter()
        .map(|item| {
            serde_json::from_value(item).unwrap_or_else(|e| {
                debug!(error = %e, "malformed departure record");
                DepartureDto::default()
            })
        })
        .collect())
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn lenient_stops<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Vec<String>>, D::Error> {
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        return Ok(None);
    };

    Ok(Some(
        items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_english_keys() {
        let json = r#"{
            "weekday": [
                {"name": "08:00", "directionRef": "Ida Centro", "stops": ["Centro", "Norte"]}
            ],
            "saturday": [],
            "sunday": []
        }"#;

        let dto: ScheduleDto = serde_json::from_str(json).unwrap();
        assert_eq!(dto.weekday.len(), 1);
        assert_eq!(dto.weekday[0].name.as_deref(), Some("08:00"));
        assert_eq!(dto.weekday[0].direction_ref.as_deref(), Some("Ida Centro"));
        assert_eq!(
            dto.weekday[0].stops.as_deref(),
            Some(&["Centro".to_string(), "Norte".to_string()][..])
        );
    }

    #[test]
    fn parse_feed_keys() {
        let json = r#"{
            "lunesAViernes": [
                {"nombre": "06:15", "referencia": "Vuelta Centro", "recorrido": ["Norte", "Centro"]}
            ],
            "sabados": [
                {"nombre": "07:00", "referencia": "Ida Centro", "recorrido": ["Centro"]}
            ],
            "domingos": []
        }"#;

        let dto: ScheduleDto = serde_json::from_str(json).unwrap();
        assert_eq!(dto.weekday.len(), 1);
        assert_eq!(dto.weekday[0].name.as_deref(), Some("06:15"));
        assert_eq!(
            dto.weekday[0].direction_ref.as_deref(),
            Some("Vuelta Centro")
        );
        assert_eq!(dto.saturday.len(), 1);
        assert!(dto.sunday.is_empty());
    }

    #[test]
    fn missing_buckets_and_fields_default() {
        let json = r#"{"weekday": [{}, {"name": null, "directionRef": null, "stops": null}]}"#;

        let dto: ScheduleDto = serde_json::from_str(json).unwrap();
        assert_eq!(dto.weekday.len(), 2);
        assert!(dto.weekday[0].name.is_none());
        assert!(dto.weekday[1].direction_ref.is_none());
        assert!(dto.weekday[1].stops.is_none());
        assert!(dto.saturday.is_empty());
        assert!(dto.sunday.is_empty());
    }

    #[test]
    fn wrong_field_types_are_missing() {
        let json = r#"{"lunesAViernes": [
            {"nombre": "08:00", "referencia": "Ida Centro", "recorrido": ["Centro"]},
            {"nombre": 830, "referencia": ["Ida"], "recorrido": "Centro"},
            {"nombre": "09:00", "referencia": "Ida Centro", "recorrido": ["Centro", 7, null, "Norte"]}
        ]}"#;

        let dto: ScheduleDto = serde_json::from_str(json).unwrap();
        assert_eq!(dto.weekday.len(), 3);
        assert_eq!(dto.weekday[0].name.as_deref(), Some("08:00"));
        assert!(dto.weekday[1].name.is_none());
        assert!(dto.weekday[1].direction_ref.is_none());
        assert!(dto.weekday[1].stops.is_none());
        assert_eq!(
            dto.weekday[2].stops.as_deref(),
            Some(&["Centro".to_string(), "Norte".to_string()][..])
        );
    }

    #[test]
    fn non_object_records_become_empty() {
        let json = r#"{"weekday": [42, "08:00", {"name": "08:30"}], "saturday": {"name": "x"}}"#;

        let dto: ScheduleDto = serde_json::from_str(json).unwrap();
        assert_eq!(dto.weekday.len(), 3);
        assert!(dto.weekday[0].name.is_none());
        assert!(dto.weekday[1].name.is_none());
        assert_eq!(dto.weekday[2].name.as_deref(), Some("08:30"));
        assert!(dto.saturday.is_empty());
    }

    #[test]
    fn unknown_fields_ignored() {
        let json = r#"{"weekday": [{"name": "08:00", "linea": 5}], "version": 2}"#;
        let dto: ScheduleDto = serde_json::from_str(json).unwrap();
        assert_eq!(dto.weekday.len(), 1);
    }
}
