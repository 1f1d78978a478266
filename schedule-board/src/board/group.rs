//! Grouping of a day's departures into routes and their direction variants.

use crate::domain::{BaseRoute, DepartureRecord, DirectionRef};

/// The direction variants seen for one base route, in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteGroup {
    pub base: BaseRoute,
    pub variants: Vec<DirectionRef>,
}

/// Base routes of a day bucket, each with its direction variants.
///
/// Both the routes and the variants within a route keep the order in which
/// they first appear in the bucket, so regrouping the same bucket always
/// yields the same structure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteGroups {
    groups: Vec<RouteGroup>,
}

impl RouteGroups {
    /// Look up the variants of a base route.
    pub fn get(&self, base: &BaseRoute) -> Option<&[DirectionRef]> {
        self.groups
            .iter()
            .find(|g| &g.base == base)
            .map(|g| g.variants.as_slice())
    }

    /// Whether a direction variant appears in any group.
    pub fn contains(&self, direction: &DirectionRef) -> bool {
        self.get(direction.base())
            .is_some_and(|variants| variants.contains(direction))
    }

    pub fn iter(&self) -> impl Iterator<Item = &RouteGroup> {
        self.groups.iter()
    }

    /// Base routes in first-seen order.
    pub fn bases(&self) -> impl Iterator<Item = &BaseRoute> {
        self.groups.iter().map(|g| &g.base)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl<'a> IntoIterator for &'a RouteGroups {
    type Item = &'a RouteGroup;
    type IntoIter = std::slice::Iter<'a, RouteGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

/// Group a day bucket's departures by base route.
///
/// Records without a direction reference are skipped. A direction reference
/// seen more than once is recorded once.
///
/// # Examples
///
/// ```
/// use schedule_board::board::group_routes;
/// use schedule_board::domain::DepartureRecord;
///
/// let records = vec![
///     DepartureRecord::new("08:00", "Ida Centro", vec!["Centro".into()]),
///     DepartureRecord::new("08:10", "", vec!["Centro".into()]),
///     DepartureRecord::new("08:20", "Vuelta Centro", vec!["Centro".into()]),
/// ];
///
/// let groups = group_routes(&records);
/// assert_eq!(groups.len(), 1);
/// let group = groups.iter().next().unwrap();
/// assert_eq!(group.base.as_str(), "centro");
/// assert_eq!(group.variants.len(), 2);
/// ```
pub fn group_routes(records: &[DepartureRecord]) -> RouteGroups {
    let mut groups: Vec<RouteGroup> = Vec::new();

    for direction in records.iter().filter_map(|r| r.direction_ref.as_ref()) {
        match groups.iter_mut().find(|g| &g.base == direction.base()) {
            Some(group) => {
                if !group.variants.contains(direction) {
                    group.variants.push(direction.clone());
                }
            }
            None => groups.push(RouteGroup {
                base: direction.base().clone(),
                variants: vec![direction.clone()],
            }),
        }
    }

    RouteGroups { groups }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Direction;

    fn record(label: &str, direction: &str) -> DepartureRecord {
        DepartureRecord::new(label, direction, vec!["Centro".to_string()])
    }

    fn variant_names(groups: &RouteGroups, base: &str) -> Vec<String> {
        groups
            .get(&BaseRoute::normalize(base))
            .unwrap()
            .iter()
            .map(|d| d.as_str().to_string())
            .collect()
    }

    #[test]
    fn empty_input_yields_empty_groups() {
        let groups = group_routes(&[]);
        assert!(groups.is_empty());
        assert_eq!(groups.len(), 0);
    }

    #[test]
    fn skips_missing_direction() {
        let records = vec![
            record("08:00", "Ida Centro"),
            record("08:10", ""),
            record("08:20", "Vuelta Centro"),
        ];

        let groups = group_routes(&records);
        assert_eq!(groups.len(), 1);
        assert_eq!(
            variant_names(&groups, "centro"),
            vec!["Ida Centro", "Vuelta Centro"]
        );
    }

    #[test]
    fn first_seen_order() {
        let records = vec![
            record("08:00", "Vuelta Sur"),
            record("08:05", "Ida Centro - Norte"),
            record("08:10", "Ida Sur"),
            record("08:15", "Vuelta Centro-Norte"),
        ];

        let groups = group_routes(&records);
        let bases: Vec<&str> = groups.bases().map(|b| b.as_str()).collect();
        assert_eq!(bases, vec!["sur", "centro norte"]);

        assert_eq!(variant_names(&groups, "sur"), vec!["Vuelta Sur", "Ida Sur"]);
        assert_eq!(
            variant_names(&groups, "centro norte"),
            vec!["Ida Centro - Norte", "Vuelta Centro-Norte"]
        );
    }

    #[test]
    fn duplicates_recorded_once() {
        let records = vec![
            record("08:00", "Ida Centro"),
            record("09:00", "Ida Centro"),
            record("10:00", "Ida Centro"),
        ];

        let groups = group_routes(&records);
        assert_eq!(variant_names(&groups, "centro"), vec!["Ida Centro"]);
    }

    #[test]
    fn spelling_variants_share_a_base() {
        // Different raw references normalizing to the same base are distinct
        // variants of one route.
        let records = vec![
            record("08:00", "Ida Centro - Norte"),
            record("08:10", "Ida Centro Norte"),
        ];

        let groups = group_routes(&records);
        assert_eq!(groups.len(), 1);
        assert_eq!(variant_names(&groups, "centro norte").len(), 2);
    }

    #[test]
    fn regrouping_is_idempotent() {
        let records = vec![
            record("08:00", "Ida Centro"),
            record("08:10", "Vuelta Sur"),
            record("08:20", "Vuelta Centro"),
        ];

        assert_eq!(group_routes(&records), group_routes(&records));
    }

    #[test]
    fn contains_variant() {
        let records = vec![record("08:00", "Ida Centro")];
        let groups = group_routes(&records);

        let ida = DirectionRef::parse("Ida Centro").unwrap();
        let vuelta = DirectionRef::parse("Vuelta Centro").unwrap();
        assert!(groups.contains(&ida));
        assert!(!groups.contains(&vuelta));
        assert_eq!(ida.direction(), Direction::Outbound);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn reference() -> impl Strategy<Value = String> {
        (
            prop::sample::select(vec!["Ida", "Vuelta", ""]),
            prop::sample::select(vec!["Centro", "Centro - Norte", "SUR", "Barrio  Sur"]),
        )
            .prop_map(|(dir, base)| format!("{} {}", dir, base).trim().to_string())
    }

    proptest! {
        /// Grouping twice gives the same keys in the same order
        #[test]
        fn idempotent(refs in prop::collection::vec(reference(), 0..20)) {
            let records: Vec<DepartureRecord> = refs
                .iter()
                .map(|r| DepartureRecord::new("08:00", r, vec![]))
                .collect();
            prop_assert_eq!(group_routes(&records), group_routes(&records));
        }

        /// No inner sequence holds the same reference twice
        #[test]
        fn variants_unique(refs in prop::collection::vec(reference(), 0..20)) {
            let records: Vec<DepartureRecord> = refs
                .iter()
                .map(|r| DepartureRecord::new("08:00", r, vec![]))
                .collect();
            let groups = group_routes(&records);

            for group in &groups {
                for (i, a) in group.variants.iter().enumerate() {
                    for b in &group.variants[i + 1..] {
                        prop_assert_ne!(a.as_str(), b.as_str());
                    }
                }
            }
        }

        /// Every record with a reference is reachable through its group
        #[test]
        fn every_reference_grouped(refs in prop::collection::vec(reference(), 0..20)) {
            let records: Vec<DepartureRecord> = refs
                .iter()
                .map(|r| DepartureRecord::new("08:00", r, vec![]))
                .collect();
            let groups = group_routes(&records);

            for direction in records.iter().filter_map(|r| r.direction_ref.as_ref()) {
                prop_assert!(groups.contains(direction));
            }
        }
    }
}
