//! File-backed schedule source.
//!
//! Reads the same JSON document the feed publishes from local disk. Useful
//! for development and offline use.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::domain::Schedule;

use super::convert::convert_schedule;
use super::error::FeedError;
use super::source::ScheduleSource;
use super::types::ScheduleDto;

/// Schedule source that reads a JSON file on every fetch.
#[derive(Debug, Clone)]
pub struct FileScheduleSource {
    path: PathBuf,
    name: String,
}

impl FileScheduleSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path.display().to_string();
        Self { path, name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScheduleSource for FileScheduleSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self) -> Result<Arc<Schedule>, FeedError> {
        let json = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| FeedError::Io {
                path: self.name.clone(),
                message: e.to_string(),
            })?;

        let dto: ScheduleDto = serde_json::from_str(&json).map_err(|e| FeedError::json(e, &json))?;

        Ok(Arc::new(convert_schedule(dto)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DayBucket;
    use tempfile::tempdir;

    #[tokio::test]
    async fn load_sample_data() {
        let source = FileScheduleSource::new("data/sample_schedule.json");
        let schedule = source.fetch().await.unwrap();

        assert!(!schedule.bucket(DayBucket::Weekday).is_empty());
        assert!(!schedule.bucket(DayBucket::Saturday).is_empty());
        assert!(!schedule.bucket(DayBucket::Sunday).is_empty());
    }

    #[tokio::test]
    async fn reads_written_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("horarios.json");
        std::fs::write(
            &path,
            r#"{"sabados": [{"nombre": "07:00", "referencia": "Ida Centro", "recorrido": ["Centro"]}]}"#,
        )
        .unwrap();

        let source = FileScheduleSource::new(&path);
        let schedule = source.fetch().await.unwrap();

        assert!(schedule.bucket(DayBucket::Weekday).is_empty());
        assert_eq!(schedule.bucket(DayBucket::Saturday)[0].label, "07:00");
    }

    #[tokio::test]
    async fn malformed_record_keeps_the_rest() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("horarios.json");
        std::fs::write(
            &path,
            r#"{"lunesAViernes": [
                {"nombre": "08:00", "referencia": "Ida Centro", "recorrido": ["Centro"]},
                {"nombre": 830, "referencia": "Ida Centro", "recorrido": "Centro"}
            ]}"#,
        )
        .unwrap();

        let schedule = FileScheduleSource::new(&path).fetch().await.unwrap();

        let weekday = schedule.bucket(DayBucket::Weekday);
        assert_eq!(weekday.len(), 2);
        assert_eq!(weekday[0].label, "08:00");
        assert_eq!(weekday[0].minutes(), 480);
        assert_eq!(weekday[1].minutes(), 0);
        assert!(weekday[1].direction_ref.is_some());
        assert!(weekday[1].stops.is_empty());
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let source = FileScheduleSource::new("/nonexistent/horarios.json");
        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, FeedError::Io { .. }));
    }

    #[tokio::test]
    async fn invalid_json_is_json_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("horarios.json");
        std::fs::write(&path, "<html>not json</html>").unwrap();

        let err = FileScheduleSource::new(&path).fetch().await.unwrap_err();
        assert!(matches!(err, FeedError::Json { .. }));
    }
}
