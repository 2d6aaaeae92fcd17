/// Widget configuration primary keys are UUIDs.
pub type WidgetId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
