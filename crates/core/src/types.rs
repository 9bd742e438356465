/// All catalog primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Identity ids (auth users, profiles, order owners) are UUIDs.
pub type UserId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
