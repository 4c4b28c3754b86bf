/// Identifiers of upstream domain records (plans, observations) are 64-bit.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Order-preserving JSON object, used wherever callers send free-form maps.
pub type JsonMap = indexmap::IndexMap<String, serde_json::Value>;
