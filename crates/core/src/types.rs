/// Cat identifiers are UUID v7, generated by the store on insert.
pub type CatId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
