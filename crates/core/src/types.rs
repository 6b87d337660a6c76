/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Ordered label → count mapping, kept in API response order.
pub type CountMap = indexmap::IndexMap<String, u64>;
