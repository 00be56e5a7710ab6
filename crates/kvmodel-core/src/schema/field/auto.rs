use crate::Value;

use std::time::{SystemTime, UNIX_EPOCH};

/// How a field is populated without caller input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoStrategy {
    /// A random v4 UUID, assigned at create when the field is blank
    Uuid,

    /// Unix seconds, set at create
    CreatedAt,

    /// Unix seconds, set on every save
    UpdatedAt,
}

impl AutoStrategy {
    pub fn is_timestamp(self) -> bool {
        matches!(self, Self::CreatedAt | Self::UpdatedAt)
    }

    /// Current unix time in seconds, as stored by the timestamp strategies.
    pub fn now() -> Value {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Value::I64(i64::try_from(secs).unwrap_or(i64::MAX))
    }
}
