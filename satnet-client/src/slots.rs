use chrono::{DateTime, Utc};
use serde_derive::{Deserialize, Serialize};

/// Scheduled communication window between one ground station and one
/// spacecraft.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct PassSlot {
    pub identifier: i64,
    pub gs_identifier: String,
    pub sc_identifier: String,
    pub slot_start: DateTime<Utc>,
    pub slot_end: DateTime<Utc>,
}
