//! Records of the launch and early orbit phase services.

use chrono::{DateTime, Utc};
use serde_derive::{Deserialize, Serialize};

/// Configuration of a LEOP cluster.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct LeopCfg {
    pub identifier: String,
    pub date: DateTime<Utc>,
}

/// Ground station assignment of a LEOP cluster, split into the stations
/// still available and the ones currently in use.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct LeopGroundStations {
    #[serde(rename = "leop_gs_available")]
    pub available: Vec<String>,
    #[serde(rename = "leop_gs_inuse")]
    pub in_use: Vec<String>,
}

/// Operational message reported by a ground station during launch
/// operations.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Message {
    pub gs_identifier: String,
    pub timestamp: DateTime<Utc>,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_assignment() {
        let assignment: LeopGroundStations = serde_json::from_str(
            r#"{
                "leop_gs_available": ["gs-vigo", "gs-berlin"],
                "leop_gs_inuse": ["gs-kiruna"]
            }"#,
        )
        .unwrap();

        assert_eq!(assignment.available.len(), 2);
        assert_eq!(assignment.in_use, vec!["gs-kiruna"]);
    }

    #[test]
    fn decodes_message() {
        let message: Message = serde_json::from_str(
            r#"{
                "gs_identifier": "gs-kiruna",
                "timestamp": "2016-03-21T11:17:03Z",
                "message": "AOS, signal locked"
            }"#,
        )
        .unwrap();

        assert_eq!(message.gs_identifier, "gs-kiruna");
        assert_eq!(message.message, "AOS, signal locked");
    }
}
