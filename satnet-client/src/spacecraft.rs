use chrono::{DateTime, Utc};
use serde_derive::{Deserialize, Serialize};

/// Spacecraft configuration record as the server sends it.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct SpacecraftCfg {
    #[serde(rename = "spacecraft_id")]
    pub identifier: String,
    #[serde(rename = "spacecraft_callsign")]
    pub callsign: String,
    #[serde(rename = "spacecraft_tle_id")]
    pub tle_id: String,
}

/// One sample of a propagated ground track.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct GroundTrackPoint {
    pub timestamp: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_wire_record() {
        let cfg: SpacecraftCfg = serde_json::from_str(
            r#"{
                "spacecraft_id": "sc-serpens",
                "spacecraft_callsign": "SERPENS",
                "spacecraft_tle_id": "40897"
            }"#,
        )
        .unwrap();

        assert_eq!(cfg.identifier, "sc-serpens");
        assert_eq!(cfg.tle_id, "40897");
    }

    #[test]
    fn decodes_track_sample() {
        let point: GroundTrackPoint = serde_json::from_str(
            r#"{
                "timestamp": "2016-03-21T11:17:00Z",
                "latitude": -12.1,
                "longitude": 44.9
            }"#,
        )
        .unwrap();

        assert_eq!(point.latitude, -12.1);
        assert_eq!(point.timestamp.to_rfc3339(), "2016-03-21T11:17:00+00:00");
    }
}
