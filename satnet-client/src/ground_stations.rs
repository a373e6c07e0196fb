use serde_derive::{Deserialize, Serialize};

/// Ground station configuration record as the server sends it.
///
/// The wire format keeps latitude and longitude as a two element array in
/// that order; `lat()` and `lng()` give named access.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct GroundStationCfg {
    #[serde(rename = "groundstation_id")]
    pub identifier: String,
    #[serde(rename = "groundstation_callsign")]
    pub callsign: String,
    #[serde(rename = "groundstation_elevation")]
    pub elevation: f64,
    #[serde(rename = "groundstation_latlon")]
    pub latlon: [f64; 2],
}

impl GroundStationCfg {
    pub fn lat(&self) -> f64 {
        self.latlon[0]
    }

    pub fn lng(&self) -> f64 {
        self.latlon[1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_wire_record() {
        let cfg: GroundStationCfg = serde_json::from_str(
            r#"{
                "groundstation_id": "gs-vigo",
                "groundstation_callsign": "EA1RCT",
                "groundstation_elevation": 12.5,
                "groundstation_latlon": [42.17, -8.68]
            }"#,
        )
        .unwrap();

        assert_eq!(cfg.identifier, "gs-vigo");
        assert_eq!(cfg.callsign, "EA1RCT");
        assert_eq!(cfg.lat(), 42.17);
        assert_eq!(cfg.lng(), -8.68);
    }

    #[test]
    fn encodes_with_wire_keys() {
        let cfg = GroundStationCfg {
            identifier: "gs-vigo".to_string(),
            callsign: "EA1RCT".to_string(),
            elevation: 12.5,
            latlon: [42.17, -8.68],
        };

        let json = serde_json::to_value(&cfg).unwrap();
        assert_eq!(json["groundstation_id"], "gs-vigo");
        assert_eq!(json["groundstation_latlon"][1], -8.68);
    }
}
