use satnet_client::GroundStationCfg;

use crate::marker::Marker;

pub struct GroundStation {
    pub cfg: GroundStationCfg,
    pub marker: Marker,
}

impl GroundStation {
    pub fn new(cfg: GroundStationCfg) -> Self {
        let marker = Marker {
            lat: cfg.lat(),
            lng: cfg.lng(),
            label: cfg.callsign.clone(),
        };

        GroundStation { cfg, marker }
    }

    pub fn identifier(&self) -> &str {
        &self.cfg.identifier
    }

    /// Replaces the configuration and moves the marker along with it.
    pub fn apply(&mut self, cfg: GroundStationCfg) {
        self.marker = Marker {
            lat: cfg.lat(),
            lng: cfg.lng(),
            label: cfg.callsign.clone(),
        };
        self.cfg = cfg;
    }
}
