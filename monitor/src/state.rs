use std::collections::{BTreeMap, BTreeSet};

use anyhow::{bail, Result};
use satnet_client::{GroundStationCfg, GroundTrackPoint, LeopGroundStations, PassSlot, SpacecraftCfg};

use crate::bus::BusEvent;
use crate::ground_station::GroundStation;
use crate::spacecraft::Spacecraft;

/// Registry of everything the monitor currently knows about the network.
///
/// Entities are tracked at most once; trying to track an identifier twice or
/// to update one that is not tracked is an error, not a silent overwrite.
pub struct State {
    pub ground_stations: BTreeMap<String, GroundStation>,
    pub spacecraft: BTreeMap<String, Spacecraft>,
    pub passes: Vec<PassSlot>,
    pub leop_gs: Option<LeopGroundStations>,
}

impl State {
    pub fn new() -> Self {
        State {
            ground_stations: BTreeMap::new(),
            spacecraft: BTreeMap::new(),
            passes: vec![],
            leop_gs: None,
        }
    }

    pub fn track_ground_station(&mut self, cfg: GroundStationCfg) -> Result<()> {
        if self.ground_stations.contains_key(&cfg.identifier) {
            bail!("ground station already tracked, id = <{}>", cfg.identifier);
        }

        self.ground_stations
            .insert(cfg.identifier.clone(), GroundStation::new(cfg));
        Ok(())
    }

    pub fn update_ground_station(&mut self, cfg: GroundStationCfg) -> Result<()> {
        match self.ground_stations.get_mut(&cfg.identifier) {
            Some(gs) => {
                gs.apply(cfg);
                Ok(())
            }
            None => bail!("ground station not tracked, id = <{}>", cfg.identifier),
        }
    }

    pub fn untrack_ground_station(&mut self, identifier: &str) -> Result<GroundStation> {
        match self.ground_stations.remove(identifier) {
            Some(gs) => Ok(gs),
            None => bail!("ground station not tracked, id = <{}>", identifier),
        }
    }

    pub fn track_spacecraft(&mut self, cfg: SpacecraftCfg) -> Result<()> {
        if self.spacecraft.contains_key(&cfg.identifier) {
            bail!("spacecraft already tracked, id = <{}>", cfg.identifier);
        }

        self.spacecraft
            .insert(cfg.identifier.clone(), Spacecraft::new(cfg));
        Ok(())
    }

    pub fn update_spacecraft(&mut self, cfg: SpacecraftCfg) -> Result<()> {
        match self.spacecraft.get_mut(&cfg.identifier) {
            Some(sc) => {
                sc.apply(cfg);
                Ok(())
            }
            None => bail!("spacecraft not tracked, id = <{}>", cfg.identifier),
        }
    }

    pub fn untrack_spacecraft(&mut self, identifier: &str) -> Result<Spacecraft> {
        match self.spacecraft.remove(identifier) {
            Some(sc) => Ok(sc),
            None => bail!("spacecraft not tracked, id = <{}>", identifier),
        }
    }

    pub fn set_ground_track(&mut self, identifier: &str, track: Vec<GroundTrackPoint>) -> Result<()> {
        match self.spacecraft.get_mut(identifier) {
            Some(sc) => {
                sc.set_track(track);
                Ok(())
            }
            None => bail!("spacecraft not tracked, id = <{}>", identifier),
        }
    }

    /// Brings the tracked ground stations in line with a fresh server
    /// listing and reports every difference as a bus event. Entities gone
    /// from the listing are dropped first, then new and changed ones are
    /// taken over in listing order, through the strict single-entity
    /// operations. Unchanged entities stay untouched.
    pub fn reconcile_ground_stations(
        &mut self,
        configs: Vec<GroundStationCfg>,
    ) -> Result<Vec<BusEvent>> {
        let mut events = vec![];

        let fresh: BTreeSet<&str> = configs.iter().map(|cfg| cfg.identifier.as_str()).collect();
        let stale: Vec<String> = self
            .ground_stations
            .keys()
            .filter(|identifier| !fresh.contains(identifier.as_str()))
            .cloned()
            .collect();

        for identifier in stale {
            self.untrack_ground_station(&identifier)?;
            events.push(BusEvent::GsRemoved(identifier));
        }

        for cfg in configs {
            if let Some(gs) = self.ground_stations.get(&cfg.identifier) {
                if gs.cfg != cfg {
                    events.push(BusEvent::GsUpdated(cfg.identifier.clone()));
                    self.update_ground_station(cfg)?;
                }
            } else {
                events.push(BusEvent::GsAdded(cfg.identifier.clone()));
                self.track_ground_station(cfg)?;
            }
        }

        Ok(events)
    }

    /// Same as [`State::reconcile_ground_stations`], for spacecraft.
    pub fn reconcile_spacecraft(&mut self, configs: Vec<SpacecraftCfg>) -> Result<Vec<BusEvent>> {
        let mut events = vec![];

        let fresh: BTreeSet<&str> = configs.iter().map(|cfg| cfg.identifier.as_str()).collect();
        let stale: Vec<String> = self
            .spacecraft
            .keys()
            .filter(|identifier| !fresh.contains(identifier.as_str()))
            .cloned()
            .collect();

        for identifier in stale {
            self.untrack_spacecraft(&identifier)?;
            events.push(BusEvent::ScRemoved(identifier));
        }

        for cfg in configs {
            if let Some(sc) = self.spacecraft.get(&cfg.identifier) {
                if sc.cfg != cfg {
                    events.push(BusEvent::ScUpdated(cfg.identifier.clone()));
                    self.update_spacecraft(cfg)?;
                }
            } else {
                events.push(BusEvent::ScAdded(cfg.identifier.clone()));
                self.track_spacecraft(cfg)?;
            }
        }

        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gs(identifier: &str, callsign: &str) -> GroundStationCfg {
        GroundStationCfg {
            identifier: identifier.to_string(),
            callsign: callsign.to_string(),
            elevation: 10.0,
            latlon: [42.17, -8.68],
        }
    }

    fn sc(identifier: &str, tle_id: &str) -> SpacecraftCfg {
        SpacecraftCfg {
            identifier: identifier.to_string(),
            callsign: identifier.to_uppercase(),
            tle_id: tle_id.to_string(),
        }
    }

    #[test]
    fn tracking_twice_is_an_error() {
        let mut state = State::new();
        state.track_ground_station(gs("gs-vigo", "EA1RCT")).unwrap();

        let err = state
            .track_ground_station(gs("gs-vigo", "EA1RCT"))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "ground station already tracked, id = <gs-vigo>"
        );
    }

    #[test]
    fn updating_untracked_is_an_error() {
        let mut state = State::new();
        let err = state.update_spacecraft(sc("sc-serpens", "40897")).unwrap_err();
        assert_eq!(err.to_string(), "spacecraft not tracked, id = <sc-serpens>");
    }

    #[test]
    fn untrack_returns_the_entity() {
        let mut state = State::new();
        state.track_ground_station(gs("gs-vigo", "EA1RCT")).unwrap();

        let gone = state.untrack_ground_station("gs-vigo").unwrap();
        assert_eq!(gone.identifier(), "gs-vigo");
        assert!(state.ground_stations.is_empty());
        assert!(state.untrack_ground_station("gs-vigo").is_err());
    }

    #[test]
    fn reconcile_reports_additions_in_listing_order() {
        let mut state = State::new();
        let events = state
            .reconcile_ground_stations(vec![gs("gs-vigo", "EA1RCT"), gs("gs-berlin", "DL1ABC")])
            .unwrap();

        assert_eq!(
            events,
            vec![
                BusEvent::GsAdded("gs-vigo".into()),
                BusEvent::GsAdded("gs-berlin".into()),
            ]
        );
        assert_eq!(state.ground_stations.len(), 2);
    }

    #[test]
    fn reconcile_is_quiet_without_changes() {
        let mut state = State::new();
        state
            .reconcile_ground_stations(vec![gs("gs-vigo", "EA1RCT")])
            .unwrap();

        let events = state
            .reconcile_ground_stations(vec![gs("gs-vigo", "EA1RCT")])
            .unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn reconcile_reports_changes_and_removals() {
        let mut state = State::new();
        state
            .reconcile_ground_stations(vec![gs("gs-vigo", "EA1RCT"), gs("gs-berlin", "DL1ABC")])
            .unwrap();

        let events = state
            .reconcile_ground_stations(vec![gs("gs-vigo", "EA1RCT-2")])
            .unwrap();
        assert_eq!(
            events,
            vec![
                BusEvent::GsRemoved("gs-berlin".into()),
                BusEvent::GsUpdated("gs-vigo".into()),
            ]
        );

        let vigo = &state.ground_stations["gs-vigo"];
        assert_eq!(vigo.cfg.callsign, "EA1RCT-2");
        assert_eq!(vigo.marker.label, "EA1RCT-2");
    }

    #[test]
    fn reconcile_spacecraft_keeps_tracks_of_unchanged() {
        let mut state = State::new();
        state.reconcile_spacecraft(vec![sc("sc-serpens", "40897")]).unwrap();
        state
            .set_ground_track(
                "sc-serpens",
                vec![GroundTrackPoint {
                    timestamp: "2026-08-25T10:00:00Z".parse().unwrap(),
                    latitude: 10.0,
                    longitude: 20.0,
                }],
            )
            .unwrap();

        let events = state.reconcile_spacecraft(vec![sc("sc-serpens", "40897")]).unwrap();
        assert!(events.is_empty());
        assert_eq!(state.spacecraft["sc-serpens"].track().len(), 1);
    }

    #[test]
    fn ground_track_for_untracked_spacecraft_is_an_error() {
        let mut state = State::new();
        assert!(state.set_ground_track("sc-ghost", vec![]).is_err());
    }
}
