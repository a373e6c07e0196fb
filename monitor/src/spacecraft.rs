use chrono::{DateTime, Utc};
use satnet_client::{GroundTrackPoint, SpacecraftCfg};

use crate::marker::Marker;

/// Tracked spacecraft with its propagated ground track.
///
/// The track arrives from the server as timestamped samples; the map needs
/// plain lon/lat pairs, so those are kept precomputed alongside.
pub struct Spacecraft {
    pub cfg: SpacecraftCfg,
    track: Vec<GroundTrackPoint>,
    coords: Vec<(f64, f64)>,
}

impl Spacecraft {
    pub fn new(cfg: SpacecraftCfg) -> Self {
        Spacecraft {
            cfg,
            track: vec![],
            coords: vec![],
        }
    }

    pub fn identifier(&self) -> &str {
        &self.cfg.identifier
    }

    pub fn apply(&mut self, cfg: SpacecraftCfg) {
        // a new TLE invalidates the propagated track
        if cfg.tle_id != self.cfg.tle_id {
            self.track.clear();
            self.coords.clear();
        }
        self.cfg = cfg;
    }

    pub fn set_track(&mut self, mut track: Vec<GroundTrackPoint>) {
        track.sort_by_key(|point| point.timestamp);
        self.coords = track
            .iter()
            .map(|point| (point.longitude, point.latitude))
            .collect();
        self.track = track;
    }

    pub fn track(&self) -> &[GroundTrackPoint] {
        &self.track
    }

    /// Splits the track coordinates into the part already flown and the part
    /// still ahead of `now`.
    pub fn track_layers(&self, now: DateTime<Utc>) -> (&[(f64, f64)], &[(f64, f64)]) {
        let at = self.track.partition_point(|point| point.timestamp <= now);
        self.coords.split_at(at)
    }

    /// Current map marker, or `None` while no track sample is available.
    pub fn marker(&self, now: DateTime<Utc>) -> Option<Marker> {
        let (lat, lng) = self.position_at(now)?;
        Some(Marker {
            lat,
            lng,
            label: self.cfg.callsign.clone(),
        })
    }

    /// Sample nearest to `now`; ties go to the elapsed sample.
    fn position_at(&self, now: DateTime<Utc>) -> Option<(f64, f64)> {
        let at = self.track.partition_point(|point| point.timestamp <= now);
        let behind = at.checked_sub(1).map(|at| self.track[at]);
        let ahead = self.track.get(at).copied();

        let point = match (behind, ahead) {
            (Some(behind), Some(ahead)) => {
                if ahead.timestamp - now < now - behind.timestamp {
                    ahead
                } else {
                    behind
                }
            }
            (Some(point), None) | (None, Some(point)) => point,
            (None, None) => return None,
        };

        Some((point.latitude, point.longitude))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> SpacecraftCfg {
        SpacecraftCfg {
            identifier: "sc-serpens".to_string(),
            callsign: "SERPENS".to_string(),
            tle_id: "40897".to_string(),
        }
    }

    fn sample(at: &str, lat: f64, lng: f64) -> GroundTrackPoint {
        GroundTrackPoint {
            timestamp: at.parse().unwrap(),
            latitude: lat,
            longitude: lng,
        }
    }

    #[test]
    fn no_marker_without_track() {
        let sc = Spacecraft::new(cfg());
        assert!(sc.marker("2026-08-25T10:00:00Z".parse().unwrap()).is_none());
    }

    #[test]
    fn marker_rides_the_nearest_sample() {
        let mut sc = Spacecraft::new(cfg());
        sc.set_track(vec![
            sample("2026-08-25T10:00:00Z", 10.0, 20.0),
            sample("2026-08-25T10:05:00Z", 12.0, 24.0),
            sample("2026-08-25T10:10:00Z", 14.0, 28.0),
        ]);

        let marker = sc.marker("2026-08-25T10:07:00Z".parse().unwrap()).unwrap();
        assert_eq!(marker.lat, 12.0);
        assert_eq!(marker.lng, 24.0);
        assert_eq!(marker.label, "SERPENS");

        // the upcoming sample is closer now
        let marker = sc.marker("2026-08-25T10:08:00Z".parse().unwrap()).unwrap();
        assert_eq!(marker.lat, 14.0);
        assert_eq!(marker.lng, 28.0);

        // dead center, the elapsed sample wins
        let marker = sc.marker("2026-08-25T10:07:30Z".parse().unwrap()).unwrap();
        assert_eq!(marker.lat, 12.0);
    }

    #[test]
    fn marker_clamps_to_the_track_ends() {
        let mut sc = Spacecraft::new(cfg());
        sc.set_track(vec![
            sample("2026-08-25T10:00:00Z", 10.0, 20.0),
            sample("2026-08-25T10:10:00Z", 14.0, 28.0),
        ]);

        let marker = sc.marker("2026-08-25T09:30:00Z".parse().unwrap()).unwrap();
        assert_eq!(marker.lat, 10.0);

        let marker = sc.marker("2026-08-25T11:00:00Z".parse().unwrap()).unwrap();
        assert_eq!(marker.lat, 14.0);
    }

    #[test]
    fn track_layers_split_at_now() {
        let mut sc = Spacecraft::new(cfg());
        sc.set_track(vec![
            sample("2026-08-25T10:00:00Z", 10.0, 20.0),
            sample("2026-08-25T10:05:00Z", 12.0, 24.0),
            sample("2026-08-25T10:10:00Z", 14.0, 28.0),
        ]);

        let (flown, ahead) = sc.track_layers("2026-08-25T10:05:00Z".parse().unwrap());
        assert_eq!(flown, &[(20.0, 10.0), (24.0, 12.0)][..]);
        assert_eq!(ahead, &[(28.0, 14.0)][..]);
    }

    #[test]
    fn new_tle_clears_the_track() {
        let mut sc = Spacecraft::new(cfg());
        sc.set_track(vec![sample("2026-08-25T10:00:00Z", 10.0, 20.0)]);

        let mut updated = cfg();
        updated.tle_id = "40900".to_string();
        sc.apply(updated);

        assert!(sc.track().is_empty());
        assert!(sc.marker("2026-08-25T10:00:00Z".parse().unwrap()).is_none());
    }
}
