mod client;
mod error;
mod ground_stations;
mod leop;
mod methods;
mod slots;
mod spacecraft;

pub use crate::client::Client;
pub use crate::error::Error;
pub use crate::ground_stations::GroundStationCfg;
pub use crate::leop::{LeopCfg, LeopGroundStations, Message};
pub use crate::methods::resolve;
pub use crate::slots::PassSlot;
pub use crate::spacecraft::{GroundTrackPoint, SpacecraftCfg};
