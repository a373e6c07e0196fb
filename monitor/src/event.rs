use log::Level;

use crate::network::Data;

pub enum Event {
    Input(termion::event::Event),
    Log((Level, String)),
    CommandResponse(Data),
    NoServerConnection,
    Resize,
    Shutdown,
    Tick,
}
