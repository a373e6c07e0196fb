use crossbeam_channel::Sender;
use log::{Log, Metadata, Record};

use crate::event::Event;

/// Forwards log records into the UI event channel so they end up in the log
/// pane instead of corrupting the raw mode terminal.
pub struct Logger {
    sender: Sender<Event>,
}

impl Logger {
    pub fn new(sender: Sender<Event>) -> Self {
        Logger { sender }
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.target().starts_with("satnet")
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let message = format!("{}", record.args());
            // the UI thread logs into its own queue, so this must never block
            let _ = self.sender.try_send(Event::Log((record.level(), message)));
        }
    }

    fn flush(&self) {}
}
