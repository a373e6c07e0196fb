//! Entity change events and the broadcaster fanning them out.
//!
//! Whenever the tracked set of ground stations or spacecraft changes, one
//! event per affected entity goes out to every registered listener. The six
//! event kinds carry the identifier of the entity they concern and nothing
//! else; listeners look the entity up themselves if they need more.

use std::fmt;

use crossbeam_channel::{unbounded, Receiver, Sender};

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BusEvent {
    GsAdded(String),
    GsRemoved(String),
    GsUpdated(String),
    ScAdded(String),
    ScRemoved(String),
    ScUpdated(String),
}

impl BusEvent {
    pub fn name(&self) -> &'static str {
        match self {
            BusEvent::GsAdded(_) => "gs.added",
            BusEvent::GsRemoved(_) => "gs.removed",
            BusEvent::GsUpdated(_) => "gs.updated",
            BusEvent::ScAdded(_) => "sc.added",
            BusEvent::ScRemoved(_) => "sc.removed",
            BusEvent::ScUpdated(_) => "sc.updated",
        }
    }

    pub fn identifier(&self) -> &str {
        match self {
            BusEvent::GsAdded(id)
            | BusEvent::GsRemoved(id)
            | BusEvent::GsUpdated(id)
            | BusEvent::ScAdded(id)
            | BusEvent::ScRemoved(id)
            | BusEvent::ScUpdated(id) => id,
        }
    }
}

impl fmt::Display for BusEvent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.name(), self.identifier())
    }
}

pub struct Broadcaster {
    subscribers: Vec<Sender<BusEvent>>,
}

impl Broadcaster {
    pub fn new() -> Self {
        Broadcaster {
            subscribers: vec![],
        }
    }

    /// Registers a listener. Only events published after this call are
    /// delivered, there is no replay of earlier ones.
    pub fn subscribe(&mut self) -> Receiver<BusEvent> {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        rx
    }

    /// Hands a copy of the event to every live listener. Listeners whose
    /// receiving end is gone are dropped from the list.
    pub fn publish(&mut self, event: &BusEvent) {
        self.subscribers
            .retain(|subscriber| subscriber.send(event.clone()).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_names() {
        let cases = [
            (BusEvent::GsAdded("gs-1".into()), "gs.added"),
            (BusEvent::GsRemoved("gs-1".into()), "gs.removed"),
            (BusEvent::GsUpdated("gs-1".into()), "gs.updated"),
            (BusEvent::ScAdded("sc-1".into()), "sc.added"),
            (BusEvent::ScRemoved("sc-1".into()), "sc.removed"),
            (BusEvent::ScUpdated("sc-1".into()), "sc.updated"),
        ];

        for (event, name) in cases {
            assert_eq!(event.name(), name);
        }

        let event = BusEvent::GsAdded("gs-vigo".into());
        assert_eq!(event.identifier(), "gs-vigo");
        assert_eq!(event.to_string(), "gs.added gs-vigo");
    }

    #[test]
    fn delivers_to_every_subscriber() {
        let mut bus = Broadcaster::new();
        let first = bus.subscribe();
        let second = bus.subscribe();

        bus.publish(&BusEvent::GsAdded("gs-vigo".into()));

        assert_eq!(first.try_recv().unwrap(), BusEvent::GsAdded("gs-vigo".into()));
        assert_eq!(second.try_recv().unwrap(), BusEvent::GsAdded("gs-vigo".into()));
    }

    #[test]
    fn no_replay_for_late_subscribers() {
        let mut bus = Broadcaster::new();
        let early = bus.subscribe();

        bus.publish(&BusEvent::ScAdded("sc-serpens".into()));
        let late = bus.subscribe();
        bus.publish(&BusEvent::ScRemoved("sc-serpens".into()));

        assert_eq!(early.try_iter().count(), 2);
        assert_eq!(late.try_recv().unwrap(), BusEvent::ScRemoved("sc-serpens".into()));
        assert!(late.try_recv().is_err());
    }

    #[test]
    fn prunes_dead_subscribers() {
        let mut bus = Broadcaster::new();
        let keep = bus.subscribe();
        drop(bus.subscribe());

        bus.publish(&BusEvent::GsUpdated("gs-vigo".into()));

        assert_eq!(bus.subscriber_count(), 1);
        assert_eq!(keep.try_iter().count(), 1);
    }
}
