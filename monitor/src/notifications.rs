use chrono::{DateTime, Utc};

#[derive(Clone, Debug, PartialEq)]
pub struct Notification {
    pub time: DateTime<Utc>,
    pub source: String,
    pub text: String,
}

/// Timestamp ordered feed of operational events for the events view.
///
/// Records may arrive out of order, the server delivers station messages in
/// batches, so each one is placed at its timestamp position. Records with
/// equal timestamps keep their arrival order. The feed is bounded; once full,
/// the oldest records give way.
pub struct NotificationLog {
    entries: Vec<Notification>,
    capacity: usize,
}

impl NotificationLog {
    pub fn with_capacity(capacity: usize) -> Self {
        NotificationLog {
            entries: vec![],
            capacity,
        }
    }

    pub fn insert(&mut self, notification: Notification) {
        // batched polling may deliver a record twice
        if self.entries.contains(&notification) {
            return;
        }

        let at = self
            .entries
            .partition_point(|entry| entry.time <= notification.time);
        self.entries.insert(at, notification);

        if self.entries.len() > self.capacity {
            let excess = self.entries.len() - self.capacity;
            self.entries.drain(..excess);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
