//! Listener table shared by media element implementations.

use std::sync::mpsc::Sender;

use super::{MediaEvent, MediaEventKind, Subscription};

/// Routes events to the channels subscribed to their kind.
#[derive(Debug, Default)]
pub struct EventDispatcher {
    next_id: u64,
    listeners: Vec<(Subscription, MediaEventKind, Sender<MediaEvent>)>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, kind: MediaEventKind, sink: Sender<MediaEvent>) -> Subscription {
        let subscription = Subscription(self.next_id);
        self.next_id += 1;
        self.listeners.push((subscription, kind, sink));
        subscription
    }

    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(id, _, _)| *id != subscription);
        self.listeners.len() != before
    }

    /// Send `event` to every matching listener. Listeners whose receiver is
    /// gone are dropped.
    pub fn emit(&mut self, event: MediaEvent) {
        let kind = event.kind();
        self.listeners
            .retain(|(_, listened, sink)| *listened != kind || sink.send(event).is_ok());
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}
