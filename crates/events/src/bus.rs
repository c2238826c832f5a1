//! Publish/subscribe abstraction (mechanics only).
//!
//! Subscribers get a copy of every message published after they subscribed.
//! Dropping a [`Subscription`] unregisters it: the bus prunes dead receivers
//! on the next publish.

use std::sync::mpsc::{Receiver, TryIter};

/// A subscription to a message stream.
///
/// Subscriptions are polled from the same event loop that publishes; there is
/// no blocking receive.
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: Receiver<M>,
}

impl<M> Subscription<M> {
    pub fn new(receiver: Receiver<M>) -> Self {
        Self { receiver }
    }

    /// Iterate over everything published since the last poll.
    pub fn pending(&self) -> TryIter<'_, M> {
        self.receiver.try_iter()
    }

    /// Drain everything published since the last poll.
    pub fn drain(&self) -> Vec<M> {
        self.pending().collect()
    }
}

/// Message bus (pub/sub abstraction).
pub trait EventBus<M> {
    type Error: core::fmt::Debug;

    fn publish(&self, message: M) -> Result<(), Self::Error>;

    fn subscribe(&self) -> Subscription<M>;

    /// Number of live subscriptions (as of the last publish).
    fn subscriber_count(&self) -> usize;
}
