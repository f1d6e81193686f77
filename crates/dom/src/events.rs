//! Window event subscription.
//!
//! Elements that follow the page geometry subscribe a [`ListenerId`] to the
//! window events they observe. The host looks subscribers up when an event
//! fires and drives them; subscription ownership stays with the element.

use crate::DomError;
use core::fmt;
use core::str::FromStr;
use std::collections::HashMap;

/// Window-level events that can move content relative to the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    Resize,
    Scroll,
    Wheel,
    TouchMove,
}

impl EventType {
    /// All observable event types, in registration order.
    pub const ALL: [Self; 4] = [Self::Resize, Self::Scroll, Self::Wheel, Self::TouchMove];

    /// The DOM event name.
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Resize => "resize",
            Self::Scroll => "scroll",
            Self::Wheel => "wheel",
            Self::TouchMove => "touchmove",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = DomError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|event| event.as_str().eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| DomError::InvalidEvent(name.to_owned()))
    }
}

/// Identifies a subscribed callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u32);

/// Something window events can be subscribed on.
pub trait EventTarget {
    /// Subscribe `listener` to `event`. Subscribing twice is a no-op.
    fn add_event_listener(&mut self, event: EventType, listener: ListenerId);

    /// Unsubscribe `listener` from `event`. Unknown listeners are ignored.
    fn remove_event_listener(&mut self, event: EventType, listener: ListenerId);
}

/// Attach/detach totals for a single event type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListenerCounts {
    pub attached: usize,
    pub detached: usize,
}

/// Subscription registry keyed by event type.
#[derive(Debug, Default, Clone)]
pub struct EventHub {
    listeners: HashMap<EventType, Vec<ListenerId>>,
    counts: HashMap<EventType, ListenerCounts>,
}

impl EventHub {
    /// Create an empty registry.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Listeners subscribed to `event`, in subscription order.
    pub fn listeners(&self, event: EventType) -> &[ListenerId] {
        self.listeners.get(&event).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether `listener` is subscribed to `event`.
    pub fn is_subscribed(&self, event: EventType, listener: ListenerId) -> bool {
        self.listeners(event).contains(&listener)
    }

    /// Attach/detach totals for `event` since the registry was created.
    pub fn counts(&self, event: EventType) -> ListenerCounts {
        self.counts.get(&event).copied().unwrap_or_default()
    }

    /// Total number of live subscriptions across all event types.
    pub fn len(&self) -> usize {
        self.listeners.values().map(Vec::len).sum()
    }

    /// Whether no subscriptions are live.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EventTarget for EventHub {
    fn add_event_listener(&mut self, event: EventType, listener: ListenerId) {
        let subscribed = self.listeners.entry(event).or_default();
        if subscribed.contains(&listener) {
            return;
        }
        subscribed.push(listener);
        self.counts.entry(event).or_default().attached += 1;
    }

    fn remove_event_listener(&mut self, event: EventType, listener: ListenerId) {
        let Some(subscribed) = self.listeners.get_mut(&event) else {
            return;
        };
        let before = subscribed.len();
        subscribed.retain(|existing| *existing != listener);
        if subscribed.len() != before {
            self.counts.entry(event).or_default().detached += 1;
        }
    }
}
