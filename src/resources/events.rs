use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Something a host may want to show: fleet changes, track ownership
/// changes and pilot transmissions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    Added {
        callsign: String,
    },
    Modified {
        callsign: String,
    },
    Removed {
        callsign: String,
    },
    InitiatedTrack {
        callsign: String,
        controller: String,
    },
    DroppedTrack {
        callsign: String,
        controller: String,
    },
    OfferedHandoff {
        callsign: String,
        from: String,
        to: String,
    },
    AcceptedHandoff {
        callsign: String,
        controller: String,
    },
    TextMessage {
        sender: String,
        contents: String,
    },
}

impl SimEvent {
    /// Aircraft the event refers to.
    pub fn callsign(&self) -> &str {
        match self {
            SimEvent::Added { callsign }
            | SimEvent::Modified { callsign }
            | SimEvent::Removed { callsign }
            | SimEvent::InitiatedTrack { callsign, .. }
            | SimEvent::DroppedTrack { callsign, .. }
            | SimEvent::OfferedHandoff { callsign, .. }
            | SimEvent::AcceptedHandoff { callsign, .. } => callsign,
            SimEvent::TextMessage { sender, .. } => sender,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriberId(u64);

const COMPACT_WARN_LEN: usize = 1000;

/// Append-only pub/sub buffer. Each subscriber sees every event posted after
/// it subscribed, exactly once.
#[derive(Debug, Default)]
pub struct EventStream {
    events: Vec<SimEvent>,
    subscribers: BTreeMap<SubscriberId, usize>,
    next_id: u64,
}

impl EventStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self) -> SubscriberId {
        let id = SubscriberId(self.next_id);
        self.next_id += 1;
        self.subscribers.insert(id, self.events.len());
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriberId) {
        if self.subscribers.remove(&id).is_none() {
            warn!("unsubscribe for unknown event subscriber {:?}", id);
        }
        self.compact();
    }

    /// Events nobody is listening for are dropped.
    pub fn post(&mut self, event: SimEvent) {
        debug!("posted event {:?}", event);
        if !self.subscribers.is_empty() {
            self.events.push(event);
        }
    }

    /// Everything posted since this subscriber's previous call.
    pub fn get(&mut self, id: SubscriberId) -> Vec<SimEvent> {
        let Some(offset) = self.subscribers.get_mut(&id) else {
            warn!("get for unknown event subscriber {:?}", id);
            return Vec::new();
        };
        let events = self.events[*offset..].to_vec();
        *offset = self.events.len();
        self.compact();
        events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    // Drop the prefix that every subscriber has consumed
    fn compact(&mut self) {
        let min_offset = self
            .subscribers
            .values()
            .copied()
            .min()
            .unwrap_or(self.events.len());
        if self.events.len() > COMPACT_WARN_LEN {
            warn!("event stream length {}", self.events.len());
        }
        if min_offset > 0 {
            self.events.drain(..min_offset);
            for offset in self.subscribers.values_mut() {
                *offset -= min_offset;
            }
        }
    }
}
