//! Request tickets that keep stale responses from overwriting newer ones.

use serde::Serialize;

/// Identifies one request issued by a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Ticket(u64);

impl Ticket {
    /// Sequence number, starting at 1.
    pub const fn number(self) -> u64 {
        self.0
    }
}

/// Issues monotonically increasing tickets and remembers the latest one.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: u64,
}

impl RequestSequencer {
    /// Create a sequencer that has issued nothing yet.
    pub const fn new() -> Self {
        Self { latest: 0 }
    }

    /// Issue a ticket newer than every ticket issued before.
    pub fn issue(&mut self) -> Ticket {
        self.latest += 1;
        Ticket(self.latest)
    }

    /// True when `ticket` is the most recently issued one.
    pub const fn is_latest(&self, ticket: Ticket) -> bool {
        ticket.0 == self.latest
    }

    /// The most recent ticket, if any was issued.
    pub const fn latest(&self) -> Option<Ticket> {
        if self.latest == 0 {
            None
        } else {
            Some(Ticket(self.latest))
        }
    }
}
