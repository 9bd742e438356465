//! Sequence numbers for re-entrant list refreshes.
//!
//! Every fetch a screen issues takes a [`LoadTicket`]. When the response
//! arrives it is applied only if its ticket is still the latest one issued,
//! so a slow, older response can never overwrite a newer list.

/// Identity of one issued load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket(u64);

impl LoadTicket {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Monotonic issuer of [`LoadTicket`]s.
#[derive(Debug, Default, Clone)]
pub struct LoadSequencer {
    latest: u64,
}

impl LoadSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket newer than every ticket issued before it.
    pub fn issue(&mut self) -> LoadTicket {
        self.latest += 1;
        LoadTicket(self.latest)
    }

    /// Whether `ticket` is the most recently issued one.
    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.0 == self.latest
    }
}
