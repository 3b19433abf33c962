//! Generation guard for background loads
//!
//! Every request is issued a [`Ticket`]. Issuing a new ticket on the same
//! channel supersedes all earlier ones, and their results are dropped when
//! they arrive.

use std::fmt;

/// Independent streams of requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadChannel {
    Categories,
    Transactions,
    Session,
    Mutation,
}

impl LoadChannel {
    const COUNT: usize = 4;

    fn index(self) -> usize {
        match self {
            Self::Categories => 0,
            Self::Transactions => 1,
            Self::Session => 2,
            Self::Mutation => 3,
        }
    }
}

impl fmt::Display for LoadChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Categories => "categories",
            Self::Transactions => "transactions",
            Self::Session => "session",
            Self::Mutation => "mutation",
        };
        write!(f, "{}", name)
    }
}

/// Identifies one request on a channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub channel: LoadChannel,
    pub generation: u64,
}

/// Tracks the latest generation issued per channel
#[derive(Debug, Default, Clone)]
pub struct LoadGuard {
    generations: [u64; LoadChannel::COUNT],
}

impl LoadGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket, superseding every earlier ticket on the channel
    pub fn issue(&mut self, channel: LoadChannel) -> Ticket {
        let slot = &mut self.generations[channel.index()];
        *slot += 1;
        Ticket {
            channel,
            generation: *slot,
        }
    }

    /// Whether the ticket is still the latest on its channel
    pub fn is_current(&self, ticket: &Ticket) -> bool {
        self.generations[ticket.channel.index()] == ticket.generation
    }

    /// Supersede any outstanding request on the channel without issuing a new one
    pub fn invalidate(&mut self, channel: LoadChannel) {
        self.generations[channel.index()] += 1;
    }

    /// Supersede everything outstanding (used on logout)
    pub fn invalidate_all(&mut self) {
        for generation in &mut self.generations {
            *generation += 1;
        }
    }
}
