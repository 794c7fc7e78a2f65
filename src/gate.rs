//! Owner-only access control.
//!
//! Every slash command is restricted to a single Discord user, the bot owner.
//! The [`AccessGate`] is checked by the commander before any response is
//! deferred, any form is shown or any API call is made.

use log::warn;

/// Guard admitting only the configured owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessGate {
    /// Discord user id of the bot owner
    owner_id: u64,
}

impl AccessGate {
    pub fn new(owner_id: u64) -> Self {
        AccessGate { owner_id }
    }

    /// Returns `true` iff `caller_id` is the owner.
    pub fn authorize(&self, caller_id: u64) -> bool {
        let authorized = caller_id == self.owner_id;
        if !authorized {
            warn!("rejected command from user {}", caller_id);
        }
        authorized
    }

    pub fn owner_id(&self) -> u64 {
        self.owner_id
    }
}
