//! Winner resolution over the contact-begin stream.
//!
//! Contact notifications arrive in batches: one integrator step may report
//! zero, one, or many pairs, including several tokens touching the basket
//! in the same step. The monitor's one-shot latch is the single source of
//! truth against a double win — it is set before anything else happens in
//! the handling of the first qualifying contact, and checked before any
//! other qualifying contact (same batch or later) is considered. There is
//! no real parallelism here, so the latch is a plain boolean, not a lock.

use tracing::debug;
use tumble::{BodyId, ColliderId, ContactPair};

use crate::arena::Arena;
use crate::roster::TokenSet;

/// The resolved winning token.
#[derive(Debug, Clone, PartialEq)]
pub struct Winner {
    /// Owner of the winning token. Recorded by name because multiple
    /// tokens share a name; the handles below identify the exact token.
    pub name: String,
    /// Rigid body of the winning token.
    pub body: BodyId,
    /// Collider of the winning token (for highlight repainting).
    pub collider: ColliderId,
}

/// One-shot winner latch over qualifying target contacts.
#[derive(Debug, Default)]
pub struct OutcomeMonitor {
    decided: bool,
}

impl OutcomeMonitor {
    /// Creates an undecided monitor.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true once a winner has been resolved.
    #[must_use]
    pub fn is_decided(&self) -> bool {
        self.decided
    }

    /// Processes one contact batch and resolves a winner at most once.
    ///
    /// A contact qualifies when one member is a target collider and the
    /// other resolves to a live token. The first qualifying contact in
    /// processing order wins; every later one — in this batch or any
    /// future batch — is ignored. Contacts between the target and
    /// non-token bodies never set the latch.
    pub fn observe(
        &mut self,
        contacts: &[ContactPair],
        arena: &Arena,
        tokens: &TokenSet,
    ) -> Option<Winner> {
        if self.decided {
            return None;
        }

        for pair in contacts {
            let candidate = if arena.is_target(pair.first) {
                pair.second
            } else if arena.is_target(pair.second) {
                pair.first
            } else {
                continue;
            };

            if let Some(token) = tokens.token_for(candidate) {
                // Latch first: nothing after this point may pick a second
                // winner, even within the same batch.
                self.decided = true;
                debug!(owner = %token.owner, "winning contact resolved");
                return Some(Winner {
                    name: token.owner.clone(),
                    body: token.body,
                    collider: token.collider,
                });
            }
        }

        None
    }
}
