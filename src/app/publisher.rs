//! Status publisher: answers a status query with a read-resolve-commit
//! transaction against the [`StateStore`].
//!
//! This is the only place the auto-mode pump flag gets written as a side
//! effect.  The resolver's patch is applied inside the same critical
//! section as the read, so a manual-mode write racing with the query
//! either lands before (and the resolver sees manual, producing no patch)
//! or after (and overwrites the flag itself).

use crate::resolver::{ControlResolver, Resolution};
use crate::state::StateStore;

#[derive(Debug, Clone, Copy, Default)]
pub struct StatusPublisher {
    resolver: ControlResolver,
}

impl StatusPublisher {
    pub fn new(resolver: ControlResolver) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &ControlResolver {
        &self.resolver
    }

    /// Resolve the current state and commit the implied control patch.
    pub fn query(&self, store: &StateStore) -> Resolution {
        store.transact(|state| {
            let resolution = self.resolver.resolve(&state.reading, &state.intent);
            (resolution, resolution.patch)
        })
    }
}
