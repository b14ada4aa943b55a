use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::Error;
use crate::session::SessionId;

/// Sessions with a generation request in flight. Only one is allowed per
/// session; further requests are turned away until it finishes.
#[derive(Debug, Default)]
pub struct PendingGenerations {
    sessions: Mutex<HashSet<SessionId>>,
}

impl PendingGenerations {
    pub fn new() -> PendingGenerations {
        PendingGenerations::default()
    }

    pub fn acquire(&self, session_id: SessionId) -> Result<PendingGuard<'_>, Error> {
        if !self.lock().insert(session_id) {
            return Err(Error::GenerationAlreadyPending { session_id });
        }

        Ok(PendingGuard {
            pending: self,
            session_id,
        })
    }

    pub fn is_pending(&self, session_id: SessionId) -> bool {
        self.lock().contains(&session_id)
    }

    fn lock(&self) -> MutexGuard<'_, HashSet<SessionId>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Releases the session when dropped, whether the generation succeeded or not.
#[derive(Debug)]
pub struct PendingGuard<'a> {
    pending: &'a PendingGenerations,
    session_id: SessionId,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.pending.lock().remove(&self.session_id);
    }
}
