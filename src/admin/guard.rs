use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::error::AdminError;

/// Allows one save at a time per form.
#[derive(Debug, Clone, Default)]
pub struct SaveGuard {
    busy: Arc<AtomicBool>,
}

/// Held while a save runs; releases the guard on drop.
#[derive(Debug)]
pub struct SaveTicket {
    busy: Arc<AtomicBool>,
}

impl SaveGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_begin(&self) -> Result<SaveTicket, AdminError> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| AdminError::SaveInProgress)?;
        Ok(SaveTicket {
            busy: Arc::clone(&self.busy),
        })
    }

    pub fn is_saving(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

impl Drop for SaveTicket {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}
