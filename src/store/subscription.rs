use serde_json::Value;
use tokio::sync::watch;

use super::path::DbPath;

/// Live view of one path.
///
/// The first call to [`Subscription::next`] yields the current snapshot; later
/// calls wait for the next change. Dropping the subscription unsubscribes.
#[derive(Debug)]
pub struct Subscription {
    path: DbPath,
    receiver: watch::Receiver<Value>,
    primed: bool,
}

impl Subscription {
    pub fn new(path: DbPath, receiver: watch::Receiver<Value>) -> Self {
        Self {
            path,
            receiver,
            primed: false,
        }
    }

    pub fn path(&self) -> &DbPath {
        &self.path
    }

    /// Returns `None` once the store has shut down.
    pub async fn next(&mut self) -> Option<Value> {
        if !self.primed {
            self.primed = true;
            return Some(self.receiver.borrow_and_update().clone());
        }
        self.receiver.changed().await.ok()?;
        Some(self.receiver.borrow_and_update().clone())
    }
}
