//! Realtime key-value tree: the remote source of truth for categories, menu
//! items, settings and stats.

mod actor;
mod client;
pub mod error;
pub mod path;
mod push_id;
mod subscription;
mod tree;

pub use actor::{MemoryStore, Response, StoreRequest};
pub use client::StoreClient;
pub use error::StoreError;
pub use path::DbPath;
pub use push_id::PushIdGenerator;
pub use subscription::Subscription;
