//! System orchestration, startup, and shutdown logic.

pub mod error;
pub mod menu_system;
pub mod tracing;

pub use self::error::*;
pub use self::menu_system::*;
pub use self::tracing::*;
