//! High-level commands for bitb-project-sync.
//!
//! Frontends build [`SyncOptions`] and hand them to a [`SyncCommand`].

pub mod sync;

pub use sync::{SyncCommand, SyncOptions, SyncReport};
