//! Keeps a render payload in sync with mesh collections and a clip pose, and
//! publishes it to the 3D front end.

pub mod config;
pub mod context;
pub mod error;
pub mod frame;
pub mod properties;
pub mod subscribers;
pub mod synchronizer;

pub use context::RenderContext;
pub use error::SyncError;
pub use frame::Frame;
pub use synchronizer::{ClipState, Synchronizer};
