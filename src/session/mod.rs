//! Session layer
//! - module.rs: MarkersModule, the session-owned registry
//! - handlers.rs: RPC command handlers
//! - notifier.rs: client events and the Notifier capability
//! - store.rs: persisted registry document
//! - error.rs: parameter and store errors

pub mod error;
pub mod handlers;
pub mod module;
pub mod notifier;
pub mod store;

pub use error::{ParamError, StoreError};
pub use module::MarkersModule;
pub use notifier::{AutoSelect, ChannelNotifier, ClientEvent, Notifier};
pub use store::MarkerStore;
