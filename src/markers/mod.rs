//! Marker data layer
//! - types.rs: Marker, MarkerKind, MarkerSet values
//! - registry.rs: MarkerRegistry (sets + active set)
//! - json.rs: wire format for markers and sets
//! - paths.rs: path aliasing at the serialization boundary
//! - error.rs: registry and item decode errors

pub mod error;
pub mod json;
pub mod paths;
pub mod registry;
pub mod types;

pub use error::{ItemError, RegistryError};
pub use paths::{HomeAliaser, IdentityAliaser, PathAliaser};
pub use registry::MarkerRegistry;
pub use types::{Marker, MarkerKind, MarkerSet};
