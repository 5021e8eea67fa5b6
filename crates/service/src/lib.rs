//! Service layer for the shots collection.
//! - `shots` holds the domain types and the `ShotRepository` contract.
//! - `storage` holds the in-memory store implementing it.

pub mod errors;
pub mod shots;
pub mod storage;

pub use errors::ServiceError;
pub use shots::{Shot, ShotId, ShotRepository};
pub use storage::shot_store::ShotStore;
