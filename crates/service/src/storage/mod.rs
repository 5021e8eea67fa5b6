//! Storage backends for the service layer.

pub mod shot_store;
