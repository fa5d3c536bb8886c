//! Adapters Layer
//!
//! Outbound implementations of the domain ports: REST collaborators,
//! position sources and selection stores.

pub mod outbound;
