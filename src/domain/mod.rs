//! Domain Layer
//!
//! Location entities, value objects, outbound ports and the pure matching
//! service. Nothing in here performs I/O.

pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;
pub mod value_objects;
