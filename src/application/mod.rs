//! Application Layer
//!
//! Use cases that orchestrate the domain ports.

mod location_resolver;
mod resolver_sessions;

pub use location_resolver::{LocationResolver, ResolutionOutcome, ResolverSettings, ResolverState};
pub use resolver_sessions::{ResolverSessions, SessionId};
