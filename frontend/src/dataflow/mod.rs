//! Actor+Relay primitives for the page controllers
//!
//! - **[`Relay`]** - one event source, one unbounded channel
//! - **[`Actor`]** - state plus the loop that processes its relays
//!
//! # Architecture Principles
//!
//! 1. **Event-Source Naming** - Relays follow `{source}_{event}_relay`
//! 2. **Single Point of Mutation** - only the Actor loop touches its state
//! 3. **Signals for Reads** - state is observed through `Actor::signal`

pub mod actor;
pub mod relay;

pub use actor::Actor;
pub use relay::{Relay, relay};
