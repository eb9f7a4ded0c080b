//! # Adapters Layer (Outer Hexagon)
//!
//! Adapters sitting on the host side of the ports.
//!
//! - `state_accessor`: record-level access over any `ChaincodeStub`
//! - `memory_stub`: in-memory host for tests and local runs

pub mod memory_stub;
pub mod state_accessor;

pub use memory_stub::*;
pub use state_accessor::*;
