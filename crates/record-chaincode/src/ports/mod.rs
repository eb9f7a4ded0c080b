//! # Ports Layer (Middle Hexagon)
//!
//! Trait definitions between the chaincode and its host.
//!
//! - **Driving Ports (Inbound)**: `Chaincode`
//! - **Driven Ports (Outbound)**: `ChaincodeStub`, `StateQueryIterator`
//! - No concrete implementations in this module

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
