//! # Domain Layer (Inner Hexagon)
//!
//! Pure business logic for record management.
//! NO async, NO host access.
//!
//! - `catalog`: error catalog and formatter
//! - `schema`: declarative record validation
//! - `entities`: document types, keys, stored documents
//! - `query`: rich-query selectors

pub mod catalog;
pub mod entities;
pub mod query;
pub mod schema;

pub use catalog::*;
pub use entities::*;
pub use query::*;
pub use schema::*;
