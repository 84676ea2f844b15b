//! Decompression schedule module.
//!
//! Resolves dive parameters against the US Navy air decompression table,
//! loaded once at startup and shared read-only across requests.

#[cfg(test)]
mod fixtures;
mod models;
mod resolver;
mod routes;
mod table;
mod validator;

pub use models::DecoErrorResponse;
pub use resolver::{DecoError, Resolver};
pub use routes::router;
pub use table::DecoTable;
