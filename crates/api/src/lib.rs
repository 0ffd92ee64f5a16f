//! Label viewer HTTP server library.
//!
//! Exposes the building blocks (config, state, error handling, upload
//! extractor, routes) so integration tests and the binary entrypoint share
//! the same router.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod routes;
pub mod state;
pub mod upload;
