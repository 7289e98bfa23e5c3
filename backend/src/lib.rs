//! Clarity backend library: domain, adapters, and HTTP plumbing.
//!
//! The binary in `main.rs` picks adapters and starts the server; everything
//! it wires together lives here so integration tests can build the same app.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(test)]
mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
