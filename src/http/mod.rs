//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, route dispatch)
//!     → request.rs (request ID for correlation)
//!     → /dl/*  : downloads subsystem → response.rs (header rewrite)
//!     → others : static site fallback, untouched
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::request_id;
pub use server::HttpServer;
