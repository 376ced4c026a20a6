//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ProxyConfig (validated, immutable)
//!     → shared via Arc to all subsystems
//!
//! On file change:
//!     watcher.rs detects modification
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → server swaps the runtime settings atomically
//!     → in-flight requests keep the settings they loaded
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a reload
//! - All fields have defaults so a missing config file still runs
//! - Validation separates syntactic (serde) from semantic checks
//! - Listener-level settings (bind address, download prefix, site root)
//!   are part of the compiled router and only apply on restart

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use schema::DownloadConfig;
pub use schema::ListenerConfig;
pub use schema::ObservabilityConfig;
pub use schema::ProxyConfig;
pub use schema::SiteConfig;
pub use schema::UpstreamConfig;
