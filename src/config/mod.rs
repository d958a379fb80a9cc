//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → MonitorConfig (validated, immutable)
//!     → settings and endpoints handed to the cycle runner
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the endpoint set is fixed for the process
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - `[endpoints]` keeps document order, which is probe order

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::MonitorConfig;
pub use schema::MonitorSettings;
pub use schema::ObservabilityConfig;
pub use schema::ProbeConfig;
pub use schema::{SinkConfig, SinkKind};
