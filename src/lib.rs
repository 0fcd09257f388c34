//! # Querysplit
//!
//! Query preparation for time-series and trace backends.
//!
//! ## Features
//!
//! - **Range splitting**: Break long metric queries into step-aligned chunks,
//!   and log queries into contiguous chunks, under a chunk-count cap
//! - **TraceQL compilation**: Turn structured filter rows into a spanset
//!   selector like `{span.http.status_code>=500 && name="GET"}`
//! - **Surfaces**: CLI and JSON HTTP API around both
//!
//! ## Modules
//!
//! - [`split`]: Range chunker, duration and timestamp parsing
//! - [`traceql`]: Filter rows and the compiler
//! - [`config`]: TOML configuration with environment overrides
//! - [`logging`]: Tracing subscriber setup
//! - [`api`]: REST API server with Axum
//!
//! ## Quick Start
//!
//! ```rust
//! use querysplit::split::RangeChunker;
//! use querysplit::traceql::{compile, FilterDescriptor, FilterKind};
//!
//! let chunks = RangeChunker::default()
//!     .chunk(0, 3_600_000, 15_000, 600_000)
//!     .expect("range fits under the chunk cap");
//! assert!(chunks.iter().all(|c| c.duration_millis() <= 600_000));
//!
//! let query = compile(&[FilterDescriptor::new("name", FilterKind::Static)
//!     .with_tag("name")
//!     .with_operator("=")
//!     .with_value("GET /api")]);
//! assert_eq!(query, r#"{name="GET /api"}"#);
//! ```

pub mod api;
pub mod config;
pub mod logging;
pub mod split;
pub mod traceql;

// Re-export top-level types for convenience
pub use split::{
    parse_duration, parse_timestamp, range_chunks, Chunk, RangeChunker, SplitError, SplitResult,
    TimeRange, DEFAULT_MAX_CHUNK_COUNT,
};

pub use traceql::{compile, FilterDescriptor, FilterKind, TagScope, ValueType};

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{ApiConfig, Config, ConfigError, LogFormat, LoggingConfig, SplitConfig};

pub use logging::{init_tracing, LoggingError};
