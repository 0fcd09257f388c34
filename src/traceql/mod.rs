//! TraceQL Filter Compilation
//!
//! Turns structured trace search rows into a TraceQL spanset selector.
//!
//! - **Filter**: `FilterDescriptor` rows and their value types and scopes
//! - **Compiler**: joins complete rows into `{a="x" && b>1}`
//!
//! # Example
//!
//! ```rust
//! use querysplit::traceql::{compile, FilterDescriptor, FilterKind, ValueType};
//!
//! let filters = vec![
//!     FilterDescriptor::new("status", FilterKind::Static)
//!         .with_tag("http.status_code")
//!         .with_operator(">=")
//!         .with_value("500")
//!         .with_value_type(ValueType::Integer),
//!     // no value yet, skipped
//!     FilterDescriptor::new("svc", FilterKind::Dynamic)
//!         .with_tag("service.name")
//!         .with_operator("="),
//! ];
//!
//! assert_eq!(compile(&filters), "{http.status_code>=500}");
//! ```

mod compiler;
mod filter;

pub use compiler::compile;
pub use filter::{
    deserialize_rows, rows_from_json, FilterDescriptor, FilterKind, TagScope, ValueType,
};
