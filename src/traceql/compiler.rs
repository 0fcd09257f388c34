//! Filter Compiler
//!
//! Compiles filter rows into a TraceQL spanset selector:
//!
//! ```text
//! {footag>=1234 && bartag="barvalue"}
//! ```
//!
//! Incomplete rows are skipped. With no complete rows the result is `{}`,
//! which matches every span.

use crate::traceql::filter::FilterDescriptor;

/// Compile filter rows into a TraceQL query string
pub fn compile(filters: &[FilterDescriptor]) -> String {
    let clauses: Vec<String> = filters.iter().filter_map(FilterDescriptor::render).collect();

    tracing::trace!(
        filters = filters.len(),
        clauses = clauses.len(),
        "compiled trace filters"
    );

    format!("{{{}}}", clauses.join(" && "))
}
