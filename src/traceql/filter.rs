//! Trace Filter Descriptors
//!
//! One `FilterDescriptor` is one row of a trace search editor: a tag, a
//! comparison operator, and a value. Rows are edited incrementally, so any of
//! those three may still be missing when the query is compiled.
//!
//! # JSON form
//!
//! ```text
//! { "id": "duration", "type": "static", "tag": "duration",
//!   "operator": ">", "value": "100ms", "valueType": "duration" }
//! ```
//!
//! Editors send value types and row kinds this crate may not know about.
//! Those still deserialize: unknown value types render unquoted and unknown
//! kinds read as dynamic. A row that is malformed in any other way is
//! skipped by [`rows_from_json`] rather than failing the whole list.

use serde::{Deserialize, Deserializer, Serialize};

/// Whether a filter row is fixed by the editor or added by the user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    #[default]
    Static,
    #[serde(other)]
    Dynamic,
}

/// Type of a filter value, deciding how it is rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    /// Rendered double-quoted
    #[default]
    String,
    Integer,
    Float,
    /// A duration literal such as `100ms`
    Duration,
    Boolean,
    /// An enum literal such as `error` or `server`
    Keyword,
    /// Any other type name, e.g. `uint`
    #[serde(other)]
    Other,
}

impl ValueType {
    /// Whether values of this type are written without quotes
    pub fn is_bare(&self) -> bool {
        !matches!(self, Self::String)
    }
}

/// Attribute namespace a tag lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagScope {
    Resource,
    Span,
    /// Matches the tag in any attribute namespace
    Unscoped,
    /// Built-in fields like `duration` or `name`
    Intrinsic,
}

impl TagScope {
    /// Prefix the tag with this scope
    pub fn qualify(&self, tag: &str) -> String {
        match self {
            Self::Resource => format!("resource.{}", tag),
            Self::Span => format!("span.{}", tag),
            Self::Unscoped => format!(".{}", tag),
            Self::Intrinsic => tag.to_string(),
        }
    }
}

/// A single trace filter row
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterDescriptor {
    /// Row identifier used by editors
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: FilterKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_type: Option<ValueType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<TagScope>,
}

impl FilterDescriptor {
    /// Create an empty filter row
    pub fn new(id: impl Into<String>, kind: FilterKind) -> Self {
        Self {
            id: id.into(),
            kind,
            ..Default::default()
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn with_operator(mut self, operator: impl Into<String>) -> Self {
        self.operator = Some(operator.into());
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_value_type(mut self, value_type: ValueType) -> Self {
        self.value_type = Some(value_type);
        self
    }

    pub fn with_scope(mut self, scope: TagScope) -> Self {
        self.scope = Some(scope);
        self
    }

    /// A filter is complete when tag, operator and value are all non-empty
    pub fn is_complete(&self) -> bool {
        [&self.tag, &self.operator, &self.value]
            .iter()
            .all(|field| field.as_deref().is_some_and(|s| !s.is_empty()))
    }

    /// Render this filter as a single clause, or None if it is incomplete
    pub fn render(&self) -> Option<String> {
        let tag = non_empty(&self.tag)?;
        let operator = non_empty(&self.operator)?;
        let value = non_empty(&self.value)?;

        let tag = match self.scope {
            Some(scope) => scope.qualify(tag),
            None => tag.to_string(),
        };

        let clause = if self.value_type.unwrap_or_default().is_bare() {
            format!("{}{}{}", tag, operator, value)
        } else {
            format!("{}{}\"{}\"", tag, operator, value)
        };

        Some(clause)
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

/// Read filter rows from raw JSON, skipping rows that do not parse
pub fn rows_from_json(rows: Vec<serde_json::Value>) -> Vec<FilterDescriptor> {
    rows.into_iter()
        .enumerate()
        .filter_map(|(index, row)| match serde_json::from_value(row) {
            Ok(filter) => Some(filter),
            Err(e) => {
                tracing::debug!(index, error = %e, "skipping malformed filter row");
                None
            }
        })
        .collect()
}

/// `deserialize_with` helper for a list of filter rows
pub fn deserialize_rows<'de, D>(deserializer: D) -> Result<Vec<FilterDescriptor>, D::Error>
where
    D: Deserializer<'de>,
{
    let rows = Vec::<serde_json::Value>::deserialize(deserializer)?;
    Ok(rows_from_json(rows))
}
