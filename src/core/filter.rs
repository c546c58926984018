//! Record filters
//!
//! A listing request narrows the collection in two ways:
//!
//! - scope filters: typed equality/range filters specific to a resource
//!   (`?eventId=3`, `?dateFrom=...`), see [`ScopeFilter`]
//! - free text: `?q=term`, matched as a substring against the resource's
//!   searchable attributes, see [`TextFilter`]
//!
//! [`RecordFilter`] ANDs both together. Scope filters run first.

use std::fmt;

/// A nullable string attribute of `R` searched by `q`
pub struct TextField<R> {
    name: &'static str,
    get: fn(&R) -> Option<&str>,
}

impl<R> TextField<R> {
    pub const fn new(name: &'static str, get: fn(&R) -> Option<&str>) -> Self {
        Self { name, get }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn get<'a>(&self, record: &'a R) -> Option<&'a str> {
        (self.get)(record)
    }
}

impl<R> Clone for TextField<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for TextField<R> {}

impl<R> fmt::Debug for TextField<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TextField").field(&self.name).finish()
    }
}

/// Substring predicate ORed across a list of text fields
///
/// Matching is case-sensitive (`str::contains`).
pub struct TextFilter<R> {
    term: Option<String>,
    fields: Vec<TextField<R>>,
}

impl<R> TextFilter<R> {
    /// Build the predicate
    ///
    /// A missing, empty, or whitespace-only term accepts everything. Any other
    /// term is trimmed before matching.
    pub fn new(term: Option<&str>, fields: &[TextField<R>]) -> Self {
        let term = term
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);

        Self {
            term,
            fields: fields.to_vec(),
        }
    }

    /// Filter that accepts every record
    pub fn accept_all() -> Self {
        Self {
            term: None,
            fields: Vec::new(),
        }
    }

    pub fn term(&self) -> Option<&str> {
        self.term.as_deref()
    }

    pub fn is_accept_all(&self) -> bool {
        self.term.is_none()
    }

    pub fn matches(&self, record: &R) -> bool {
        let Some(term) = self.term.as_deref() else {
            return true;
        };

        self.fields
            .iter()
            .any(|field| field.get(record).is_some_and(|value| value.contains(term)))
    }
}

impl<R> fmt::Debug for TextFilter<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextFilter")
            .field("term", &self.term)
            .field("fields", &self.fields)
            .finish()
    }
}

/// Resource-specific filters parsed from the query string
///
/// Implementors are plain `Deserialize` structs extracted next to
/// [`RawQuery`](crate::core::query::RawQuery). Besides matching, they report
/// the parameters that were actually present so the continuation link can
/// carry them forward.
pub trait ScopeFilter<R>: Send + Sync {
    /// Whether `record` falls inside the scope
    fn matches(&self, record: &R) -> bool;

    /// Present parameters as `(name, value)` pairs, in declaration order
    fn query_pairs(&self) -> Vec<(&'static str, String)>;
}

/// No scope filters
#[derive(Debug, Clone, Copy, Default, serde::Deserialize)]
pub struct Unscoped {}

impl<R> ScopeFilter<R> for Unscoped {
    fn matches(&self, _record: &R) -> bool {
        true
    }

    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }
}

/// Scope filter AND text filter
pub struct RecordFilter<'a, R> {
    scope: &'a dyn ScopeFilter<R>,
    text: TextFilter<R>,
}

impl<'a, R> RecordFilter<'a, R> {
    pub fn new(scope: &'a dyn ScopeFilter<R>, text: TextFilter<R>) -> Self {
        Self { scope, text }
    }

    pub fn scope(&self) -> &dyn ScopeFilter<R> {
        self.scope
    }

    pub fn text(&self) -> &TextFilter<R> {
        &self.text
    }

    pub fn matches(&self, record: &R) -> bool {
        self.scope.matches(record) && self.text.matches(record)
    }
}
