//! Field sort resolution
//!
//! Clients name a sort field with a free-form string. That string is only ever
//! matched against a fixed allow-list of [`SortField`]s declared by the
//! resource; it is never used to reach into a record's structure. Unknown names
//! degrade to an unsorted result instead of failing the request.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    #[serde(alias = "asc")]
    Ascending,
    #[serde(alias = "desc")]
    Descending,
}

impl SortDirection {
    /// Parse a direction token
    ///
    /// `desc` in any letter case selects descending; everything else is
    /// ascending.
    pub fn parse(token: &str) -> Self {
        if token.eq_ignore_ascii_case("desc") {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        }
    }

    /// The query-string token for this direction
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }

    fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort applied when a request does not name one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultSort {
    pub field: String,
    pub direction: SortDirection,
}

impl DefaultSort {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }
}

/// A publicly sortable attribute of `R`
///
/// # Example
/// ```rust,ignore
/// SortField::new("Name", |a: &Venue, b: &Venue| a.name.cmp(&b.name))
/// ```
pub struct SortField<R> {
    name: &'static str,
    compare: fn(&R, &R) -> Ordering,
}

impl<R> SortField<R> {
    pub const fn new(name: &'static str, compare: fn(&R, &R) -> Ordering) -> Self {
        Self { name, compare }
    }

    /// Public attribute name, as documented for clients
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Case-insensitive name match
    pub fn matches(&self, requested: &str) -> bool {
        self.name.eq_ignore_ascii_case(requested)
    }

    pub fn compare(&self, a: &R, b: &R) -> Ordering {
        (self.compare)(a, b)
    }
}

// Manual impls: a derive would require `R: Clone`.
impl<R> Clone for SortField<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for SortField<R> {}

impl<R> fmt::Debug for SortField<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SortField").field(&self.name).finish()
    }
}

/// Resolved ordering over `R`
pub enum SortOrder<R> {
    /// Keep the backing collection's own order
    Unsorted,

    /// Order by the tie-break key alone (requested field was unknown)
    TieBreak(SortField<R>),

    /// Order by a requested field, then by the optional tie-break key
    ///
    /// The tie-break key always runs ascending so page boundaries are stable
    /// whichever direction the primary key runs.
    Field {
        field: SortField<R>,
        direction: SortDirection,
        tie_break: Option<SortField<R>>,
    },
}

impl<R> SortOrder<R> {
    /// Resolve a client-supplied field name against an allow-list
    pub fn resolve(
        allowed: &[SortField<R>],
        sort_by: Option<&str>,
        direction: SortDirection,
        tie_break: Option<SortField<R>>,
    ) -> Self {
        let requested = sort_by.map(str::trim).filter(|name| !name.is_empty());
        let field = requested.and_then(|name| allowed.iter().find(|f| f.matches(name)).copied());

        match (field, tie_break) {
            (Some(field), tie_break) => SortOrder::Field {
                field,
                direction,
                tie_break,
            },
            (None, Some(tie_break)) => SortOrder::TieBreak(tie_break),
            (None, None) => SortOrder::Unsorted,
        }
    }

    pub fn is_unsorted(&self) -> bool {
        matches!(self, SortOrder::Unsorted)
    }

    /// Name of the primary key, if any
    pub fn field_name(&self) -> Option<&'static str> {
        match self {
            SortOrder::Unsorted => None,
            SortOrder::TieBreak(field) => Some(field.name()),
            SortOrder::Field { field, .. } => Some(field.name()),
        }
    }

    pub fn compare(&self, a: &R, b: &R) -> Ordering {
        match self {
            SortOrder::Unsorted => Ordering::Equal,
            SortOrder::TieBreak(field) => field.compare(a, b),
            SortOrder::Field {
                field,
                direction,
                tie_break,
            } => direction.apply(field.compare(a, b)).then_with(|| {
                tie_break
                    .map(|t| t.compare(a, b))
                    .unwrap_or(Ordering::Equal)
            }),
        }
    }

    /// Sort a buffer in place (stable)
    pub fn sort(&self, records: &mut [R]) {
        if !self.is_unsorted() {
            records.sort_by(|a, b| self.compare(a, b));
        }
    }
}

impl<R> Clone for SortOrder<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for SortOrder<R> {}

impl<R> fmt::Debug for SortOrder<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Unsorted => f.write_str("Unsorted"),
            SortOrder::TieBreak(field) => f.debug_tuple("TieBreak").field(field).finish(),
            SortOrder::Field {
                field,
                direction,
                tie_break,
            } => f
                .debug_struct("Field")
                .field("field", field)
                .field("direction", direction)
                .field("tie_break", tie_break)
                .finish(),
        }
    }
}

/// Compare optional values with `None` first
pub fn cmp_option<T: Ord>(a: &Option<T>, b: &Option<T>) -> Ordering {
    a.cmp(b)
}

/// Compare text with embedded numbers by value ("R2" < "R11")
///
/// Digit runs compare numerically, everything else by `char`. Strings that
/// only differ in leading zeros fall back to plain ordinal order so the
/// ordering stays total.
pub fn cmp_natural(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();

    loop {
        match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) if x.is_ascii_digit() && y.is_ascii_digit() => {
                let x_run = take_digits(&mut left);
                let y_run = take_digits(&mut right);
                let x_trim = x_run.trim_start_matches('0');
                let y_trim = y_run.trim_start_matches('0');
                let ordering = x_trim
                    .len()
                    .cmp(&y_trim.len())
                    .then_with(|| x_trim.cmp(y_trim));
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
            (Some(x), Some(y)) => {
                if x != y {
                    return x.cmp(&y);
                }
                left.next();
                right.next();
            }
        }
    }
}

fn take_digits(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(c) = chars.next_if(char::is_ascii_digit) {
        run.push(c);
    }
    run
}

/// [`cmp_natural`] over optional text, `None` first
pub fn cmp_option_natural(a: &Option<String>, b: &Option<String>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => cmp_natural(x, y),
    }
}

/// Compare optional floats with `None` first, using IEEE total order
pub fn cmp_option_f64(a: &Option<f64>, b: &Option<f64>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => x.total_cmp(y),
    }
}
