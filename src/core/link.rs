//! Continuation links
//!
//! A [`LinkTarget`] is the absolute URL a request arrived on (scheme, host,
//! path; no query). [`next_link`] appends the parameters for the following
//! page, written in the same addressing convention the caller used, plus every
//! scope/search/sort parameter of the current request.

use axum::extract::{FromRequestParts, OriginalUri};
use axum::http::request::Parts;
use axum::http::{HeaderMap, header};
use url::Url;

use crate::core::error::{ListingError, RequestError};
use crate::core::query::{Addressing, NormalizedQuery, RawQuery};

/// Absolute base URL for continuation links
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkTarget {
    base: Url,
}

impl LinkTarget {
    /// Build from the pieces of an incoming request
    ///
    /// `scheme` must be `http` or `https` in any case. `host` is a bare `host[:port]`;
    /// anything that would carry a path, query, fragment or userinfo into the
    /// link is rejected.
    pub fn new(scheme: &str, host: &str, path: &str) -> Result<Self, RequestError> {
        let scheme = scheme.to_ascii_lowercase();
        if !matches!(scheme.as_str(), "http" | "https") {
            return Err(RequestError::InvalidLinkTarget {
                message: format!("unsupported scheme '{}'", scheme),
            });
        }
        if host
            .chars()
            .any(|c| matches!(c, '/' | '?' | '#' | '@' | '\\') || c.is_whitespace())
        {
            return Err(RequestError::InvalidLinkTarget {
                message: format!("'{}' is not a valid host", host),
            });
        }

        let mut base = parse_absolute(&format!("{}://{}", scheme, host))?;
        base.set_path(path);
        base.set_query(None);
        base.set_fragment(None);
        Ok(Self { base })
    }

    /// Build from an absolute URL; any query or fragment is dropped
    pub fn parse(url: &str) -> Result<Self, RequestError> {
        let mut base = parse_absolute(url)?;
        base.set_query(None);
        base.set_fragment(None);
        Ok(Self { base })
    }

    /// Move this target under a public origin
    ///
    /// Keeps the request path and prefixes it with `public`'s own path, so a
    /// service mounted at `https://api.example.com/collab` produces
    /// `https://api.example.com/collab/api/v1/venues?...`.
    pub fn rebase(&self, public: &Url) -> Self {
        let mut base = public.clone();
        let prefix = public.path().trim_end_matches('/');
        base.set_path(&format!("{}{}", prefix, self.base.path()));
        base.set_query(None);
        base.set_fragment(None);
        Self { base }
    }

    pub fn as_url(&self) -> &Url {
        &self.base
    }

    pub fn path(&self) -> &str {
        self.base.path()
    }
}

fn parse_absolute(raw: &str) -> Result<Url, RequestError> {
    let url = Url::parse(raw).map_err(|e| RequestError::InvalidLinkTarget {
        message: format!("'{}': {}", raw, e),
    })?;

    if url.cannot_be_a_base() || url.host_str().is_none_or(str::is_empty) {
        return Err(RequestError::InvalidLinkTarget {
            message: format!("'{}' has no host", raw),
        });
    }

    Ok(url)
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

impl<S> FromRequestParts<S> for LinkTarget
where
    S: Send + Sync,
{
    type Rejection = ListingError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let uri = parts
            .extensions
            .get::<OriginalUri>()
            .map(|original| &original.0)
            .unwrap_or(&parts.uri);

        let scheme = header_str(&parts.headers, "x-forwarded-proto")
            .or_else(|| uri.scheme_str())
            .unwrap_or("http");

        let host = header_str(&parts.headers, "x-forwarded-host")
            .or_else(|| header_str(&parts.headers, header::HOST.as_str()))
            .or_else(|| uri.authority().map(|a| a.as_str()))
            .unwrap_or("localhost");

        Ok(LinkTarget::new(scheme, host, uri.path())?)
    }
}

/// Query parameters of the page after `query`, in link order
///
/// Order: addressing pair, scope filters, `q`, `sortBy`, `sortDir`.
pub fn next_query_pairs(
    query: &NormalizedQuery,
    raw: &RawQuery,
    scope: Vec<(&'static str, String)>,
) -> Vec<(&'static str, String)> {
    let mut pairs = Vec::with_capacity(scope.len() + 5);

    match query.addressing {
        Addressing::Page { page, page_size } => {
            pairs.push(("page", page.saturating_add(1).to_string()));
            pairs.push(("pageSize", page_size.to_string()));
        }
        Addressing::Offset { skip, limit } => {
            pairs.push(("skip", skip.saturating_add(limit).to_string()));
            pairs.push(("limit", limit.to_string()));
        }
    }

    pairs.extend(scope);

    if let Some(q) = &raw.q {
        pairs.push(("q", q.clone()));
    }

    if let Some(sort_by) = &query.sort_by {
        pairs.push(("sortBy", sort_by.clone()));
    }

    match &raw.sort_dir {
        Some(dir) => pairs.push(("sortDir", dir.clone())),
        None if query.sort_by.is_some() => {
            pairs.push(("sortDir", query.sort_dir.as_str().to_string()))
        }
        None => {}
    }

    pairs
}

/// Absolute URL of the page after `query`
pub fn next_link(
    target: &LinkTarget,
    query: &NormalizedQuery,
    raw: &RawQuery,
    scope: Vec<(&'static str, String)>,
) -> String {
    let mut url = target.base.clone();
    {
        let mut serializer = url.query_pairs_mut();
        for (name, value) in next_query_pairs(query, raw, scope) {
            serializer.append_pair(name, &value);
        }
    }
    url.into()
}
