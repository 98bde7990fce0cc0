//! Vehicle identity derived from the detail-page link.
//!
//! The catalog has no explicit key column; the last path segment of the model's
//! detail URL is the only stable identifier, so a row without a link has no identity.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use url::Url;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentityError {
    #[error("Detail link is empty")]
    EmptyLink,

    #[error("Detail link '{href}' has no final path segment")]
    EmptySegment { href: String },

    #[error("Cannot resolve '{href}' against base '{base_url}': {reason}")]
    Unresolvable {
        href: String,
        base_url: String,
        reason: String,
    },
}

/// Normalized detail URL together with the id taken from it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailLink {
    pub url: String,
    pub id: String,
}

impl DetailLink {
    /// Normalize `href` and derive the vehicle id.
    ///
    /// Everything from the first `#` is dropped, scheme-less links are prefixed
    /// with `base_url`, and the id is the last `/`-separated segment. The href
    /// text is never percent-encoded, so a relative and an absolute link to the
    /// same page yield the same id.
    pub fn resolve(href: &str, base_url: &str) -> Result<Self, IdentityError> {
        let without_fragment = strip_fragment(href.trim());
        if without_fragment.is_empty() {
            return Err(IdentityError::EmptyLink);
        }

        let url = if is_absolute(without_fragment) {
            without_fragment.to_string()
        } else {
            join_with_base(without_fragment, base_url)?
        };

        let id = last_segment(&url);
        if id.is_empty() {
            return Err(IdentityError::EmptySegment {
                href: href.to_string(),
            });
        }

        Ok(Self {
            id: id.to_string(),
            url,
        })
    }
}

impl fmt::Display for DetailLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.id, self.url)
    }
}

pub fn strip_fragment(href: &str) -> &str {
    href.split('#').next().unwrap_or_default()
}

/// Final `/`-delimited segment of a URL string
pub fn last_segment(url: &str) -> &str {
    url.rsplit('/').next().unwrap_or_default()
}

fn is_absolute(href: &str) -> bool {
    Url::parse(href).is_ok_and(|u| !u.cannot_be_a_base())
}

/// Prefix a scheme-less `href` with the base origin, keeping the href text as written
fn join_with_base(href: &str, base_url: &str) -> Result<String, IdentityError> {
    if let Err(e) = Url::parse(base_url) {
        return Err(IdentityError::Unresolvable {
            href: href.to_string(),
            base_url: base_url.to_string(),
            reason: format!("invalid base URL: {e}"),
        });
    }

    let base = base_url.trim_end_matches('/');
    if href.starts_with('/') {
        Ok(format!("{base}{href}"))
    } else {
        Ok(format!("{base}/{href}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://vnexpress.net";

    #[test]
    fn test_fragment_is_ignored() {
        let a = DetailLink::resolve("https://site/models/abc-123#spec", BASE).unwrap();
        let b = DetailLink::resolve("https://site/models/abc-123#gia-xe", BASE).unwrap();
        assert_eq!(a.id, "abc-123");
        assert_eq!(a, b);
        assert_eq!(a.url, "https://site/models/abc-123");
    }

    #[test]
    fn test_relative_link_gets_base_origin() {
        let link = DetailLink::resolve("/oto-xe-may/v-moto/honda-vision#thong-so", BASE).unwrap();
        assert_eq!(link.url, "https://vnexpress.net/oto-xe-may/v-moto/honda-vision");
        assert_eq!(link.id, "honda-vision");
        assert!(link.url.starts_with(BASE));
    }

    #[test]
    fn test_path_relative_link_is_joined() {
        let link = DetailLink::resolve("xe/yamaha-exciter", BASE).unwrap();
        assert_eq!(link.url, "https://vnexpress.net/xe/yamaha-exciter");
        assert_eq!(link.id, "yamaha-exciter");
    }

    #[test]
    fn test_empty_links_are_rejected() {
        assert_eq!(DetailLink::resolve("", BASE), Err(IdentityError::EmptyLink));
        assert_eq!(DetailLink::resolve("#top", BASE), Err(IdentityError::EmptyLink));
        assert!(matches!(
            DetailLink::resolve("https://vnexpress.net/xe/", BASE),
            Err(IdentityError::EmptySegment { .. })
        ));
    }

    #[test]
    fn test_invalid_base_is_reported() {
        let result = DetailLink::resolve("/xe/abc", "not a url");
        assert!(matches!(result, Err(IdentityError::Unresolvable { .. })));
    }

    #[test]
    fn test_relative_and_absolute_links_share_identity() {
        let relative = DetailLink::resolve("/xe/honda-việt mới#gia", BASE).unwrap();
        let absolute = DetailLink::resolve("https://vnexpress.net/xe/honda-việt mới", BASE).unwrap();
        assert_eq!(relative.id, "honda-việt mới");
        assert_eq!(relative, absolute);
    }

    #[test]
    fn test_trailing_slash_on_base() {
        let link = DetailLink::resolve("/xe/lead", "https://vnexpress.net/").unwrap();
        assert_eq!(link.url, "https://vnexpress.net/xe/lead");
    }

    #[test]
    fn test_segment_helpers() {
        assert_eq!(strip_fragment("a/b#c#d"), "a/b");
        assert_eq!(last_segment("https://site/models/abc-123"), "abc-123");
        assert_eq!(last_segment("abc"), "abc");
    }
}
