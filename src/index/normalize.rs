//! Canonicalization of documentation hrefs
//!
//! Turns the hrefs found on the symbol index page into stable relative paths
//! under the documentation root (`w/cpp/...`), rejecting everything that is
//! not a documentation page.

use crate::index::constants::{DOC_ROOT, EXCLUDED_PREFIXES, SITE_PREFIX};
use url::Url;

/// Normalize an href into a relative documentation path.
///
/// Returns `None` when the href is empty, a `mailto:` link, points into an
/// excluded namespace or resolves outside the documentation root.
pub fn normalize_href(href: &str) -> Option<String> {
    let href = href.split_once('#').map_or(href, |(head, _)| head).trim();
    if href.is_empty() || href.starts_with("mailto:") {
        return None;
    }

    let path = if href.starts_with("http://") || href.starts_with("https://") {
        Url::parse(href).ok()?.path().to_string()
    } else {
        href.to_string()
    };

    if EXCLUDED_PREFIXES
        .iter()
        .any(|prefix| path.starts_with(prefix))
    {
        return None;
    }

    let rooted = if path.starts_with('/') {
        path
    } else if path.starts_with(SITE_PREFIX) {
        format!("/{path}")
    } else {
        format!("{DOC_ROOT}{path}")
    };

    let canonical = collapse_segments(&rooted);
    if !canonical.starts_with(DOC_ROOT) {
        return None;
    }

    Some(canonical.trim_start_matches('/').to_string())
}

/// Whether a stored url would be produced unchanged by [`normalize_href`]
pub fn is_canonical(url: &str) -> bool {
    normalize_href(url).as_deref() == Some(url)
}

/// Collapse `.` and `..` segments and repeated separators of an absolute path.
/// `..` never climbs above the root.
fn collapse_segments(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    format!("/{}", segments.join("/"))
}
