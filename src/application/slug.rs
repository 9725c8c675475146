//! Tenant slug generation and collision resolution.
//!
//! Slugs double as subdomain labels, so they are restricted to `a-z0-9-`
//! and to a single DNS label's length.

use std::future::Future;

use crate::app_error::{AppError, AppResult};
use crate::application::helpers::host_parsing::MAX_LABEL_LEN;

/// Normalize a display name into a URL-safe slug.
///
/// Lowercases and trims, turns every character outside `a-z0-9` (whitespace,
/// quotes, punctuation, non-ASCII) into a hyphen, collapses hyphen runs and
/// strips hyphens at both ends. Returns an empty string when nothing is left;
/// callers treat that as an invalid name.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut prev_dash = false;
    for ch in name.to_lowercase().trim().chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            slug.push(ch);
            prev_dash = false;
        } else if !prev_dash {
            slug.push('-');
            prev_dash = true;
        }
    }
    let trimmed = slug.trim_matches('-');
    let truncated: String = trimmed.chars().take(MAX_LABEL_LEN).collect();
    truncated.trim_end_matches('-').to_string()
}

/// Append `-{suffix}` to `base`, shortening `base` so the result still fits in one label.
/// Returns `None` if no part of `base` would survive.
pub fn with_suffix(base: &str, suffix: usize) -> Option<String> {
    let suffix = format!("-{suffix}");
    if suffix.len() >= MAX_LABEL_LEN {
        return None;
    }
    let allowed = MAX_LABEL_LEN - suffix.len();
    let base_part: String = base.chars().take(allowed).collect();
    let base_part = base_part.trim_end_matches('-');
    if base_part.is_empty() {
        return None;
    }
    Some(format!("{base_part}{suffix}"))
}

/// Find the first free slug among `base`, `base-2`, `base-3`, ...
///
/// `exists` reports whether a candidate is taken. Gives up with a conflict after
/// `max_attempts` candidates. The check is not atomic with the later insert; the
/// storage unique constraint is what finally rejects a concurrent duplicate.
pub async fn resolve_unique_slug<F, Fut>(
    base: &str,
    max_attempts: usize,
    mut exists: F,
) -> AppResult<String>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = AppResult<bool>>,
{
    let mut counter = 1;
    while counter <= max_attempts {
        let candidate = if counter == 1 {
            base.to_string()
        } else {
            with_suffix(base, counter).ok_or_else(slug_unavailable)?
        };

        if !exists(candidate.clone()).await? {
            return Ok(candidate);
        }
        counter += 1;
    }

    tracing::warn!(base, max_attempts, "Slug candidates exhausted");
    Err(slug_unavailable())
}

fn slug_unavailable() -> AppError {
    AppError::Conflict("A tenant with this name already exists".into())
}
