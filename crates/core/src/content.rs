//! Validation helpers for published content: stories, events, urgent-need
//! micro-pages, slideshow slides and media items.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

/// Maximum length for titles and names.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum length for long-form bodies (story text, descriptions).
pub const MAX_BODY_LENGTH: usize = 50_000;

/// Maximum slug length.
pub const MAX_SLUG_LENGTH: usize = 120;

pub const MEDIA_IMAGE: &str = "image";
pub const MEDIA_VIDEO: &str = "video";

/// All valid media item types.
pub const VALID_MEDIA_TYPES: &[&str] = &[MEDIA_IMAGE, MEDIA_VIDEO];

/// Lowercase ASCII words separated by single hyphens.
static SLUG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("valid slug regex"));

/// Derive a URL slug from a title: lowercase, runs of non-alphanumerics
/// collapsed to a single hyphen, trimmed at both ends.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;

    for ch in title.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    slug.truncate(MAX_SLUG_LENGTH);
    slug.trim_end_matches('-').to_string()
}

pub fn validate_slug(slug: &str) -> Result<(), CoreError> {
    if slug.len() > MAX_SLUG_LENGTH {
        return Err(CoreError::Validation(format!(
            "Slug must be at most {MAX_SLUG_LENGTH} characters"
        )));
    }
    if !SLUG_RE.is_match(slug) {
        return Err(CoreError::Validation(format!(
            "Invalid slug '{slug}'. Use lowercase letters, digits and single hyphens"
        )));
    }
    Ok(())
}

/// Use the explicit slug when one is given, otherwise derive it from the
/// title. Either way the result must be a valid slug.
pub fn resolve_slug(explicit: Option<&str>, title: &str) -> Result<String, CoreError> {
    let slug = match explicit.map(str::trim).filter(|s| !s.is_empty()) {
        Some(given) => given.to_string(),
        None => slugify(title),
    };
    validate_slug(&slug)?;
    Ok(slug)
}

/// Validate a required short text field (title, name).
pub fn validate_title(field: &str, value: &str) -> Result<(), CoreError> {
    validate_required(field, value, MAX_TITLE_LENGTH)
}

/// Validate a required long-form text field.
pub fn validate_body(field: &str, value: &str) -> Result<(), CoreError> {
    validate_required(field, value, MAX_BODY_LENGTH)
}

/// Validate that a trimmed value is non-empty and within `max_len` characters.
pub fn validate_required(field: &str, value: &str, max_len: usize) -> Result<(), CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    if trimmed.chars().count() > max_len {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {max_len} characters"
        )));
    }
    Ok(())
}

/// Validate that a link points at an `http(s)` URL or a site-relative path.
pub fn validate_url(field: &str, url: &str) -> Result<(), CoreError> {
    let ok = url.starts_with("https://") || url.starts_with("http://") || url.starts_with('/');
    if !ok || url.chars().any(char::is_whitespace) {
        return Err(CoreError::Validation(format!(
            "{field} must be an http(s) URL or a site-relative path"
        )));
    }
    Ok(())
}

pub fn validate_media_type(media_type: &str) -> Result<(), CoreError> {
    if VALID_MEDIA_TYPES.contains(&media_type) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid media type '{media_type}'. Must be one of: {VALID_MEDIA_TYPES:?}"
        )))
    }
}
