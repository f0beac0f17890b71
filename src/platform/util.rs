use std::sync::LazyLock;

use anyhow::Context;
use regex::Regex;
use url::Url;

use super::PlatformError;

static HANDLE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_.\-]{1,64}$")
        .context("Failed to create handle regex")
        .unwrap()
});

pub fn problem_url(base: &Url, title_slug: &str) -> Result<Url, PlatformError> {
    base.join(title_slug)
        .map_err(|e| PlatformError::ParsingError(format!("Invalid problem slug {}: {}", title_slug, e)))
}

pub fn validate_handle(handle: &str) -> bool {
    HANDLE_REGEX.is_match(handle)
}

// Site sections whose links are not profiles.
const RESERVED_PATHS: [&str; 18] = [
    "accounts",
    "assessment",
    "company",
    "contest",
    "discuss",
    "explore",
    "interview",
    "jobs",
    "list",
    "playground",
    "problems",
    "problemset",
    "profile",
    "store",
    "studyplan",
    "submissions",
    "subscribe",
    "tag",
];

fn handle_from_profile_link<'a>(cleaned: &str, path: &'a str) -> Result<&'a str, PlatformError> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let mut segments = path.split('/').filter(|segment| !segment.is_empty());

    match segments.next() {
        Some("u") => Ok(segments.next().unwrap_or_default()),
        Some(first) if RESERVED_PATHS.contains(&first.to_lowercase().as_str()) => Err(
            PlatformError::InvalidHandle(format!("{} is not a profile link", cleaned)),
        ),
        Some(first) => Ok(first),
        None => Ok(""),
    }
}

/// Accepts a bare handle, `@handle`, or a profile link such as
/// `https://leetcode.com/u/handle/`.
pub fn process_handle(input: &str) -> Result<String, PlatformError> {
    let cleaned = input.trim();

    let handle = match cleaned.split_once("leetcode.com/") {
        Some((_, path)) => handle_from_profile_link(cleaned, path)?,
        None => cleaned.trim_start_matches('@'),
    };

    let handle = handle.trim();

    if handle.is_empty() {
        return Err(PlatformError::InvalidHandle("Handle cannot be empty".into()));
    }

    if !validate_handle(handle) {
        return Err(PlatformError::InvalidHandle(format!("{} is not a valid handle", handle)));
    }

    Ok(handle.to_string())
}
