use super::{TargetError, TargetResult};
use crate::config::TargetId;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Https,
    Http,
}

impl Scheme {
    pub fn as_str(self) -> &'static str {
        match self {
            Scheme::Https => "https",
            Scheme::Http => "http",
        }
    }
}

/// Canonicalizes a server address.
///
/// Returns `Ok(None)` when the input carries no `http://` or `https://`
/// scheme and no `default_scheme` was given, so the caller can retry with
/// one. Embedded whitespace and unparsable addresses are `InvalidInput`.
pub fn normalize(raw: &str, default_scheme: Option<Scheme>) -> TargetResult<Option<TargetId>> {
    let trimmed = raw.trim().trim_end_matches('/');

    if trimmed.chars().any(char::is_whitespace) {
        return Err(invalid(raw, "invalid whitespace in target url"));
    }

    let candidate = if has_http_scheme(trimmed) {
        trimmed.to_owned()
    } else {
        match default_scheme {
            Some(scheme) => format!("{}://{trimmed}", scheme.as_str()),
            None => return Ok(None),
        }
    };

    let url = Url::parse(&candidate).map_err(|err| invalid(raw, &err.to_string()))?;
    if url.host_str().is_none_or(str::is_empty) {
        return Err(invalid(raw, "missing host"));
    }

    // Special schemes always serialize with at least a "/" path.
    let canonical = url.as_str().trim_end_matches('/');
    Ok(Some(TargetId::from_canonical(canonical)))
}

/// Same as `normalize` with a scheme to fall back on, which always yields a
/// target on success.
pub fn normalize_with(raw: &str, scheme: Scheme) -> TargetResult<TargetId> {
    normalize(raw, Some(scheme))?.ok_or_else(|| invalid(raw, "missing host"))
}

fn has_http_scheme(value: &str) -> bool {
    let lower = value.get(..8).unwrap_or(value).to_ascii_lowercase();
    lower.starts_with("https://") || lower.starts_with("http://")
}

fn invalid(raw: &str, reason: &str) -> TargetError {
    TargetError::InvalidInput {
        input: raw.to_owned(),
        reason: reason.to_owned(),
    }
}
