// Cookie resolution: a --cookie value may be a literal cookie string or a
// path to a file holding one. Everything downstream only ever sees a literal.

use std::fs;
use std::path::Path;

use crate::error::{Result, VgetError};

/// Resolve a cookie flag value into a literal cookie string.
///
/// An empty value means no cookie is configured and is returned unchanged.
/// If the value names an existing filesystem entry, the file's contents are
/// read and returned with surrounding whitespace stripped. Any other value
/// is already a literal cookie string.
///
/// A read error on an existing path is fatal for the whole run: the cookie
/// is part of the shared network identity, so it must be resolved before
/// any target is processed.
pub fn resolve_cookie(value: &str) -> Result<String> {
    if value.is_empty() {
        return Ok(value.to_string());
    }

    let path = Path::new(value);
    if path.exists() {
        let data = fs::read_to_string(path)
            .map_err(|e| VgetError::cookie_file(format!("{}: {}", value, e)))?;
        return Ok(data.trim().to_string());
    }

    Ok(value.to_string())
}
