//! Path handling (§4.3.1).
//!
//! Backslashes are preserved as literal characters, never interpreted as
//! separators. `..` components are preserved literally; this module does
//! not resolve parent references.

use crate::error::{Error, Result};

/// Collapse multiple `/`, strip leading/trailing `/`, and strip a single
/// leading `./`. The result never has a leading or trailing `/`.
pub fn normalize(p: &str) -> Result<String> {
    let mut p = p;
    if let Some(rest) = p.strip_prefix("./") {
        p = rest;
    }
    let collapsed: String = p
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/");
    Ok(collapsed)
}

/// Split a normalized path into `(parent_path, filename)` at the last `/`.
/// `parent_path` is `""` if there is no `/`.
pub fn split(p: &str) -> Result<(String, String)> {
    let normalized = normalize(p)?;
    if normalized.is_empty() {
        return Err(Error::InvalidPath("path is empty".into()));
    }
    match normalized.rsplit_once('/') {
        Some((parent, name)) => Ok((parent.to_string(), name.to_string())),
        None => Ok((String::new(), normalized)),
    }
}

/// Join path parts with a single `/`, then normalize.
pub fn join(parts: &[&str]) -> Result<String> {
    normalize(&parts.join("/"))
}

const VALID_EXTRA: &[char] = &['.', '_', '-', '&', '(', ')', '[', ']', ' '];

/// Accept a whitelisted character set: letters, digits, space,
/// `._-&()[]`, and Unicode letters. Applied per path component.
pub fn valid_name(s: &str) -> Result<()> {
    if s.is_empty() {
        return Err(Error::InvalidName(s.to_string()));
    }
    let ok = s
        .chars()
        .all(|c| c.is_alphanumeric() || VALID_EXTRA.contains(&c));
    if ok {
        Ok(())
    } else {
        Err(Error::InvalidName(s.to_string()))
    }
}

/// Apply [`valid_name`] to every `/`-separated component of a full path.
pub fn valid_path_components(p: &str) -> Result<()> {
    for component in p.split('/').filter(|c| !c.is_empty()) {
        valid_name(component)?;
    }
    Ok(())
}
