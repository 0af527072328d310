//! Loading key sets from text files.
//!
//! One dotted-quad IPv4 address per line. Surrounding whitespace is trimmed,
//! blank lines and lines starting with `#` are skipped. Lines are read as
//! bytes, so a non-UTF-8 address line is reported with its line number.

use std::io::BufRead;
use std::path::Path;

use crate::engine::Key;
use crate::error::{InputError, Ipv4Error};
use crate::ipv4::{format_ipv4, parse_ipv4};

/// Parse keys from a line-oriented reader.
///
/// Stops at the first malformed line and reports its 1-based line number.
/// An input with no addresses yields an empty vector.
pub fn parse_keys<R: BufRead>(reader: R) -> crate::Result<Vec<Key>> {
    let mut keys = Vec::with_capacity(1024);
    let mut skipped = 0usize;

    for (idx, raw) in reader.split(b'\n').enumerate() {
        let raw = raw?;
        let trimmed = raw.trim_ascii();
        if trimmed.is_empty() || trimmed.starts_with(b"#") {
            skipped += 1;
            continue;
        }

        let line = idx + 1;
        let text = std::str::from_utf8(trimmed).map_err(|_| InputError::Line {
            line,
            source: Ipv4Error::NotUtf8(String::from_utf8_lossy(trimmed).into_owned()),
        })?;
        let key = parse_ipv4(text).map_err(|source| InputError::Line { line, source })?;
        keys.push(key);
    }

    tracing::debug!(keys = keys.len(), skipped, "Parsed key input");
    Ok(keys)
}

/// Read every key from the file at `path`.
///
/// Fails with [`InputError::NoKeys`] when the file holds no addresses.
pub fn load_keys(path: &Path) -> crate::Result<Vec<Key>> {
    let file = std::fs::File::open(path).map_err(|source| InputError::Open {
        path: path.display().to_string(),
        source,
    })?;

    let keys = parse_keys(std::io::BufReader::new(file))?;
    let (Some(&first), Some(&last)) = (keys.first(), keys.last()) else {
        return Err(InputError::NoKeys(path.display().to_string()).into());
    };

    tracing::info!(
        path = %path.display(),
        keys = keys.len(),
        first = %format_ipv4(first),
        last = %format_ipv4(last),
        "Loaded keys"
    );
    Ok(keys)
}
