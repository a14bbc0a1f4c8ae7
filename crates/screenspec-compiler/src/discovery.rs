//! Screen spec discovery.

use std::path::{Path, PathBuf};

use regex::Regex;
use walkdir::WalkDir;

use crate::error::{CompileError, Result};

/// Translate a file-name glob (`*`, `?`) into an anchored regex.
pub fn pattern_regex(pattern: &str) -> Result<Regex> {
    let mut source = String::from("^");
    for c in pattern.chars() {
        match c {
            '*' => source.push_str("[^/]*"),
            '?' => source.push_str("[^/]"),
            _ => source.push_str(&regex::escape(&c.to_string())),
        }
    }
    source.push('$');
    Regex::new(&source).map_err(|source| CompileError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

/// Find every file under `dir` whose name matches `pattern`, sorted by path.
///
/// A missing directory and an empty result are both errors.
pub fn discover(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(CompileError::MissingSpecsDir(dir.to_path_buf()));
    }
    let matcher = pattern_regex(pattern)?;

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).follow_links(true) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir).to_path_buf();
            CompileError::io(path, e.into())
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry
            .file_name()
            .to_str()
            .is_some_and(|name| matcher.is_match(name))
        {
            files.push(entry.into_path());
        }
    }

    if files.is_empty() {
        return Err(CompileError::NoScreens {
            dir: dir.to_path_buf(),
            pattern: pattern.to_string(),
        });
    }
    files.sort();
    tracing::debug!(dir = %dir.display(), count = files.len(), "discovered screen specs");
    Ok(files)
}
