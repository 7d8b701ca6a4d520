//! Proxy list normalizer
//!
//! Rewrites a proxy list file in place so that every line carries an explicit
//! scheme. Lines without `http://` or `https://` get `http://` prepended.

use crate::Result;
use anyhow::Context;
use std::fs;
use std::path::Path;

/// Scheme added to lines that do not already carry one
pub const DEFAULT_SCHEME_PREFIX: &str = "http://";

/// Default proxy list file
pub const DEFAULT_PROXY_FILE: &str = "http.txt";

/// Outcome of normalizing a file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeSummary {
    /// Lines written back
    pub lines: usize,
    /// Lines that received the default prefix
    pub prefixed: usize,
}

/// Normalizer for proxy list files
pub struct ProxyNormalizer;

impl ProxyNormalizer {
    /// Normalize a single line
    ///
    /// Blank lines come back empty, without a prefix.
    pub fn normalize_line(line: &str) -> String {
        let line = line.trim();
        if line.is_empty() || line.starts_with("http://") || line.starts_with("https://") {
            line.to_string()
        } else {
            format!("{}{}", DEFAULT_SCHEME_PREFIX, line)
        }
    }

    /// Normalize the full contents of a proxy list
    ///
    /// Blank lines inside the list are kept; the blank run at the end is dropped.
    pub fn normalize_content(content: &str) -> (String, NormalizeSummary) {
        let mut lines: Vec<&str> = content.lines().collect();
        while lines.last().is_some_and(|line| line.trim().is_empty()) {
            lines.pop();
        }

        let mut output = String::with_capacity(content.len());
        let mut summary = NormalizeSummary::default();

        for line in lines {
            let normalized = Self::normalize_line(line);
            if normalized.len() != line.trim().len() {
                summary.prefixed += 1;
            }
            summary.lines += 1;
            output.push_str(&normalized);
            output.push('\n');
        }

        (output, summary)
    }

    /// Normalize a proxy list file, overwriting it
    ///
    /// The whole file is read before anything is written back.
    pub fn normalize_file<P: AsRef<Path>>(path: P) -> Result<NormalizeSummary> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;

        let (output, summary) = Self::normalize_content(&content);

        fs::write(path, output).with_context(|| format!("failed to write {}", path.display()))?;

        log::debug!(
            "{}: {} lines, {} prefixed",
            path.display(),
            summary.lines,
            summary.prefixed
        );
        log::info!(
            "Updated {} with '{}' prefix where needed.",
            path.display(),
            DEFAULT_SCHEME_PREFIX
        );

        Ok(summary)
    }
}
