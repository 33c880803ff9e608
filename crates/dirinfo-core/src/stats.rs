//! Aggregate statistics produced by a scan.

use std::collections::HashMap;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use compact_str::{CompactString, format_compact};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::error::ScanWarning;

/// Label for files without an extension.
pub const NO_EXTENSION: &str = "(no extension)";

/// Classify a file name by extension.
///
/// Uses the final-dot rule of [`Path::extension`]: a leading dot alone does
/// not start an extension, so `.gitignore` and `README` have none, while
/// `archive.tar.gz` is `.gz`. A trailing dot (`name.`) yields `.`.
pub fn extension_label(name: impl AsRef<OsStr>) -> CompactString {
    match Path::new(name.as_ref()).extension() {
        Some(ext) => format_compact!(".{}", ext.to_string_lossy().to_lowercase()),
        None => CompactString::new(NO_EXTENSION),
    }
}

/// A statistic together with the warnings raised while computing it.
///
/// An empty warning list means the value covers the whole tree; otherwise the
/// value only reflects the subtrees that could be read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scanned<T> {
    /// The computed value.
    pub value: T,
    /// Subtrees that were skipped.
    pub warnings: Vec<ScanWarning>,
}

impl<T> Scanned<T> {
    /// Wrap a value with the warnings collected for it.
    pub fn new(value: T, warnings: Vec<ScanWarning>) -> Self {
        Self { value, warnings }
    }

    /// A value computed without any skipped subtree.
    pub fn complete(value: T) -> Self {
        Self {
            value,
            warnings: Vec::new(),
        }
    }

    /// Whether every subtree was read.
    pub fn is_complete(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Transform the value, keeping the warnings.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Scanned<U> {
        Scanned {
            value: f(self.value),
            warnings: self.warnings,
        }
    }

    /// Split into value and warnings.
    pub fn into_parts(self) -> (T, Vec<ScanWarning>) {
        (self.value, self.warnings)
    }
}

/// One ranked histogram entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtensionStat {
    /// 1-based rank.
    pub rank: usize,
    /// Normalized extension label.
    pub extension: CompactString,
    /// Number of files with this extension.
    pub count: u64,
    /// Share of all files, in percent.
    pub percentage: f64,
}

/// Frequency of files per normalized extension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionHistogram {
    counts: HashMap<CompactString, u64>,
}

impl ExtensionHistogram {
    /// Create an empty histogram.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one file by its name.
    pub fn record(&mut self, file_name: impl AsRef<OsStr>) {
        *self.counts.entry(extension_label(file_name)).or_insert(0) += 1;
    }

    /// Count for a label, zero if absent.
    pub fn count(&self, extension: &str) -> u64 {
        self.counts.get(extension).copied().unwrap_or(0)
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Number of distinct labels.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether no file was recorded.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Every entry, ranked by count descending then label ascending.
    pub fn ranked(&self) -> Vec<ExtensionStat> {
        let total = self.total();
        self.counts
            .iter()
            .sorted_by(|(a_ext, a_count), (b_ext, b_count)| {
                b_count.cmp(a_count).then_with(|| a_ext.cmp(b_ext))
            })
            .enumerate()
            .map(|(i, (ext, &count))| ExtensionStat {
                rank: i + 1,
                extension: ext.clone(),
                count,
                percentage: percentage(count, total),
            })
            .collect()
    }

    /// The `n` most frequent entries.
    ///
    /// Percentages are shares of the whole histogram, not of the returned slice.
    pub fn top(&self, n: usize) -> Vec<ExtensionStat> {
        let mut ranked = self.ranked();
        ranked.truncate(n);
        ranked
    }
}

impl<S: AsRef<OsStr>> FromIterator<S> for ExtensionHistogram {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut histogram = Self::new();
        for name in iter {
            histogram.record(name);
        }
        histogram
    }
}

/// Percentage of `count` within `total`; zero when `total` is zero.
pub fn percentage(count: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

/// Counts for one immediate child directory of the scan root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubfolderEntry {
    /// Directory name.
    pub name: CompactString,
    /// Full path.
    pub path: PathBuf,
    /// Files anywhere beneath it.
    pub file_count: u64,
    /// Bytes of all files beneath it.
    pub size: u64,
}

/// Full result of analyzing a scan root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryReport {
    /// Root path that was analyzed.
    pub root: PathBuf,
    /// Files beneath the root.
    pub total_files: u64,
    /// Bytes beneath the root.
    pub total_size: u64,
    /// Per-extension counts.
    pub histogram: ExtensionHistogram,
    /// Highest ranked extensions.
    pub top_extensions: Vec<ExtensionStat>,
    /// Immediate subfolders, sorted by name.
    pub subfolders: Vec<SubfolderEntry>,
    /// Every subtree skipped while scanning.
    pub warnings: Vec<ScanWarning>,
}

impl DirectoryReport {
    /// Whether any subtree was skipped.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_label_final_dot() {
        assert_eq!(extension_label("archive.tar.gz"), ".gz");
        assert_eq!(extension_label("Photo.JPG"), ".jpg");
        assert_eq!(extension_label("main.rs"), ".rs");
    }

    #[test]
    fn test_extension_label_none() {
        assert_eq!(extension_label("README"), NO_EXTENSION);
        assert_eq!(extension_label(".gitignore"), NO_EXTENSION);
    }

    #[test]
    fn test_extension_label_trailing_dot() {
        assert_eq!(extension_label("name."), ".");
    }

    #[test]
    fn test_scanned_completeness() {
        let full = Scanned::complete(3u64);
        assert!(full.is_complete());

        let partial = Scanned::new(1u64, vec![ScanWarning::permission_denied("/x")]);
        assert!(!partial.is_complete());
        let doubled = partial.map(|v| v * 2);
        assert_eq!(doubled.value, 2);
        assert_eq!(doubled.warnings.len(), 1);
    }

    #[test]
    fn test_percentage_zero_total() {
        assert_eq!(percentage(0, 0), 0.0);
        assert_eq!(percentage(1, 4), 25.0);
    }
}
