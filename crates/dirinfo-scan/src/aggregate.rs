//! Directory statistics derived from walks.

use std::path::Path;

use compact_str::CompactString;
use itertools::Itertools;
use tracing::{debug, warn};

use dirinfo_core::{
    DirectoryReport, ExtensionHistogram, ExtensionStat, ScanConfig, ScanWarning, Scanned,
    SubfolderEntry,
};

use crate::walker::Walker;

/// Computes file counts, sizes and extension frequencies.
///
/// Every operation walks its root afresh and holds no state between calls.
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    config: ScanConfig,
}

impl Aggregator {
    /// Create an aggregator with default walk options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an aggregator using the walk options of `config`.
    pub fn with_config(config: ScanConfig) -> Self {
        Self { config }
    }

    fn walker(&self, root: &Path) -> Walker {
        Walker::new(&self.config.with_root(root))
    }

    /// Count every file beneath `root`, at any depth.
    pub fn count_total_files(&self, root: impl AsRef<Path>) -> Scanned<u64> {
        let mut count = 0;
        let warnings = self.walker(root.as_ref()).for_each_file(|_| count += 1);
        Scanned::new(count, warnings)
    }

    /// Per-extension counts of every file beneath `root`.
    pub fn histogram(&self, root: impl AsRef<Path>) -> Scanned<ExtensionHistogram> {
        let mut histogram = ExtensionHistogram::new();
        let warnings = self
            .walker(root.as_ref())
            .for_each_file(|file| histogram.record(file.file_name()));
        Scanned::new(histogram, warnings)
    }

    /// The `top_n` most frequent extensions beneath `root`.
    ///
    /// Percentages are shares of all files, including those outside the top.
    pub fn extension_histogram(
        &self,
        root: impl AsRef<Path>,
        top_n: usize,
    ) -> Scanned<Vec<ExtensionStat>> {
        self.histogram(root).map(|h| h.top(top_n))
    }

    /// Total bytes of every file beneath `root`.
    ///
    /// Files that vanish or cannot be stat'ed contribute nothing.
    pub fn directory_size(&self, root: impl AsRef<Path>) -> Scanned<u64> {
        let mut total = 0;
        let warnings = self
            .walker(root.as_ref())
            .for_each_file(|file| total += file.size().unwrap_or(0));
        Scanned::new(total, warnings)
    }

    /// Direct child directories of `root`, sorted by name, each with its own
    /// recursive file count and size.
    pub fn enumerate_immediate_subfolders(
        &self,
        root: impl AsRef<Path>,
    ) -> Scanned<Vec<SubfolderEntry>> {
        let root = root.as_ref();
        let mut warnings = Vec::new();

        let listing = match std::fs::read_dir(root) {
            Ok(listing) => listing,
            Err(err) => {
                let warning = ScanWarning::from_io(root, &err);
                warn!(path = %root.display(), "{}", warning.message);
                warnings.push(warning);
                return Scanned::new(Vec::new(), warnings);
            }
        };

        let mut folders = Vec::new();
        for entry in listing {
            let entry = match entry {
                Ok(e) => e,
                Err(err) => {
                    let warning = ScanWarning::from_io(root, &err);
                    warn!(path = %root.display(), "{}", warning.message);
                    warnings.push(warning);
                    continue;
                }
            };

            let name = CompactString::new(entry.file_name().to_string_lossy());
            if !self.config.include_hidden && name.starts_with('.') {
                continue;
            }

            // Follows links, so a link to a directory is listed.
            let path = entry.path();
            if path.is_dir() {
                folders.push((name, path));
            }
        }

        folders.sort_by(|a, b| a.0.cmp(&b.0));

        let entries = folders
            .into_iter()
            .map(|(name, path)| {
                let (tally, sub_warnings) = self.tally(&path, false);
                warnings.extend(sub_warnings);
                SubfolderEntry {
                    name,
                    path,
                    file_count: tally.files,
                    size: tally.bytes,
                }
            })
            .collect();

        Scanned::new(entries, warnings)
    }

    /// Analyze the configured root: totals, histogram and subfolders.
    ///
    /// Totals and histogram come from a single walk. Warnings raised by
    /// more than one walk are reported once.
    pub fn analyze(&self) -> DirectoryReport {
        let root = self.config.root.clone();
        debug!(root = %root.display(), "analyzing directory");

        let (tally, mut warnings) = self.tally(&root, true);
        let (subfolders, sub_warnings) = self.enumerate_immediate_subfolders(&root).into_parts();
        warnings.extend(sub_warnings);

        DirectoryReport {
            top_extensions: tally.histogram.top(self.config.top_extensions),
            root,
            total_files: tally.files,
            total_size: tally.bytes,
            histogram: tally.histogram,
            subfolders,
            warnings: warnings.into_iter().unique().collect(),
        }
    }

    fn tally(&self, root: &Path, with_histogram: bool) -> (Tally, Vec<ScanWarning>) {
        let mut tally = Tally::default();
        let warnings = self.walker(root).for_each_file(|file| {
            tally.files += 1;
            tally.bytes += file.size().unwrap_or(0);
            if with_histogram {
                tally.histogram.record(file.file_name());
            }
        });
        (tally, warnings)
    }
}

#[derive(Debug, Default)]
struct Tally {
    files: u64,
    bytes: u64,
    histogram: ExtensionHistogram,
}
