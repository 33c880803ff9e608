//! Serial recursive file walker built on jwalk.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use jwalk::{Parallelism, WalkDir};
use tracing::warn;

use dirinfo_core::{ScanConfig, ScanWarning, WarningKind};

/// A non-directory entry found during a walk.
#[derive(Debug, Clone)]
pub struct WalkedFile {
    /// Full path of the file.
    pub path: PathBuf,
    /// Depth below the walk root (the root itself is 0).
    pub depth: usize,
}

impl WalkedFile {
    /// File name component.
    pub fn file_name(&self) -> &OsStr {
        self.path.file_name().unwrap_or(self.path.as_os_str())
    }

    /// Size in bytes, following symlinks.
    ///
    /// Returns `None` when the file vanished or cannot be stat'ed.
    pub fn size(&self) -> Option<u64> {
        std::fs::metadata(&self.path).ok().map(|m| m.len())
    }
}

/// Recursive walker over every file beneath a root.
///
/// Traversal is single-threaded and sorted by name. Unreadable subtrees are
/// skipped and reported as [`ScanWarning`]s; the walk itself never fails.
#[derive(Debug, Clone)]
pub struct Walker {
    root: PathBuf,
    follow_symlinks: bool,
    include_hidden: bool,
}

impl Walker {
    /// Create a walker using the options of `config`.
    pub fn new(config: &ScanConfig) -> Self {
        Self {
            root: config.root.clone(),
            follow_symlinks: config.follow_symlinks,
            include_hidden: config.include_hidden,
        }
    }

    /// Create a walker with default options.
    pub fn for_root(root: impl Into<PathBuf>) -> Self {
        Self::new(&ScanConfig::new(root))
    }

    /// Visit every file beneath the root.
    ///
    /// Returns one warning per skipped path.
    pub fn for_each_file(&self, mut visit: impl FnMut(&WalkedFile)) -> Vec<ScanWarning> {
        let mut warnings = Vec::new();

        if let Err(err) = std::fs::symlink_metadata(&self.root) {
            report(&mut warnings, ScanWarning::from_io(&self.root, &err));
            return warnings;
        }

        let walker = WalkDir::new(&self.root)
            .parallelism(Parallelism::Serial)
            .skip_hidden(!self.include_hidden)
            .follow_links(self.follow_symlinks)
            .sort(true);

        for entry_result in walker {
            let entry = match entry_result {
                Ok(e) => e,
                Err(err) => {
                    report(&mut warnings, warning_for(&err, &self.root));
                    continue;
                }
            };

            let file_type = entry.file_type();
            if file_type.is_dir() {
                if let Some(err) = &entry.read_children_error {
                    report(&mut warnings, warning_for(err, &entry.path()));
                }
                continue;
            }

            let path = entry.path();

            // Unfollowed links to directories are neither files nor descended into.
            if file_type.is_symlink() && path.is_dir() {
                continue;
            }

            visit(&WalkedFile {
                path,
                depth: entry.depth(),
            });
        }

        warnings
    }

    /// Collect every file beneath the root.
    pub fn files(&self) -> (Vec<WalkedFile>, Vec<ScanWarning>) {
        let mut files = Vec::new();
        let warnings = self.for_each_file(|file| files.push(file.clone()));
        (files, warnings)
    }
}

fn warning_for(err: &jwalk::Error, fallback: &Path) -> ScanWarning {
    let path = err.path().unwrap_or(fallback);
    match err.io_error() {
        Some(io) => ScanWarning::from_io(path, io),
        None => ScanWarning::new(
            path,
            format!("Error accessing {}: {err}", path.display()),
            WarningKind::ReadError,
        ),
    }
}

fn report(warnings: &mut Vec<ScanWarning>, warning: ScanWarning) {
    warn!(path = %warning.path.display(), kind = ?warning.kind, "{}", warning.message);
    warnings.push(warning);
}
