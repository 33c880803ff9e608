//! Directory walking and aggregation for dirinfo.
//!
//! This crate walks a directory tree with jwalk and derives the statistics
//! dirinfo reports. Key properties:
//!
//! - **Serial traversal**: one thread, sorted by name, hidden entries included
//! - **Partial-failure tolerance**: unreadable subtrees become warnings
//! - **Stateless aggregation**: every statistic is computed from a fresh walk
//!
//! # Example
//!
//! ```rust,no_run
//! use dirinfo_scan::Aggregator;
//!
//! let aggregator = Aggregator::new();
//! let count = aggregator.count_total_files("/path/to/scan");
//! let size = aggregator.directory_size("/path/to/scan");
//!
//! println!("{} files, {} bytes", count.value, size.value);
//! if !count.is_complete() {
//!     println!("{} subtrees could not be read", count.warnings.len());
//! }
//! ```

mod aggregate;
mod walker;

pub use aggregate::Aggregator;
pub use walker::{WalkedFile, Walker};

// Re-export core types for convenience
pub use dirinfo_core::{
    DirectoryReport, ExtensionHistogram, ExtensionStat, ScanConfig, ScanWarning, Scanned,
    SubfolderEntry, WarningKind,
};
