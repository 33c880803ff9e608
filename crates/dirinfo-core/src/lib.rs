//! Core types for dirinfo.
//!
//! This crate provides the data structures shared by the scanner, the
//! report formatter and the CLI: configuration, warnings, and the
//! aggregate statistics of a scanned directory.

mod config;
mod error;
mod stats;

pub use config::{
    DEFAULT_TOP_EXTENSIONS, DEFAULT_TREE_PREFIX, ScanConfig, ScanConfigBuilder, TreeConfig,
    TreeConfigBuilder,
};
pub use error::{ScanError, ScanWarning, WarningKind};
pub use stats::{
    DirectoryReport, ExtensionHistogram, ExtensionStat, NO_EXTENSION, Scanned, SubfolderEntry,
    extension_label, percentage,
};
