//! Scan and tree-listing configuration types.

use std::path::PathBuf;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::error::ScanError;

/// Prefix used for tree output files when none is given.
pub const DEFAULT_TREE_PREFIX: &str = "tree_output";

/// Number of extensions shown in the histogram by default.
pub const DEFAULT_TOP_EXTENSIONS: usize = 10;

/// Configuration for scanning operations.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate", error = "ScanError"))]
pub struct ScanConfig {
    /// Root path to scan.
    pub root: PathBuf,

    /// Follow symbolic links into directories.
    #[builder(default = "false")]
    #[serde(default)]
    pub follow_symlinks: bool,

    /// Include hidden files and directories (starting with .).
    #[builder(default = "true")]
    #[serde(default = "default_true")]
    pub include_hidden: bool,

    /// Number of extensions to rank in the histogram.
    #[builder(default = "DEFAULT_TOP_EXTENSIONS")]
    #[serde(default = "default_top_extensions")]
    pub top_extensions: usize,
}

fn default_true() -> bool {
    true
}

fn default_top_extensions() -> usize {
    DEFAULT_TOP_EXTENSIONS
}

impl From<derive_builder::UninitializedFieldError> for ScanError {
    fn from(err: derive_builder::UninitializedFieldError) -> Self {
        Self::InvalidConfig {
            message: err.to_string(),
        }
    }
}

impl ScanConfigBuilder {
    fn validate(&self) -> Result<(), ScanError> {
        match self.root {
            Some(ref root) if root.as_os_str().is_empty() => Err(ScanError::EmptyRoot),
            Some(_) => Ok(()),
            None => Err(ScanError::EmptyRoot),
        }
    }
}

impl ScanConfig {
    /// Create a new scan config builder.
    pub fn builder() -> ScanConfigBuilder {
        ScanConfigBuilder::default()
    }

    /// Create a simple config for scanning a path.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            follow_symlinks: false,
            include_hidden: true,
            top_extensions: DEFAULT_TOP_EXTENSIONS,
        }
    }

    /// Copy of this config rooted somewhere else.
    pub fn with_root(&self, root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..self.clone()
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self::new(".")
    }
}

/// Configuration for the external tree listings.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct TreeConfig {
    /// Filename prefix for the output files.
    #[builder(default = "DEFAULT_TREE_PREFIX.to_string()")]
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// Depth levels to render, one file per level.
    #[builder(default = "vec![1, 2, 3]")]
    #[serde(default = "default_depths")]
    pub depths: Vec<u32>,

    /// Program used to render the listings.
    #[builder(default = "\"tree\".to_string()")]
    #[serde(default = "default_utility")]
    pub utility: String,

    /// Directory the output files are written into.
    #[builder(default = "PathBuf::from(\".\")")]
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_prefix() -> String {
    DEFAULT_TREE_PREFIX.to_string()
}

fn default_depths() -> Vec<u32> {
    vec![1, 2, 3]
}

fn default_utility() -> String {
    "tree".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl TreeConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(ref depths) = self.depths {
            if depths.contains(&0) {
                return Err("Tree depth must be positive".to_string());
            }
        }
        Ok(())
    }
}

impl TreeConfig {
    /// Create a new tree config builder.
    pub fn builder() -> TreeConfigBuilder {
        TreeConfigBuilder::default()
    }

    /// Config with the given prefix; a blank prefix falls back to the default.
    pub fn with_prefix(prefix: &str) -> Self {
        let prefix = prefix.trim();
        Self {
            prefix: if prefix.is_empty() {
                DEFAULT_TREE_PREFIX.to_string()
            } else {
                prefix.to_string()
            },
            ..Self::default()
        }
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            depths: default_depths(),
            utility: default_utility(),
            output_dir: default_output_dir(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = ScanConfig::builder()
            .root("/home/user")
            .top_extensions(5usize)
            .follow_symlinks(true)
            .build()
            .unwrap();

        assert_eq!(config.root, PathBuf::from("/home/user"));
        assert_eq!(config.top_extensions, 5);
        assert!(config.follow_symlinks);
        assert!(config.include_hidden);
    }

    #[test]
    fn test_empty_root_rejected() {
        let err = ScanConfig::builder().root("").build().unwrap_err();
        assert!(matches!(err, ScanError::EmptyRoot));

        let err = ScanConfig::builder().build().unwrap_err();
        assert!(matches!(err, ScanError::EmptyRoot));
    }

    #[test]
    fn test_with_root_keeps_options() {
        let mut config = ScanConfig::new("/a");
        config.include_hidden = false;
        let moved = config.with_root("/b");
        assert_eq!(moved.root, PathBuf::from("/b"));
        assert!(!moved.include_hidden);
    }

    #[test]
    fn test_tree_config_defaults() {
        let config = TreeConfig::builder().build().unwrap();
        assert_eq!(config.prefix, "tree_output");
        assert_eq!(config.depths, vec![1, 2, 3]);
        assert_eq!(config.utility, "tree");
    }

    #[test]
    fn test_tree_config_rejects_zero_depth() {
        assert!(TreeConfig::builder().depths(vec![0, 1]).build().is_err());
    }

    #[test]
    fn test_blank_prefix_falls_back() {
        assert_eq!(TreeConfig::with_prefix("   ").prefix, DEFAULT_TREE_PREFIX);
        assert_eq!(TreeConfig::with_prefix(" proj ").prefix, "proj");
    }
}
