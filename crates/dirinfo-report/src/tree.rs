//! External directory-tree listings.
//!
//! Runs a `tree`-style program as `<utility> -L <depth> <path>` and saves its
//! standard output to a file. Nothing is written when the program is missing
//! or fails.

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use chrono::NaiveDate;
use thiserror::Error;
use tracing::debug;

use dirinfo_core::TreeConfig;

/// Errors from producing a tree listing.
#[derive(Debug, Error)]
pub enum TreeError {
    /// The utility is not installed.
    #[error("'{utility}' command not found. Please install it first.")]
    UtilityMissing { utility: String },

    /// The utility could not be started for another reason.
    #[error("Failed to launch '{utility}': {source}")]
    Launch {
        utility: String,
        #[source]
        source: io::Error,
    },

    /// The utility exited unsuccessfully.
    #[error("Error running {utility} command: {stderr}")]
    Failed {
        utility: String,
        status: Option<i32>,
        stderr: String,
    },

    /// The listing could not be written.
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Depth zero was requested.
    #[error("Tree depth must be positive")]
    InvalidDepth,
}

impl TreeError {
    /// Installation guidance when the utility is missing.
    ///
    /// Package manager commands are only suggested for `tree` itself.
    pub fn install_hint(&self) -> Option<String> {
        let Self::UtilityMissing { utility } = self else {
            return None;
        };

        let program = Path::new(utility)
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();
        if program == "tree" {
            Some(
                "On Ubuntu/Debian: sudo apt install tree\n\
                 On Fedora/RHEL: sudo dnf install tree\n\
                 On Arch: sudo pacman -S tree\n\
                 On macOS: brew install tree"
                    .to_string(),
            )
        } else {
            Some(format!(
                "Make sure '{utility}' is installed and on PATH, or choose another tree utility."
            ))
        }
    }

    fn launch(utility: &str, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Self::UtilityMissing {
                utility: utility.to_string(),
            }
        } else {
            Self::Launch {
                utility: utility.to_string(),
                source,
            }
        }
    }
}

/// One tree listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeInvocation {
    /// Maximum depth passed to the utility.
    pub depth: u32,
    /// File receiving the listing.
    pub output_file: PathBuf,
    /// Directory being listed.
    pub scan_root: PathBuf,
}

impl TreeInvocation {
    /// Create a request; depth must be positive.
    pub fn new(
        depth: u32,
        output_file: impl Into<PathBuf>,
        scan_root: impl Into<PathBuf>,
    ) -> Result<Self, TreeError> {
        if depth == 0 {
            return Err(TreeError::InvalidDepth);
        }
        Ok(Self {
            depth,
            output_file: output_file.into(),
            scan_root: scan_root.into(),
        })
    }
}

/// Name of the listing file for one depth: `<prefix>_L<depth>_<YYYYMMDD>.txt`.
pub fn tree_output_filename(prefix: &str, depth: u32, date: NaiveDate) -> String {
    format!("{prefix}_L{depth}_{}.txt", date.format("%Y%m%d"))
}

/// One invocation per configured depth, in configured order.
pub fn plan_invocations(
    config: &TreeConfig,
    scan_root: &Path,
    date: NaiveDate,
) -> Result<Vec<TreeInvocation>, TreeError> {
    config
        .depths
        .iter()
        .map(|&depth| {
            let file = config
                .output_dir
                .join(tree_output_filename(&config.prefix, depth, date));
            TreeInvocation::new(depth, file, scan_root)
        })
        .collect()
}

/// Runs the external tree utility.
#[derive(Debug, Clone)]
pub struct TreeRunner {
    utility: String,
}

impl TreeRunner {
    /// Runner for the `tree` program on `PATH`.
    pub fn new() -> Self {
        Self::with_utility("tree")
    }

    /// Runner for another program accepting `-L <depth> <path>`.
    pub fn with_utility(utility: impl Into<String>) -> Self {
        Self {
            utility: utility.into(),
        }
    }

    /// Runner for the utility named in `config`.
    pub fn from_config(config: &TreeConfig) -> Self {
        Self::with_utility(config.utility.clone())
    }

    /// Check that the utility can be started.
    ///
    /// Only a failure to launch counts; the exit status is ignored.
    pub fn probe(&self) -> Result<(), TreeError> {
        Command::new(&self.utility)
            .arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|_| ())
            .map_err(|e| TreeError::launch(&self.utility, e))
    }

    /// Render one listing and write it to the invocation's output file,
    /// replacing any existing file.
    pub fn run(&self, invocation: &TreeInvocation) -> Result<PathBuf, TreeError> {
        self.probe()?;

        debug!(
            utility = %self.utility,
            depth = invocation.depth,
            root = %invocation.scan_root.display(),
            "running tree utility"
        );

        let output = Command::new(&self.utility)
            .arg("-L")
            .arg(invocation.depth.to_string())
            .arg(&invocation.scan_root)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| TreeError::launch(&self.utility, e))?;

        if !output.status.success() {
            return Err(TreeError::Failed {
                utility: self.utility.clone(),
                status: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim_end().to_string(),
            });
        }

        std::fs::write(&invocation.output_file, &output.stdout).map_err(|source| TreeError::Io {
            path: invocation.output_file.clone(),
            source,
        })?;

        Ok(invocation.output_file.clone())
    }
}

impl Default for TreeRunner {
    fn default() -> Self {
        Self::new()
    }
}
