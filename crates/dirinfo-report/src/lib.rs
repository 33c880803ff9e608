//! Report rendering for dirinfo.
//!
//! This crate turns scan results into text and drives the optional
//! external tree listings:
//!
//! - **Formatting** - sizes in MB/GB, grouped counts, ranked histogram rows
//! - **Tree listings** - run a `tree` utility per depth and save its output
//!
//! # Formatting
//!
//! ```rust
//! use dirinfo_report::{format_size, render_histogram_row};
//!
//! assert_eq!(format_size(1_610_612_736), "1.50 GB");
//! assert_eq!(
//!     render_histogram_row(1, ".rs", 1234, 2468),
//!     "   1. .rs                1,234 files (50.0%)"
//! );
//! ```
//!
//! # Tree Listings
//!
//! ```rust,no_run
//! use dirinfo_report::{TreeInvocation, TreeRunner};
//!
//! let invocation = TreeInvocation::new(2, "tree_output_L2_20240101.txt", "/srv").unwrap();
//! match TreeRunner::new().run(&invocation) {
//!     Ok(path) => println!("Tree output saved to: {}", path.display()),
//!     Err(err) => eprintln!("{err}"),
//! }
//! ```

mod format;
pub mod tree;

pub use format::{format_count, format_size, render_histogram_row, render_stat};
pub use tree::{TreeError, TreeInvocation, TreeRunner, plan_invocations, tree_output_filename};

// Re-export core types
pub use dirinfo_core::{ExtensionStat, TreeConfig};
