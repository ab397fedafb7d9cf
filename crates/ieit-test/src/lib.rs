//! ieit-test - Regression test framework for the ieit workspace
//!
//! This crate provides the shared tooling used by the `tests/*_reg.rs`
//! files of every workspace crate:
//!
//! - [`RegParams`]: indexed value/string comparisons with a summary report
//! - [`synthetic`]: deterministic class samples and mosaics
//! - [`regout_dir`]: scratch directory for files written by tests
//!
//! # Usage
//!
//! ```ignore
//! use ieit_test::RegParams;
//!
//! let mut rp = RegParams::new("criterion");
//! rp.compare_values(1.0, criterion(0.0, 0.0), 0.0);
//! assert!(rp.cleanup());
//! ```

mod error;
mod params;
pub mod synthetic;

pub use error::{TestError, TestResult};
pub use params::RegParams;

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // ieit-test is at crates/ieit-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the regout (regression output) directory
///
/// The directory is created on first use.
pub fn regout_dir() -> String {
    let dir = format!("{}/tests/regout", workspace_root());
    let _ = std::fs::create_dir_all(&dir);
    dir
}

/// Path of a file inside the regout directory
pub fn regout_path(name: &str) -> String {
    format!("{}/{}", regout_dir(), name)
}
