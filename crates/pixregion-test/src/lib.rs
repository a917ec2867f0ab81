//! pixregion-test - Regression test framework for pixregion
//!
//! Every crate's `tests/*_reg.rs` drives its checks through [`RegParams`],
//! which numbers each comparison, collects failures and reports them at
//! [`RegParams::cleanup`]. Two modes are supported:
//!
//! - **Compare** (default): run all comparisons, write nothing
//! - **Display**: additionally write intermediate images to
//!   `tests/regout/` for visual inspection
//!
//! # Usage
//!
//! ```ignore
//! use pixregion_test::RegParams;
//!
//! let mut rp = RegParams::new("seedfill");
//! rp.compare_values(25.0, count as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "compare" or "display"
//! - `RUST_LOG`: Log filter for the library crates (e.g. `pixregion_region=debug`)

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // pixregion-test is at crates/pixregion-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}
