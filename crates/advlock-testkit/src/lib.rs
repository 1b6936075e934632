//! Test utilities for advlock
//!
//! Shared helpers for the integration tests of the workspace crates.

use std::path::PathBuf;
use tempfile::TempDir;

/// Creates a temporary directory within `.tmp/` under the current directory
///
/// Keeps lock files of cross-process tests in one gitignored place that is
/// easy to clean up by hand if a test process gets killed.
///
/// # Panics
///
/// Panics if the current directory is unknown or `.tmp/` cannot be created.
pub fn temp_dir_in_workspace() -> TempDir {
    let workspace_root = std::env::current_dir().expect("Failed to get current directory");
    let tmp_base = workspace_root.join(".tmp");

    std::fs::create_dir_all(&tmp_base).expect("Failed to create .tmp directory");

    TempDir::new_in(&tmp_base).expect("Failed to create temporary directory in .tmp/")
}

/// Path to a compiled example binary of the crate under test
///
/// `cargo test` builds examples into `target/<profile>/examples/`, next to
/// the `deps/` directory holding the test binary itself.
///
/// # Panics
///
/// Panics if unable to determine the current executable path
///
/// # Examples
///
/// ```no_run
/// use advlock_testkit::example_bin;
/// use std::process::Command;
///
/// fn test_with_example() {
///     let status = Command::new(example_bin("lock_holder"))
///         .arg("test.lock")
///         .status()
///         .unwrap();
///     assert!(status.success());
/// }
/// ```
pub fn example_bin(name: &str) -> PathBuf {
    let mut path = std::env::current_exe().expect("Failed to get current executable path");

    // target/debug/deps/test_binary -> target/debug/examples/name
    path.pop();
    path.pop();
    path.push("examples");
    path.push(name);

    if cfg!(target_os = "windows") {
        path.set_extension("exe");
    }

    path
}
