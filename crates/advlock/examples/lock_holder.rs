//! Helper binary that acquires lock, writes marker, holds, releases
//!
//! Usage: lock_holder <lock_path> <marker_path> <process_id>
//!
//! Used to test cross-process exclusive locking. Waits for the lock with a
//! timeout, appends a marker line, holds the lock briefly, then releases it.
//! Several processes running this should execute one after another.

use advlock::{LockHandle, LockMode};
use std::env;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() != 4 {
        eprintln!("Usage: lock_holder <lock_path> <marker_path> <process_id>");
        std::process::exit(1);
    }

    let lock_path = PathBuf::from(&args[1]);
    let marker_path = PathBuf::from(&args[2]);
    let process_id = &args[3];

    let mut handle = LockHandle::open(&lock_path).expect("Failed to open lock file");
    handle
        .acquire_with_timeout(LockMode::Exclusive, Duration::from_secs(30))
        .expect("Failed to acquire lock");

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(marker_path)
        .expect("Failed to open marker file");

    writeln!(file, "process_{} acquired lock", process_id).expect("Failed to write marker");
    // Hold long enough for the others to contend
    std::thread::sleep(Duration::from_millis(100));
    writeln!(file, "process_{} releasing lock", process_id).expect("Failed to write marker");

    handle.release().expect("Failed to release lock");
    println!("Process {} completed", process_id);
}
