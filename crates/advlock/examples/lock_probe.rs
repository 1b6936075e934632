//! Helper binary that makes a single non-blocking lock attempt
//!
//! Usage: lock_probe <lock_path> <exclusive|shared>
//!
//! Exit codes: 0 lock acquired, 3 lock busy, 1 usage or open error.

use advlock::{LockHandle, LockMode};
use std::env;

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: lock_probe <lock_path> <exclusive|shared>");
        std::process::exit(1);
    }

    let mode = match args[2].as_str() {
        "exclusive" => LockMode::Exclusive,
        "shared" => LockMode::Shared,
        other => {
            eprintln!("Unknown lock mode: {}", other);
            std::process::exit(1);
        }
    };

    let mut handle = match LockHandle::open(&args[1]) {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    if handle.try_acquire(mode) {
        println!("acquired {} lock", mode);
    } else {
        println!("{} lock busy", mode);
        std::process::exit(3);
    }
}
