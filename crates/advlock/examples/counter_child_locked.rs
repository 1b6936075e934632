//! Counter helper WITH file locking
//!
//! Usage: counter_child_locked <counter_path> <iterations>
//!
//! Performs read-modify-write operations on a counter file, each one under
//! a blocking exclusive lock. No increment may be lost.

use advlock::{LockHandle, LockMode};
use std::env;
use std::fs;
use std::path::PathBuf;

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: counter_child_locked <counter_path> <iterations>");
        std::process::exit(1);
    }

    let counter_path = PathBuf::from(&args[1]);
    let iterations: usize = args[2].parse().expect("iterations must be a number");

    let mut handle =
        LockHandle::open(counter_path.with_extension("lock")).expect("Failed to open lock file");

    for _ in 0..iterations {
        handle
            .with_lock(LockMode::Exclusive, || {
                let content =
                    fs::read_to_string(&counter_path).expect("Failed to read counter file");
                let value: u32 = content
                    .trim()
                    .parse()
                    .expect("Counter file should contain a number");

                // Sleep to increase contention
                std::thread::sleep(std::time::Duration::from_micros(10));

                fs::write(&counter_path, (value + 1).to_string())
                    .expect("Failed to write counter file");
            })
            .expect("Failed to lock counter");
    }

    println!("Counter child completed {} iterations", iterations);
}
