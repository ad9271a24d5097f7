//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `bingo_core` linkage.
//! - Run a fixed 3x3 bingo demo over sample chores.

use bingo_core::{BingoConfig, BingoManager, GridSizePolicy};
use std::process::ExitCode;

const DEMO_TASKS: [&str; 9] = [
    "Go for a run",
    "Tidy room",
    "Do laundry",
    "Scrub bathtub",
    "Take out trash",
    "Walk dog",
    "Do homework",
    "Write report",
    "Eat",
];

fn main() -> ExitCode {
    println!("bingo_core ping={}", bingo_core::ping());
    println!("bingo_core version={}", bingo_core::core_version());

    let mut manager = BingoManager::with_config(BingoConfig {
        grid_policy: GridSizePolicy::Fixed3x3,
        ..BingoConfig::default()
    });
    for text in DEMO_TASKS {
        manager.add_task(text, None);
    }

    let mut grid = match manager.generate_bingo_grid() {
        Ok(grid) => grid,
        Err(err) => {
            eprintln!("bingo demo failed: {err}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(err) = grid.complete_task_at(0, 0) {
        eprintln!("bingo demo failed: {err}");
        return ExitCode::FAILURE;
    }

    println!("{grid}");
    println!(
        "completed={}/{}",
        grid.completed_count(),
        grid.size() * grid.size()
    );
    ExitCode::SUCCESS
}
