//! Human-readable output for the CLI.

use crate::governance::cycle::{CycleSet, CycleWindow};
use crate::governance::select::Selection;

const MS_PER_HOUR: f64 = 60.0 * 60.0 * 1000.0;
const MS_PER_DAY: f64 = 24.0 * MS_PER_HOUR;

fn span(delta_ms: f64, in_hours: bool) -> String {
    if in_hours {
        format!("{:.2} hours", delta_ms / MS_PER_HOUR)
    } else {
        format!("{:.2} days", delta_ms / MS_PER_DAY)
    }
}

fn days_between(start_ms: i64, end_ms: i64) -> String {
    format!("{:.1}", (end_ms - start_ms) as f64 / MS_PER_DAY)
}

pub fn print_window(label: &str, w: &CycleWindow, in_hours: bool) {
    println!("{label}");
    println!("    Start   | {}", w.start_iso);
    println!(
        "    Vote    | {} | {} blocks | ~{}",
        w.vote_iso,
        w.vote_delta,
        span(w.vote_delta_ms, in_hours)
    );
    println!(
        "    Payment | {} | {} blocks | ~{}",
        w.superblock_iso,
        w.superblock_delta,
        span(w.superblock_delta_ms, in_hours)
    );
    println!("    End     | {}", w.end_iso);
    println!();
}

pub fn print_cycles(set: &CycleSet, seconds_per_block: f64, show_last: bool) {
    println!("Seconds per block: {seconds_per_block}");
    println!();

    if show_last {
        print_window(
            &format!("LAST (superblock {}):", set.last.superblock_height),
            &set.last,
            false,
        );
    }
    if let Some(lameduck) = &set.lameduck {
        print_window(
            "0: Lame duck (new proposals will be too late to pass):",
            lameduck,
            true,
        );
    }
    for (i, w) in set.upcoming.iter().enumerate() {
        print_window(&format!("{}: superblock {}", i + 1, w.superblock_height), w, false);
    }
}

pub fn print_selection(sel: &Selection<'_>, amount: f64) {
    println!(
        "Proposal Period: {} - {} (~{} days)",
        sel.start.start_iso,
        sel.end.end_iso,
        days_between(sel.start.start_ms, sel.end.end_ms)
    );
    println!(
        "Vote Period:     {} - {} (~{} days)",
        sel.start.start_iso,
        sel.end.vote_iso,
        days_between(sel.start.start_ms, sel.end.vote_ms)
    );
    println!(
        "Payment Period:  {} - {} (~{} days)",
        sel.start.superblock_iso,
        sel.end.superblock_iso,
        days_between(sel.start.superblock_ms, sel.end.superblock_ms)
    );
    println!();
    let count = sel.cycle_count();
    println!("Total: {} = {} x {}", amount * count as f64, amount, count);
}
