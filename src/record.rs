//! # Benchmark Result Persistence
//!
//! Appends benchmark results to per-iteration-count CSV files. The header is
//! written only when the file is created; later runs just add rows.
//! There is no locking, so concurrent writers to one file may interleave.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

use itertools::Itertools;

use crate::bench::BenchmarkResult;

/// Column names, in [`BenchmarkResult`] field order.
pub const HEADER: [&str; 6] = [
    "iterations",
    "create_time",
    "read_time",
    "update_time",
    "delete_time",
    "total_time",
];

/// The header line, without a trailing newline.
pub fn header_line() -> String {
    HEADER.iter().join(",")
}

/// One data row, without a trailing newline. Durations keep full precision.
pub fn format_row(result: &BenchmarkResult) -> String {
    [
        result.iterations.to_string(),
        result.create_time.to_string(),
        result.read_time.to_string(),
        result.update_time.to_string(),
        result.delete_time.to_string(),
        result.total_time.to_string(),
    ]
    .iter()
    .join(",")
}

/// Appends `result` to the CSV file at `path`, writing the header first if
/// the file did not exist when this was called.
pub fn append_result(path: impl AsRef<Path>, result: &BenchmarkResult) -> io::Result<()> {
    let path = path.as_ref();
    let existed = path.exists();
    let mut file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut out = String::new();
    if !existed {
        out.push_str(&header_line());
        out.push('\n');
    }
    out.push_str(&format_row(result));
    out.push('\n');
    file.write_all(out.as_bytes())?;
    file.flush()
}
