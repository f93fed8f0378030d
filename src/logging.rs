//! JSON-lines run log.
//!
//! Every filter bank build and every symmetry computation appends one entry
//! to `logs/run.jsonl`. Logging is best effort; callers ignore the result so
//! an unwritable working directory never fails a computation.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

use crate::image::ImageStatistics;

const RUN_LOG: &str = "logs/run.jsonl";

fn log_dir() -> io::Result<()> {
    fs::create_dir_all("logs")
}

fn append_json_line<P: AsRef<Path>, T: Serialize>(path: P, value: &T) -> io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    serde_json::to_writer(&mut file, value)
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;
    file.write_all(b"\n")
}

fn timestamp_ms() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
}

#[derive(Debug, Serialize)]
pub struct InitializeLogEntry {
    pub event: &'static str,
    pub timestamp_ms: u128,
    pub scales: usize,
    pub orientations: usize,
    pub grid_size: Vec<usize>,
    pub elapsed_ms: u128,
}

pub fn log_initialize(
    scales: usize,
    orientations: usize,
    grid_size: &[usize],
    elapsed_ms: u128,
) -> io::Result<()> {
    log_dir()?;
    let entry = InitializeLogEntry {
        event: "initialize",
        timestamp_ms: timestamp_ms(),
        scales,
        orientations,
        grid_size: grid_size.to_vec(),
        elapsed_ms,
    };
    append_json_line(RUN_LOG, &entry)
}

#[derive(Debug, Serialize)]
pub struct ComputeLogEntry {
    pub event: &'static str,
    pub timestamp_ms: u128,
    pub scales: usize,
    pub orientations: usize,
    pub output_min: f64,
    pub output_max: f64,
    pub output_mean: f64,
    pub elapsed_ms: u128,
}

pub fn log_compute(
    scales: usize,
    orientations: usize,
    stats: &ImageStatistics,
    elapsed_ms: u128,
) -> io::Result<()> {
    log_dir()?;
    let entry = ComputeLogEntry {
        event: "compute",
        timestamp_ms: timestamp_ms(),
        scales,
        orientations,
        output_min: stats.min,
        output_max: stats.max,
        output_mean: stats.mean,
        elapsed_ms,
    };
    append_json_line(RUN_LOG, &entry)
}
