use std::{
    fs,
    path::{Path, PathBuf},
    time::SystemTime,
};

use anyhow::{Context, Result};
use regex::Regex;
use tracing::{debug, trace};

/// Per-session log directories written by the receiver logger.
const SESSION_DIR_PATTERN: &str = r"^ins401_log_.+$";
/// Base station correction captures within a session directory.
const CAPTURE_PATTERN: &str = r"^rtcm_base_.+\.bin$";

fn matching_entries(dir: &Path, rx: &Regex, want_dir: bool) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::default();
    for entry in fs::read_dir(dir).with_context(|| format!("listing {dir:?}"))? {
        let entry = entry.with_context(|| format!("listing {dir:?}"))?;
        let path = entry.path();
        if path.is_dir() != want_dir {
            continue;
        }
        if entry.file_name().to_str().is_some_and(|n| rx.is_match(n)) {
            paths.push(path);
        }
    }
    Ok(paths)
}

/// Find the most recently modified capture, `<data_dir>/ins401_log_*/rtcm_base_*.bin`.
///
/// Returns `Ok(None)` if `data_dir` does not exist or contains no captures.
pub fn latest_capture(data_dir: &Path) -> Result<Option<PathBuf>> {
    if !data_dir.is_dir() {
        debug!("data directory {data_dir:?} does not exist");
        return Ok(None);
    }
    let session_rx = Regex::new(SESSION_DIR_PATTERN).expect("regex to compile");
    let capture_rx = Regex::new(CAPTURE_PATTERN).expect("regex to compile");

    let mut latest: Option<(SystemTime, PathBuf)> = None;
    for session in matching_entries(data_dir, &session_rx, true)? {
        for path in matching_entries(&session, &capture_rx, false)? {
            let modified = fs::metadata(&path)
                .and_then(|m| m.modified())
                .with_context(|| format!("reading modification time of {path:?}"))?;
            trace!("candidate {path:?} modified {modified:?}");
            if latest.as_ref().map_or(true, |(t, _)| modified > *t) {
                latest = Some((modified, path));
            }
        }
    }
    Ok(latest.map(|(_, path)| path))
}
