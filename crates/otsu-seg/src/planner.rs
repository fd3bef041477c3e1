//! Decide how many thresholds an image needs.
//!
//! Image peaks are labelled as background (their intensity is also a border
//! peak) or foreground. A background run enclosed by foreground peaks on
//! both sides, or background split over several runs, cannot be separated
//! by one cut and calls for two thresholds.

use crate::peaks::PeakSet;
use serde::{Deserialize, Serialize};

/// Label of one image peak.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeakRole {
    Background,
    Foreground,
}

/// Number of thresholds the image requires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdCount {
    /// No border peak lines up with the image: leave the image unmodified.
    None,
    Single,
    Dual,
}

/// Label every image peak by exact intensity match against the border peaks.
pub fn label_peaks(image_peaks: &PeakSet, background_peaks: &PeakSet) -> Vec<PeakRole> {
    image_peaks
        .iter()
        .map(|p| {
            if background_peaks.contains_intensity(p.intensity) {
                PeakRole::Background
            } else {
                PeakRole::Foreground
            }
        })
        .collect()
}

#[derive(Clone, Copy, Debug)]
enum ScanState {
    /// Not inside a background run. `after_foreground` is set when the last
    /// peak seen was foreground (a background run just closed counts too).
    Outside { after_foreground: bool },
    /// Inside a background run; records whether a foreground peak opened it.
    InBackground { opened_by_foreground: bool },
}

enum ScanOutcome {
    Enclosed,
    Runs(usize),
}

fn scan_roles(roles: &[PeakRole]) -> ScanOutcome {
    let mut state = ScanState::Outside {
        after_foreground: false,
    };
    let mut runs = 0usize;

    for &role in roles {
        state = match (state, role) {
            (ScanState::Outside { after_foreground }, PeakRole::Background) => {
                ScanState::InBackground {
                    opened_by_foreground: after_foreground,
                }
            }
            (ScanState::Outside { .. }, PeakRole::Foreground) => ScanState::Outside {
                after_foreground: true,
            },
            (ScanState::InBackground { .. }, PeakRole::Background) => state,
            (
                ScanState::InBackground {
                    opened_by_foreground,
                },
                PeakRole::Foreground,
            ) => {
                if opened_by_foreground {
                    return ScanOutcome::Enclosed;
                }
                runs += 1;
                ScanState::Outside {
                    after_foreground: true,
                }
            }
        };
    }

    if matches!(state, ScanState::InBackground { .. }) {
        runs += 1;
    }
    ScanOutcome::Runs(runs)
}

/// Number of maximal background runs, or `None` if a run is enclosed by
/// foreground peaks (the scan stops there).
pub fn background_runs(roles: &[PeakRole]) -> Option<usize> {
    match scan_roles(roles) {
        ScanOutcome::Enclosed => None,
        ScanOutcome::Runs(n) => Some(n),
    }
}

/// Decide between passthrough, one and two thresholds.
pub fn plan_threshold_count(image_peaks: &PeakSet, background_peaks: &PeakSet) -> ThresholdCount {
    if image_peaks.len() <= 2 {
        return ThresholdCount::Single;
    }

    let roles = label_peaks(image_peaks, background_peaks);
    let count = match background_runs(&roles) {
        None => ThresholdCount::Dual,
        Some(0) => ThresholdCount::None,
        Some(1) => ThresholdCount::Single,
        Some(_) => ThresholdCount::Dual,
    };
    log::debug!("peak roles {roles:?} -> {count:?}");
    count
}
