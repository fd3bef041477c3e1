//! JSON configuration and report helpers.

use crate::classify::ThresholdPlan;
use crate::dual_otsu::DualThresholds;
use crate::peaks::PeakSet;
use crate::{PassthroughReason, SegmentError, SegmentationResult, Segmenter, SegmenterParams};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

#[derive(thiserror::Error, Debug)]
pub enum SegmentIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Input configuration for a segmentation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentConfig {
    pub image_path: String,
    #[serde(default)]
    pub output_path: Option<String>,
    #[serde(default)]
    pub report_path: Option<String>,
    /// Where to write the debug histogram plot, if requested.
    #[serde(default)]
    pub plot_path: Option<String>,
    #[serde(default)]
    pub params: SegmenterParams,
}

impl SegmentConfig {
    pub fn new(image_path: impl Into<String>) -> Self {
        Self {
            image_path: image_path.into(),
            output_path: None,
            report_path: None,
            plot_path: None,
            params: SegmenterParams::default(),
        }
    }

    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, SegmentIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), SegmentIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Resolve the segmented image path.
    pub fn output_path(&self) -> PathBuf {
        self.output_path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("segmented.png"))
    }

    /// Build a segmenter with the default polarity policy.
    pub fn build_segmenter(&self) -> Segmenter {
        Segmenter::new(self.params.clone())
    }
}

/// Summary of a segmentation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentReport {
    pub image_path: String,
    #[serde(default)]
    pub config_path: Option<String>,
    pub width: usize,
    pub height: usize,
    #[serde(default)]
    pub plan: Option<ThresholdPlan>,
    #[serde(default)]
    pub passthrough: Option<PassthroughReason>,
    #[serde(default)]
    pub peaks: PeakSet,
    #[serde(default)]
    pub background_peaks: PeakSet,
    /// Dual Otsu cuts of the full histogram; only filled with debug artifacts.
    #[serde(default)]
    pub dual_thresholds: Option<DualThresholds>,
    #[serde(default)]
    pub error: Option<String>,
}

impl SegmentReport {
    pub fn new(image_path: impl Into<String>, config_path: Option<&Path>) -> Self {
        Self {
            image_path: image_path.into(),
            config_path: config_path.map(|p| p.to_string_lossy().into_owned()),
            width: 0,
            height: 0,
            plan: None,
            passthrough: None,
            peaks: PeakSet::default(),
            background_peaks: PeakSet::default(),
            dual_thresholds: None,
            error: None,
        }
    }

    /// Populate report fields from a finished run.
    pub fn set_result(&mut self, res: &SegmentationResult) {
        self.width = res.image.width;
        self.height = res.image.height;
        self.plan = res.plan;
        self.passthrough = res.passthrough;
        self.peaks = res.peaks.clone();
        self.background_peaks = res.background_peaks.clone();
        self.dual_thresholds = res.debug.as_ref().and_then(|d| d.dual_thresholds);
        self.error = None;
    }

    /// Record a segmentation error.
    pub fn set_error(&mut self, err: &SegmentError) {
        self.error = Some(err.to_string());
    }

    /// Load a report from JSON on disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, SegmentIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this report to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), SegmentIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
