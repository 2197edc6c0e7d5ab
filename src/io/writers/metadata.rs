use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::mask::BinaryMask;
use crate::core::params::{DisplayRange, SegmentationParams};
use crate::error::Result;
use crate::types::ResizePolicy;

/// Provenance and statistics written next to a mask image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaskMetadata {
    pub width: usize,
    pub height: usize,
    pub cutoff: f64,
    pub display: DisplayRange,
    /// Set only when an image was prepared for the model
    pub policy: Option<ResizePolicy>,
    pub foreground_pixels: usize,
    pub foreground_ratio: f64,
    pub source: Option<String>,
    pub tool_version: String,
    pub generated: String,
}

impl MaskMetadata {
    pub fn describe(mask: &BinaryMask, params: &SegmentationParams, source: Option<&Path>) -> Self {
        Self {
            width: mask.width(),
            height: mask.height(),
            cutoff: params.cutoff,
            display: params.display,
            policy: None,
            foreground_pixels: mask.foreground_count(),
            foreground_ratio: mask.foreground_ratio(),
            source: source.map(|p| p.display().to_string()),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            generated: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn with_policy(mut self, policy: ResizePolicy) -> Self {
        self.policy = Some(policy);
        self
    }
}

/// `<output>.json`, keeping the image extension so masks of different
/// formats never share a sidecar.
pub fn sidecar_path(output: &Path) -> PathBuf {
    let mut name = output.as_os_str().to_os_string();
    name.push(".json");
    PathBuf::from(name)
}

pub fn create_mask_metadata_sidecar(output: &Path, metadata: &MaskMetadata) -> Result<PathBuf> {
    let path = sidecar_path(output);
    let json = serde_json::to_string_pretty(metadata)?;
    fs::write(&path, json)?;
    info!("Metadata sidecar written: {:?}", path);
    Ok(path)
}
