use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{
    DEFAULT_CUTOFF, MODEL_INPUT_SIZE, MODEL_OUTPUT_SIZE, OutputFormat, ResizePolicy,
};

/// Linear input range mapped onto `[0, 255]` when rendering a mask.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayRange {
    pub min: f64,
    pub max: f64,
}

impl Default for DisplayRange {
    fn default() -> Self {
        Self { min: 0.0, max: 1.0 }
    }
}

impl DisplayRange {
    pub fn validate(&self) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min == self.max {
            return Err(Error::InvalidRange {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// Processing parameters suitable for config files and presets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentationParams {
    /// Square model input edge in pixels
    pub target_size: u32,
    pub policy: ResizePolicy,
    /// Cells at or above this probability are foreground
    pub cutoff: f64,
    pub display: DisplayRange,
    /// Spatial `(H, W)` the engine output must have; None accepts any shape
    pub expected_output: Option<(usize, usize)>,
    pub format: OutputFormat,
}

impl Default for SegmentationParams {
    fn default() -> Self {
        Self {
            target_size: MODEL_INPUT_SIZE,
            policy: ResizePolicy::CenterCropAfterFill,
            cutoff: DEFAULT_CUTOFF,
            display: DisplayRange::default(),
            expected_output: Some((MODEL_OUTPUT_SIZE, MODEL_OUTPUT_SIZE)),
            format: OutputFormat::PNG,
        }
    }
}

impl SegmentationParams {
    pub fn validate(&self) -> Result<()> {
        if self.target_size == 0 {
            return Err(Error::dimensions(self.target_size, self.target_size));
        }
        if !self.cutoff.is_finite() {
            return Err(Error::InvalidArgument {
                arg: "cutoff",
                value: self.cutoff.to_string(),
            });
        }
        self.display.validate()
    }

    /// Load a JSON preset. Comment lines before the first `{` are ignored.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let json_start = content.find('{').ok_or_else(|| {
            Error::Processing("Invalid preset file: no JSON content found".to_string())
        })?;
        let params: SegmentationParams = serde_json::from_str(&content[json_start..])?;
        params.validate()?;
        Ok(params)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_model_contract() {
        let p = SegmentationParams::default();
        assert_eq!(p.target_size, 256);
        assert_eq!(p.cutoff, 0.5);
        assert_eq!(p.expected_output, Some((256, 256)));
        assert!(p.validate().is_ok());
    }

    #[test]
    fn preset_with_header_and_partial_fields() {
        let preset = "// DeepTor preset\n// generated by hand\n{\n  \"policy\": \"ScaleToFitExact\",\n  \"cutoff\": 0.7\n}";
        let p = SegmentationParams::from_json_str(preset).unwrap();
        assert_eq!(p.policy, ResizePolicy::ScaleToFitExact);
        assert_eq!(p.cutoff, 0.7);
        assert_eq!(p.target_size, 256);
    }

    #[test]
    fn degenerate_presets_are_rejected() {
        let err = SegmentationParams::from_json_str("{\"display\": {\"min\": 1.0, \"max\": 1.0}}")
            .unwrap_err();
        assert!(matches!(err, Error::InvalidRange { .. }));

        let err = SegmentationParams::from_json_str("{\"target_size\": 0}").unwrap_err();
        assert!(matches!(err, Error::InvalidDimensions { .. }));

        assert!(SegmentationParams::from_json_str("no json here").is_err());
    }

    #[test]
    fn json_round_trip_preserves_values() {
        let mut p = SegmentationParams::default();
        p.format = OutputFormat::TIFF;
        p.expected_output = None;
        let json = p.to_json_string().unwrap();
        assert_eq!(SegmentationParams::from_json_str(&json).unwrap(), p);
    }
}
