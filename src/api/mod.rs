//! High-level, ergonomic library API: prepare images to files, turn probability
//! maps into mask files, batch helpers for directories, and a session runner
//! that writes the result of a full segmentation request. Prefer these
//! entrypoints over the low-level processing modules for file-based work.
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::core::mask::BinaryMask;
use crate::core::params::SegmentationParams;
use crate::core::processing::pipeline::{SegmentationOutput, SegmentationSession, extract_mask};
use crate::core::processing::prepare::{PreparedImage, prepare};
use crate::core::tensor::Tensor3D;
use crate::error::{Error, Result};
use crate::inference::InferenceEngine;
use crate::io::reader::{load_probability_tensor, load_raster};
use crate::io::writers::metadata::{MaskMetadata, create_mask_metadata_sidecar};
use crate::io::writers::save_raster;
use crate::types::MODEL_OUTPUT_SIZE;

/// Memory layout of raw probability files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TensorLayout {
    pub shape: [usize; 3],
    /// None means row-major contiguous
    pub strides: Option<[usize; 3]>,
}

impl Default for TensorLayout {
    fn default() -> Self {
        Self {
            shape: [1, MODEL_OUTPUT_SIZE, MODEL_OUTPUT_SIZE],
            strides: None,
        }
    }
}

/// Batch processing report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub processed: usize,
    pub skipped: usize,
    pub errors: usize,
}

/// Raw tensor files are recognised by these extensions.
const TENSOR_EXTENSIONS: &[&str] = &["f32", "bin", "raw"];

fn is_tensor_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| TENSOR_EXTENSIONS.iter().any(|t| e.eq_ignore_ascii_case(t)))
}

/// Load `input`, prepare it per `params` and save the model-ready image.
pub fn prepare_image_to_path(
    input: &Path,
    output: &Path,
    params: &SegmentationParams,
) -> Result<PreparedImage> {
    params.validate()?;
    let source = load_raster(input)?;
    let size = params.target_size;
    let prepared = prepare(source, (size, size), params.policy)?;
    save_raster(&prepared.image, output, params.format)?;
    info!(
        "Prepared {:?} -> {:?} ({}x{}, engine option {})",
        input,
        output,
        prepared.image.width(),
        prepared.image.height(),
        prepared.crop_and_scale
    );
    Ok(prepared)
}

/// Threshold `tensor`, save its display image and optionally a JSON sidecar.
pub fn mask_tensor_to_path(
    tensor: &Tensor3D<'_>,
    output: &Path,
    params: &SegmentationParams,
    write_metadata: bool,
    source: Option<&Path>,
) -> Result<BinaryMask> {
    params.validate()?;
    let (mask, display) = extract_mask(tensor, params)?;
    save_raster(&display, output, params.format)?;
    if write_metadata {
        let meta = MaskMetadata::describe(&mask, params, source);
        create_mask_metadata_sidecar(output, &meta)?;
    }
    Ok(mask)
}

/// Load a raw probability file and write its mask.
pub fn mask_tensor_file_to_path(
    input: &Path,
    output: &Path,
    layout: TensorLayout,
    params: &SegmentationParams,
    write_metadata: bool,
) -> Result<BinaryMask> {
    let tensor = load_probability_tensor(input, layout.shape, layout.strides)?;
    let mask = mask_tensor_to_path(&tensor.view(), output, params, write_metadata, Some(input))?;
    info!(
        "Mask written: {:?} -> {:?} ({} foreground pixels)",
        input,
        output,
        mask.foreground_count()
    );
    Ok(mask)
}

/// Return every entry directly inside `input_dir`, sorted by name.
pub fn iterate_entries(input_dir: &Path) -> Result<std::vec::IntoIter<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(input_dir)? {
        let path = entry?.path();
        files.push(path);
    }
    files.sort();
    Ok(files.into_iter())
}

/// Turn every raw tensor file in `input_dir` into a mask in `output_dir`.
/// Non-tensor entries are counted as skipped. Inputs sharing a file stem map to
/// the same output name; only the first is written and the rest count as
/// errors. If `continue_on_error` is true, failures are counted in the report
/// and processing continues; otherwise the first error is returned.
pub fn mask_directory_to_path(
    input_dir: &Path,
    output_dir: &Path,
    layout: TensorLayout,
    params: &SegmentationParams,
    write_metadata: bool,
    continue_on_error: bool,
) -> Result<BatchReport> {
    params.validate()?;
    std::fs::create_dir_all(output_dir)?;

    let mut report = BatchReport::default();
    let mut claimed: HashSet<PathBuf> = HashSet::new();
    for path in iterate_entries(input_dir)? {
        if !is_tensor_file(&path) {
            info!("Skipping non-tensor entry: {:?}", path);
            report.skipped += 1;
            continue;
        }
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .ok_or_else(|| Error::Processing(format!("no file name in {:?}", path)))?;
        let output_path = output_dir.join(format!("{}.{}", stem, params.format.extension()));

        let outcome = if claimed.insert(output_path.clone()) {
            mask_tensor_file_to_path(&path, &output_path, layout, params, write_metadata)
        } else {
            Err(Error::Processing(format!(
                "{:?} would overwrite {:?} written earlier in this batch",
                path, output_path
            )))
        };
        match outcome {
            Ok(_) => report.processed += 1,
            Err(e) => {
                warn!("Error processing {:?}: {}", path, e);
                report.errors += 1;
                if !continue_on_error {
                    return Err(e);
                }
            }
        }
    }

    info!(
        "Batch complete: processed={}, skipped={}, errors={}",
        report.processed, report.skipped, report.errors
    );
    Ok(report)
}

/// Run one full request through `session` and save the display mask.
pub fn segment_with_engine_to_path<E: InferenceEngine>(
    session: &mut SegmentationSession<E>,
    input: &Path,
    output: &Path,
    write_metadata: bool,
) -> Result<SegmentationOutput> {
    let source = load_raster(input)?;
    let result = session.segment(source)?;
    save_raster(&result.display, output, session.params().format)?;
    if write_metadata {
        let meta = MaskMetadata::describe(&result.mask, session.params(), Some(input))
            .with_policy(session.params().policy);
        create_mask_metadata_sidecar(output, &meta)?;
    }
    Ok(result)
}
