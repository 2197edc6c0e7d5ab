use std::path::Path;

use tracing::info;
use tracing_subscriber::EnvFilter;

use deeptor::io::load_probability_tensor;
use deeptor::{
    PrecomputedEngine, SegmentationParams, SegmentationSession, TensorLayout,
    mask_directory_to_path, mask_tensor_file_to_path, prepare_image_to_path,
    segment_with_engine_to_path,
};

use super::args::{CliArgs, Command, InputOptions, MaskArgs, MaskOptions, TensorOptions};
use super::errors::AppError;

fn parse_triple(what: &'static str, value: &str) -> Result<[usize; 3], AppError> {
    let invalid = || AppError::InvalidTriple {
        what,
        value: value.to_string(),
    };
    let parts = value
        .split(',')
        .map(|p| p.trim().parse::<usize>().map_err(|_| invalid()))
        .collect::<Result<Vec<_>, _>>()?;
    match parts.as_slice() {
        [c, h, w] => Ok([*c, *h, *w]),
        _ => Err(invalid()),
    }
}

fn parse_layout(opts: &TensorOptions) -> Result<TensorLayout, AppError> {
    let shape = parse_triple("shape", &opts.shape)?;
    let strides = match &opts.strides {
        Some(s) => Some(parse_triple("strides", s)?),
        None => None,
    };
    Ok(TensorLayout { shape, strides })
}

fn base_params(config: Option<&Path>) -> Result<SegmentationParams, AppError> {
    match config {
        Some(path) => {
            info!("Loading preset: {:?}", path);
            Ok(SegmentationParams::from_json_file(path)?)
        }
        None => Ok(SegmentationParams::default()),
    }
}

fn apply_input_options(params: &mut SegmentationParams, opts: &InputOptions) {
    if let Some(size) = opts.size {
        params.target_size = size;
    }
    if let Some(policy) = opts.policy {
        params.policy = policy;
    }
}

fn apply_mask_options(params: &mut SegmentationParams, opts: &MaskOptions) {
    if let Some(cutoff) = opts.cutoff {
        params.cutoff = cutoff;
    }
    if let Some(min) = opts.min {
        params.display.min = min;
    }
    if let Some(max) = opts.max {
        params.display.max = max;
    }
    if opts.any_shape {
        params.expected_output = None;
    }
}

fn run_mask(args: MaskArgs, mut params: SegmentationParams) -> Result<(), AppError> {
    if let Some(format) = args.format {
        params.format = format;
    }
    apply_mask_options(&mut params, &args.mask_options);
    params.validate()?;
    let layout = parse_layout(&args.tensor)?;
    let write_metadata = args.mask_options.metadata;

    if let Some(input_dir) = args.input_dir {
        let output_dir = args.output_dir.ok_or(AppError::MissingArgument {
            arg: "--output-dir".to_string(),
        })?;
        info!("Starting batch processing from directory: {:?}", input_dir);
        info!("Output directory: {:?}", output_dir);

        let report = mask_directory_to_path(
            &input_dir,
            &output_dir,
            layout,
            &params,
            write_metadata,
            args.batch,
        )?;
        info!("Batch processing complete!");
        info!("Processed: {}", report.processed);
        info!("Skipped: {}", report.skipped);
        info!("Errors: {}", report.errors);
    } else {
        let input = args.input.ok_or(AppError::MissingArgument {
            arg: "--input".to_string(),
        })?;
        let output = args.output.ok_or(AppError::MissingArgument {
            arg: "--output".to_string(),
        })?;
        mask_tensor_file_to_path(&input, &output, layout, &params, write_metadata)?;
        info!("Successfully processed: {:?} -> {:?}", input, output);
    }
    Ok(())
}

pub fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.log {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let mut params = base_params(args.config.as_deref())?;

    match args.command {
        Command::Prepare(prepare) => {
            if let Some(format) = prepare.format {
                params.format = format;
            }
            apply_input_options(&mut params, &prepare.input_options);
            let prepared = prepare_image_to_path(&prepare.input, &prepare.output, &params)?;
            info!(
                "Successfully prepared: {:?} -> {:?}; forward crop/scale option {} to inference",
                prepare.input, prepare.output, prepared.crop_and_scale
            );
        }
        Command::Mask(mask) => run_mask(mask, params)?,
        Command::Segment(segment) => {
            if let Some(format) = segment.format {
                params.format = format;
            }
            apply_input_options(&mut params, &segment.input_options);
            apply_mask_options(&mut params, &segment.mask_options);
            let layout = parse_layout(&segment.tensor)?;

            let tensor =
                load_probability_tensor(&segment.probabilities, layout.shape, layout.strides)?;
            let engine_name = segment.probabilities.display().to_string();
            let engine = PrecomputedEngine::new(engine_name, tensor);
            let mut session = SegmentationSession::new(engine, params)?;

            let result = segment_with_engine_to_path(
                &mut session,
                &segment.input,
                &segment.output,
                segment.mask_options.metadata,
            )?;
            info!(
                "Successfully segmented: {:?} -> {:?} ({} foreground pixels)",
                segment.input,
                segment.output,
                result.mask.foreground_count()
            );
        }
    }

    Ok(())
}
