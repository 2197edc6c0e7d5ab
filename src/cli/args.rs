use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use deeptor::{OutputFormat, ResizePolicy};

#[derive(Parser)]
#[command(name = "deeptor", version, about = "DeepTor segmentation mask CLI")]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,

    /// Enable logging (RUST_LOG overrides the default debug level)
    #[arg(long, global = true, default_value_t = false)]
    pub log: bool,

    /// JSON preset with processing parameters; flags below override it
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Bring an image to the model input size
    Prepare(PrepareArgs),

    /// Threshold raw probability maps into mask images
    Mask(MaskArgs),

    /// Run an image and its precomputed probability map through a full session
    Segment(SegmentArgs),
}

/// Model input sizing
#[derive(Args, Clone, Debug, Default)]
pub struct InputOptions {
    /// Square model input edge in pixels (default 256)
    #[arg(long)]
    pub size: Option<u32>,

    /// Resize policy (center-crop-after-fill or scale-to-fit-exact)
    #[arg(long, value_enum)]
    pub policy: Option<ResizePolicy>,
}

/// Layout of raw little-endian f32 probability files
#[derive(Args, Clone, Debug)]
pub struct TensorOptions {
    /// Tensor shape as C,H,W
    #[arg(long, default_value = "1,256,256")]
    pub shape: String,

    /// Element strides as C,H,W; row-major contiguous when omitted
    #[arg(long)]
    pub strides: Option<String>,
}

/// Thresholding and rendering
#[derive(Args, Clone, Debug, Default)]
pub struct MaskOptions {
    /// Foreground cutoff; values at or above it become 1 (default 0.5).
    /// Compared at f32 precision, the type of the probability samples
    #[arg(long)]
    pub cutoff: Option<f64>,

    /// Lower end of the display range (default 0)
    #[arg(long)]
    pub min: Option<f64>,

    /// Upper end of the display range (default 1)
    #[arg(long)]
    pub max: Option<f64>,

    /// Accept probability maps of any spatial size instead of 256x256
    #[arg(long, default_value_t = false)]
    pub any_shape: bool,

    /// Write a JSON metadata sidecar next to each mask
    #[arg(long, default_value_t = false)]
    pub metadata: bool,
}

#[derive(Args)]
pub struct PrepareArgs {
    /// Source image
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output image
    #[arg(short, long)]
    pub output: PathBuf,

    /// Output format (tiff, jpeg or png)
    #[arg(short = 'f', long, value_enum)]
    pub format: Option<OutputFormat>,

    #[command(flatten)]
    pub input_options: InputOptions,
}

#[derive(Args)]
pub struct MaskArgs {
    /// Raw probability file (single file mode)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Directory of raw probability files (batch mode)
    #[arg(long)]
    pub input_dir: Option<PathBuf>,

    /// Output mask image (single file mode)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output directory (batch mode)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Output format (tiff, jpeg or png)
    #[arg(short = 'f', long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Batch mode: continue with other files when one fails
    #[arg(long, default_value_t = false)]
    pub batch: bool,

    #[command(flatten)]
    pub tensor: TensorOptions,

    #[command(flatten)]
    pub mask_options: MaskOptions,
}

#[derive(Args)]
pub struct SegmentArgs {
    /// Source image
    #[arg(short, long)]
    pub input: PathBuf,

    /// Raw probability file the model produced for this image
    #[arg(long)]
    pub probabilities: PathBuf,

    /// Output mask image
    #[arg(short, long)]
    pub output: PathBuf,

    /// Output format (tiff, jpeg or png)
    #[arg(short = 'f', long, value_enum)]
    pub format: Option<OutputFormat>,

    #[command(flatten)]
    pub input_options: InputOptions,

    #[command(flatten)]
    pub tensor: TensorOptions,

    #[command(flatten)]
    pub mask_options: MaskOptions,
}
