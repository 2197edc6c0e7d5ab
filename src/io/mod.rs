//! I/O layer: image and raw probability tensor readers, and `writers`
//! for TIFF/JPEG/PNG outputs and metadata sidecars.
pub mod reader;
pub use reader::{load_probability_tensor, load_raster};

pub mod writers;
pub use writers::save_raster;
