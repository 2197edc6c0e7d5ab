//! Core building blocks: value types (raster, tensor, mask), parameters,
//! and the preparation/extraction stages. These are consumed by the
//! high-level `api` module and can be used directly for in-memory work.
pub mod mask;
pub mod params;
pub mod processing;
pub mod raster;
pub mod tensor;
