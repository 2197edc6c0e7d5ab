//! The two pipeline stages and the session that chains them around inference.
pub mod display;
pub mod pipeline;
pub mod prepare;
pub mod resize;
pub mod threshold;
