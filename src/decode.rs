//! The decode pipeline: inflate, schema-decode, then asset post-processing.
//!
//! Every stage is all-or-nothing. [`decode_container`] is a pure function of its
//! input and options, so the parser can run it on any thread.

pub mod assets;
pub mod inflate;
pub mod worker;

pub use assets::{AssetPolicy, transcode_images};
pub use inflate::inflate;
pub use worker::{DecodeOptions, decode_container};
