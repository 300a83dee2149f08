//! Image download pipeline
//!
//! Every product record with image URLs gets one download request per URL.
//! Images land in the record's own directory next to its `info.json`.

mod images;

pub use images::{DropRecord, ImageFailure, ImagePipeline, ImageRequest, ImageResult};
