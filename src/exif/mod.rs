//! EXIF decoding.
//!
//! - [`ExifDecoder`]: the seam the pipeline decodes through
//! - [`NomExifDecoder`]: the shipped implementation, backed by `nom-exif`
//! - [`TagSet`] / [`Tag`]: the uniform name → record mapping decoders produce
//!
//! Tags that appear in reports get human-readable descriptions
//! (`1/125`, `f/2.8`, `right-top`, ...) alongside their raw values.

mod describe;
mod reader;
mod tags;

pub use describe::describe;
pub use reader::NomExifDecoder;
pub use tags::{DecodeError, ExifDecoder, Tag, TagSet};
