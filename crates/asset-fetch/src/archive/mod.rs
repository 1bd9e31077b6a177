//! Archive extraction for downloaded asset bundles.

mod zip;

pub use self::zip::ZipExtractor;
