//! TIFF fixtures written to temporary directories.
//!
//! Each writer panics on failure; these are for tests only.

use std::fs::File;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tiff::encoder::{colortype, TiffEncoder};
use tiff::tags::Tag;

/// GDAL's ASCII nodata tag.
pub const GDAL_NODATA_TAG: u16 = 42113;

/// A temporary directory holding raster fixtures; removed on drop.
pub struct FixtureDir {
    dir: TempDir,
}

impl FixtureDir {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create fixture dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path for a file inside the fixture directory.
    pub fn join(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write a single-band 32-bit float TIFF.
    pub fn f32_tiff(&self, name: &str, width: u32, height: u32, data: &[f64]) -> PathBuf {
        let path = self.join(name);
        write_f32_tiff(&path, width, height, data);
        path
    }

    /// Write a single-band 64-bit float TIFF.
    pub fn f64_tiff(&self, name: &str, width: u32, height: u32, data: &[f64]) -> PathBuf {
        let path = self.join(name);
        let file = File::create(&path).expect("create tiff");
        let mut encoder = TiffEncoder::new(file).expect("tiff encoder");
        encoder
            .write_image::<colortype::Gray64Float>(width, height, data)
            .expect("write f64 tiff");
        path
    }

    /// Write a 32-bit float TIFF declaring a GDAL nodata value.
    pub fn f32_tiff_with_nodata(
        &self,
        name: &str,
        width: u32,
        height: u32,
        data: &[f64],
        nodata: &str,
    ) -> PathBuf {
        let path = self.join(name);
        let file = File::create(&path).expect("create tiff");
        let mut encoder = TiffEncoder::new(file).expect("tiff encoder");
        let mut image = encoder
            .new_image::<colortype::Gray32Float>(width, height)
            .expect("new image");
        image
            .encoder()
            .write_tag(Tag::Unknown(GDAL_NODATA_TAG), nodata)
            .expect("write nodata tag");
        let samples: Vec<f32> = data.iter().map(|&v| v as f32).collect();
        image.write_data(&samples).expect("write data");
        path
    }

    /// Write a 3-band 8-bit TIFF from per-pixel `[r, g, b]` triples.
    pub fn rgb8_tiff(&self, name: &str, width: u32, height: u32, pixels: &[[u8; 3]]) -> PathBuf {
        let path = self.join(name);
        let file = File::create(&path).expect("create tiff");
        let mut encoder = TiffEncoder::new(file).expect("tiff encoder");
        let samples: Vec<u8> = pixels.iter().flatten().copied().collect();
        encoder
            .write_image::<colortype::RGB8>(width, height, &samples)
            .expect("write rgb tiff");
        path
    }

    /// Write arbitrary bytes, for decode-failure tests.
    pub fn garbage(&self, name: &str) -> PathBuf {
        let path = self.join(name);
        std::fs::write(&path, b"this is not a raster").expect("write garbage");
        path
    }
}

impl Default for FixtureDir {
    fn default() -> Self {
        Self::new()
    }
}

/// Write a single-band 32-bit float TIFF at `path`.
pub fn write_f32_tiff(path: &Path, width: u32, height: u32, data: &[f64]) {
    let file = File::create(path).expect("create tiff");
    let mut encoder = TiffEncoder::new(file).expect("tiff encoder");
    let samples: Vec<f32> = data.iter().map(|&v| v as f32).collect();
    encoder
        .write_image::<colortype::Gray32Float>(width, height, &samples)
        .expect("write f32 tiff");
}
