//! TIFF/GeoTIFF decoding into a [`RasterGrid`].

use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use tiff::decoder::{Decoder, DecodingResult};
use tiff::tags::Tag;
use tracing::{debug, info, warn};
use viewer_common::{ViewerError, ViewerResult};

use crate::grid::RasterGrid;

/// GDAL's ASCII nodata tag.
const GDAL_NODATA_TAG: u16 = 42113;

/// Load the first band of a raster file.
///
/// Any integer or floating sample type is widened to `f64` without
/// clipping. Pixels equal to the GDAL nodata value, when the file
/// declares one, become NaN; the comparison is made at the precision
/// the samples were stored in.
///
/// # Errors
/// - [`ViewerError::InputNotFound`] if `path` does not exist
/// - [`ViewerError::DecodeError`] if the file is not a readable raster
pub fn load_raster(path: impl AsRef<Path>) -> ViewerResult<RasterGrid> {
    let path = path.as_ref();
    let decode_err = |message: String| ViewerError::DecodeError {
        path: path.to_path_buf(),
        message,
    };

    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ViewerError::InputNotFound(path.to_path_buf()),
        _ => decode_err(format!("cannot open file: {}", e)),
    })?;

    let mut decoder = Decoder::new(BufReader::new(file))
        .map_err(|e| decode_err(format!("not a TIFF raster: {}", e)))?;

    let (width, height) = decoder
        .dimensions()
        .map_err(|e| decode_err(format!("cannot read dimensions: {}", e)))?;
    let (width, height) = (width as usize, height as usize);

    let nodata = read_nodata(&mut decoder);

    let image = decoder
        .read_image()
        .map_err(|e| decode_err(format!("cannot read pixel data: {}", e)))?;
    // f32 pixels carry the nodata value rounded to f32
    let single_precision = matches!(image, DecodingResult::F32(_));
    let samples = widen(image);

    let pixels = width * height;
    if pixels == 0 || samples.len() % pixels != 0 {
        return Err(decode_err(format!(
            "{} samples do not fill a {}x{} grid",
            samples.len(),
            width,
            height
        )));
    }
    let bands = samples.len() / pixels;
    if bands > 1 {
        debug!(path = %path.display(), bands, "Multi-band raster, using band 1");
    }

    // Samples are pixel-interleaved; band 1 is every `bands`-th value.
    let data: Vec<f64> = samples
        .into_iter()
        .step_by(bands)
        .map(|v| match nodata {
            Some(nd) if is_nodata(v, nd, single_precision) => f64::NAN,
            _ => v,
        })
        .collect();

    let grid = RasterGrid::new(width, height, data)?;
    let stats = grid.stats();
    info!(
        path = %path.display(),
        width,
        height,
        bands,
        valid = stats.finite,
        invalid = stats.invalid(),
        min = stats.min,
        max = stats.max,
        mean = stats.mean,
        "Loaded raster"
    );

    Ok(grid)
}

fn is_nodata(value: f64, nodata: f64, single_precision: bool) -> bool {
    if single_precision {
        value as f32 == nodata as f32
    } else {
        value == nodata
    }
}

/// Read the GDAL nodata value, if the file declares a parseable one.
fn read_nodata<R: io::Read + io::Seek>(decoder: &mut Decoder<R>) -> Option<f64> {
    let value = match decoder.find_tag(Tag::from_u16_exhaustive(GDAL_NODATA_TAG)) {
        Ok(Some(value)) => value,
        Ok(None) => return None,
        Err(e) => {
            warn!(error = %e, "Unreadable GDAL nodata tag, ignoring");
            return None;
        }
    };

    let text = value.into_string().ok()?;
    let text = text.trim_matches(|c: char| c == '\0' || c.is_whitespace());
    match text.parse::<f64>() {
        Ok(nd) => {
            debug!(nodata = nd, "Raster declares nodata value");
            Some(nd)
        }
        Err(_) => {
            warn!(nodata = text, "Unparseable GDAL nodata value, ignoring");
            None
        }
    }
}

/// Widen any decoded sample type to f64.
fn widen(image: DecodingResult) -> Vec<f64> {
    match image {
        DecodingResult::U8(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::U16(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::U32(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::U64(v) => v.into_iter().map(|x| x as f64).collect(),
        DecodingResult::I8(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::I16(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::I32(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::I64(v) => v.into_iter().map(|x| x as f64).collect(),
        DecodingResult::F32(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::F64(v) => v,
    }
}
