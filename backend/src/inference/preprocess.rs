use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use shared::MODEL_INPUT_SIZE;

use crate::error::PipelineError;

const JPEG_QUALITY: u8 = 75;

/// Upload resized to the model's input frame and re-encoded as JPEG.
#[derive(Debug, Clone)]
pub struct NormalizedImage {
    pub jpeg: Vec<u8>,
    pub original_width: u32,
    pub original_height: u32,
}

/// Decodes `bytes`, stretches the image to exactly `MODEL_INPUT_SIZE` square
/// (aspect ratio is not preserved) and encodes it as 8-bit RGB JPEG.
pub fn normalize(bytes: &[u8]) -> Result<NormalizedImage, PipelineError> {
    let image = image::load_from_memory(bytes).map_err(PipelineError::Decode)?;
    let (original_width, original_height) = (image.width(), image.height());

    let resized = image
        .resize_exact(MODEL_INPUT_SIZE, MODEL_INPUT_SIZE, FilterType::CatmullRom)
        .to_rgb8();

    let mut jpeg = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut jpeg, JPEG_QUALITY);
    resized
        .write_with_encoder(encoder)
        .map_err(PipelineError::Encode)?;

    Ok(NormalizedImage {
        jpeg,
        original_width,
        original_height,
    })
}
