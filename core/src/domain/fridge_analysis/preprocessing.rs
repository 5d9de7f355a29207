use image::{
    GenericImageView, ImageFormat, Rgb, RgbImage, codecs::jpeg::JpegEncoder, imageops::FilterType,
};
use imageproc::{drawing::draw_hollow_rect_mut, rect::Rect};

use crate::domain::{
    common::entities::app_errors::CoreError,
    fridge_analysis::{
        entities::PixelBox,
        value_objects::{JPEG_QUALITY, MAX_IMAGE_DIMENSION},
    },
};

const BOX_COLOR: Rgb<u8> = Rgb([230, 40, 40]);
const BOX_STROKE: u32 = 2;

/// JPEG ready to be sent for analysis, with the pixels it was encoded from.
#[derive(Debug, Clone)]
pub struct ProcessedImage {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub pixels: RgbImage,
}

/// Decodes a JPEG or PNG upload, drops transparency, shrinks it to fit
/// the maximum dimension and re-encodes it as JPEG.
pub fn preprocess_image(data: &[u8]) -> Result<ProcessedImage, CoreError> {
    let format = image::guess_format(data)
        .map_err(|_| CoreError::Invalid("unrecognized image format".to_string()))?;
    if !matches!(format, ImageFormat::Jpeg | ImageFormat::Png) {
        return Err(CoreError::Invalid(format!(
            "unsupported image format {format:?}, expected JPEG or PNG"
        )));
    }

    let decoded = image::load_from_memory_with_format(data, format).map_err(|e| {
        tracing::warn!("failed to decode uploaded image: {}", e);
        CoreError::Invalid("image could not be decoded".to_string())
    })?;

    let (width, height) = decoded.dimensions();
    let resized = if width > MAX_IMAGE_DIMENSION || height > MAX_IMAGE_DIMENSION {
        decoded.resize(MAX_IMAGE_DIMENSION, MAX_IMAGE_DIMENSION, FilterType::Lanczos3)
    } else {
        decoded
    };

    let pixels = resized.to_rgb8();
    let (width, height) = pixels.dimensions();
    let bytes = encode_jpeg(&pixels)?;

    Ok(ProcessedImage {
        bytes,
        width,
        height,
        pixels,
    })
}

/// Outlines each box on the processed image and encodes the result as JPEG.
pub fn annotate_image(
    processed: &ProcessedImage,
    boxes: &[PixelBox],
) -> Result<Vec<u8>, CoreError> {
    let mut canvas = processed.pixels.clone();

    for pixel_box in boxes {
        for inset in 0..BOX_STROKE {
            let width = pixel_box.width.saturating_sub(2 * inset);
            let height = pixel_box.height.saturating_sub(2 * inset);
            if width == 0 || height == 0 {
                break;
            }
            let (Ok(x), Ok(y)) = (
                i32::try_from(pixel_box.x + inset),
                i32::try_from(pixel_box.y + inset),
            ) else {
                break;
            };
            draw_hollow_rect_mut(&mut canvas, Rect::at(x, y).of_size(width, height), BOX_COLOR);
        }
    }

    encode_jpeg(&canvas)
}

fn encode_jpeg(pixels: &RgbImage) -> Result<Vec<u8>, CoreError> {
    let mut bytes = Vec::new();
    JpegEncoder::new_with_quality(&mut bytes, JPEG_QUALITY)
        .encode_image(pixels)
        .map_err(|e| {
            tracing::error!("failed to encode analysis image: {}", e);
            CoreError::InternalServerError
        })?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use image::{DynamicImage, Rgba, RgbaImage};

    use super::*;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let image = RgbaImage::from_pixel(width, height, Rgba([200, 120, 40, 128]));
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(image)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_large_png_is_shrunk_to_jpeg() {
        let processed = preprocess_image(&png(1600, 1200)).unwrap();

        assert_eq!((processed.width, processed.height), (800, 600));
        assert_eq!(
            image::guess_format(&processed.bytes).unwrap(),
            ImageFormat::Jpeg
        );
        let decoded = image::load_from_memory(&processed.bytes).unwrap();
        assert_eq!(decoded.dimensions(), (800, 600));
        assert!(!decoded.color().has_alpha());
    }

    #[test]
    fn test_tall_image_keeps_aspect_ratio() {
        let processed = preprocess_image(&png(400, 1600)).unwrap();

        assert_eq!((processed.width, processed.height), (200, 800));
    }

    #[test]
    fn test_small_image_is_not_upscaled() {
        let processed = preprocess_image(&png(320, 240)).unwrap();

        assert_eq!((processed.width, processed.height), (320, 240));
    }

    #[test]
    fn test_garbage_is_rejected() {
        let result = preprocess_image(b"definitely not an image");

        assert!(matches!(result, Err(CoreError::Invalid(_))));
    }

    #[test]
    fn test_other_formats_are_rejected() {
        let result = preprocess_image(b"GIF89a\x01\x00\x01\x00\x00\x00\x00");

        assert!(matches!(result, Err(CoreError::Invalid(_))));
    }

    #[test]
    fn test_truncated_png_is_rejected() {
        let bytes = png(64, 64);

        let result = preprocess_image(&bytes[..bytes.len() / 2]);

        assert!(matches!(result, Err(CoreError::Invalid(_))));
    }

    #[test]
    fn test_annotation_outlines_boxes_on_processed_image() {
        let green = RgbaImage::from_pixel(400, 200, Rgba([20, 180, 40, 255]));
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(green)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        let processed = preprocess_image(&bytes).unwrap();
        let boxes = [
            PixelBox {
                x: 40,
                y: 40,
                width: 100,
                height: 60,
            },
            PixelBox {
                x: 390,
                y: 190,
                width: 0,
                height: 10,
            },
        ];

        let annotated = annotate_image(&processed, &boxes).unwrap();

        let decoded = image::load_from_memory(&annotated).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (400, 200));
        let edge = decoded.get_pixel(40, 70);
        assert!(edge[0] > edge[1], "edge pixel {edge:?}");
        let inside = decoded.get_pixel(90, 70);
        assert!(inside[1] > inside[0], "inner pixel {inside:?}");
    }
}
