/// Longest edge of the image sent for analysis.
pub const MAX_IMAGE_DIMENSION: u32 = 800;
pub const JPEG_QUALITY: u8 = 85;

pub const DEFAULT_CATEGORY: &str = "other";

#[derive(Debug, Clone)]
pub struct AnalyzeFridgeInput {
    pub image_data: Vec<u8>,
}
