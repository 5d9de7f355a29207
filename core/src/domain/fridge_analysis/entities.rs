use std::{collections::BTreeMap, fmt};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Freshness {
    Fresh,
    UseSoon,
    Spoiled,
    Unknown,
}

impl Freshness {
    /// Maps the free-form label produced by the model.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().replace(['-', '_'], " ").as_str() {
            "fresh" | "good" => Self::Fresh,
            "use soon" | "expiring" | "expiring soon" | "aging" => Self::UseSoon,
            "spoiled" | "expired" | "bad" => Self::Spoiled,
            _ => Self::Unknown,
        }
    }
}

/// Item position as percentages (0-100) of the image size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Item position in pixels of the processed image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PixelBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    pub fn to_pixels(&self, image_width: u32, image_height: u32) -> PixelBox {
        let (x, width) = project(self.x, self.width, image_width);
        let (y, height) = project(self.y, self.height, image_height);
        PixelBox {
            x,
            y,
            width,
            height,
        }
    }
}

fn project(offset_pct: f64, extent_pct: f64, size: u32) -> (u32, u32) {
    let to_px = |pct: f64| {
        let pct = if pct.is_finite() { pct.clamp(0.0, 100.0) } else { 0.0 };
        (pct / 100.0 * f64::from(size)).round() as u32
    };
    let offset = to_px(offset_pct).min(size);
    let extent = to_px(extent_pct).min(size - offset);
    (offset, extent)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FridgeItem {
    pub name: String,
    pub quantity: u32,
    pub category: String,
    pub freshness: Freshness,
    pub bounding_box: Option<BoundingBox>,
    pub pixel_box: Option<PixelBox>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FridgeAnalysis {
    pub id: Uuid,
    pub summary: String,
    pub items: BTreeMap<String, FridgeItem>,
    pub image_width: u32,
    pub image_height: u32,
    pub analyzed_at: DateTime<Utc>,
}

impl FridgeAnalysis {
    /// Sorted, unique ingredient names.
    pub fn ingredient_names(&self) -> Vec<String> {
        self.items.keys().cloned().collect()
    }

    pub fn pixel_boxes(&self) -> Vec<PixelBox> {
        self.items.values().filter_map(|item| item.pixel_box).collect()
    }
}

/// Processed JPEG with the item boxes of one analysis drawn on it.
#[derive(Clone, PartialEq, Eq)]
pub struct AnalysisImage {
    pub analysis_id: Uuid,
    pub jpeg: Vec<u8>,
}

impl fmt::Debug for AnalysisImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnalysisImage")
            .field("analysis_id", &self.analysis_id)
            .field("jpeg_len", &self.jpeg.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_freshness_labels() {
        assert_eq!(Freshness::from_label("Fresh"), Freshness::Fresh);
        assert_eq!(Freshness::from_label("use_soon"), Freshness::UseSoon);
        assert_eq!(Freshness::from_label(" Expiring-Soon "), Freshness::UseSoon);
        assert_eq!(Freshness::from_label("expired"), Freshness::Spoiled);
        assert_eq!(Freshness::from_label("n/a"), Freshness::Unknown);
        assert_eq!(Freshness::from_label(""), Freshness::Unknown);
    }

    #[test]
    fn test_bounding_box_to_pixels() {
        let bounding_box = BoundingBox {
            x: 25.0,
            y: 10.0,
            width: 50.0,
            height: 20.0,
        };

        assert_eq!(
            bounding_box.to_pixels(800, 600),
            PixelBox {
                x: 200,
                y: 60,
                width: 400,
                height: 120,
            }
        );
    }

    #[test]
    fn test_bounding_box_is_clamped_to_image() {
        let bounding_box = BoundingBox {
            x: 90.0,
            y: -5.0,
            width: 40.0,
            height: 250.0,
        };

        assert_eq!(
            bounding_box.to_pixels(800, 600),
            PixelBox {
                x: 720,
                y: 0,
                width: 80,
                height: 600,
            }
        );
    }

    #[test]
    fn test_non_finite_box_collapses() {
        let bounding_box = BoundingBox {
            x: f64::NAN,
            y: 0.0,
            width: f64::INFINITY,
            height: 10.0,
        };

        let pixels = bounding_box.to_pixels(100, 100);
        assert_eq!(pixels.x, 0);
        assert_eq!(pixels.width, 0);
        assert_eq!(pixels.height, 10);
    }
}
