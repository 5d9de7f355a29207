use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::warn;

use crate::domain::{
    common::entities::app_errors::CoreError,
    fridge_analysis::{
        entities::{BoundingBox, Freshness, FridgeItem},
        value_objects::DEFAULT_CATEGORY,
    },
};

/// Analysis text and inventory recovered from a model response.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedAnalysis {
    pub summary: String,
    pub items: BTreeMap<String, FridgeItem>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawQuantity {
    Number(f64),
    Text(String),
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawItem {
    name: String,
    quantity: Option<RawQuantity>,
    category: Option<String>,
    freshness: Option<String>,
    bounding_box: Option<Value>,
}

/// Parses the model answer. Never fails: text that is not a JSON object
/// becomes the summary with an empty inventory.
pub fn parse_analysis_response(raw: &str) -> ParsedAnalysis {
    let root = match analysis_object(raw) {
        Ok(root) => root,
        Err(e) => {
            warn!(error = %e, "keeping the analysis response as plain text");
            return text_only(raw);
        }
    };

    let summary = root
        .get("summary")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .trim()
        .to_string();

    let raw_items: Vec<RawItem> = match root.get("items") {
        Some(Value::Array(entries)) => entries.iter().filter_map(raw_item).collect(),
        Some(Value::Object(entries)) => entries
            .iter()
            .filter_map(|(name, entry)| {
                raw_item(entry).map(|mut item| {
                    if item.name.trim().is_empty() {
                        item.name = name.clone();
                    }
                    item
                })
            })
            .collect(),
        _ => Vec::new(),
    };

    let mut items: BTreeMap<String, FridgeItem> = BTreeMap::new();
    for raw_item in raw_items {
        let Some(item) = into_item(raw_item) else {
            continue;
        };
        match items.get_mut(&item.name) {
            Some(existing) => merge(existing, item),
            None => {
                items.insert(item.name.clone(), item);
            }
        }
    }

    ParsedAnalysis { summary, items }
}

fn analysis_object(raw: &str) -> Result<Map<String, Value>, CoreError> {
    match serde_json::from_str::<Value>(strip_code_fence(raw)) {
        Ok(Value::Object(root)) => Ok(root),
        Ok(_) => Err(CoreError::Parse(
            "analysis response: expected a JSON object".to_string(),
        )),
        Err(e) => Err(CoreError::Parse(format!("analysis response: {e}"))),
    }
}

fn text_only(raw: &str) -> ParsedAnalysis {
    ParsedAnalysis {
        summary: raw.trim().to_string(),
        items: BTreeMap::new(),
    }
}

fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

fn raw_item(entry: &Value) -> Option<RawItem> {
    match serde_json::from_value::<RawItem>(entry.clone()) {
        Ok(item) => Some(item),
        Err(e) => {
            warn!("skipping malformed analysis item: {}", e);
            None
        }
    }
}

fn into_item(raw: RawItem) -> Option<FridgeItem> {
    let name = raw.name.trim().to_lowercase();
    if name.is_empty() {
        return None;
    }

    let category = raw
        .category
        .map(|category| category.trim().to_lowercase())
        .filter(|category| !category.is_empty())
        .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());

    Some(FridgeItem {
        name,
        quantity: raw.quantity.map(quantity).unwrap_or(1),
        category,
        freshness: raw
            .freshness
            .as_deref()
            .map(Freshness::from_label)
            .unwrap_or(Freshness::Unknown),
        bounding_box: raw
            .bounding_box
            .and_then(|value| serde_json::from_value::<BoundingBox>(value).ok()),
        pixel_box: None,
    })
}

fn quantity(raw: RawQuantity) -> u32 {
    let parsed = match raw {
        RawQuantity::Number(value) if value.is_finite() => Some(value.round() as u32),
        RawQuantity::Number(_) => None,
        RawQuantity::Text(text) => {
            let digits: String = text
                .trim()
                .chars()
                .take_while(char::is_ascii_digit)
                .collect();
            digits.parse::<u32>().ok()
        }
    };
    parsed.filter(|count| *count > 0).unwrap_or(1)
}

/// Duplicate names sum their quantities; missing details are filled from the later entry.
fn merge(existing: &mut FridgeItem, other: FridgeItem) {
    existing.quantity = existing.quantity.saturating_add(other.quantity);
    if existing.category == DEFAULT_CATEGORY {
        existing.category = other.category;
    }
    if existing.freshness == Freshness::Unknown {
        existing.freshness = other.freshness;
    }
    if existing.bounding_box.is_none() {
        existing.bounding_box = other.bounding_box;
    }
}
