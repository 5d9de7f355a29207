use serde_json::json;

/// Returns the JSON schema for fridge analysis LLM responses
pub fn get_fridge_analysis_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "summary": { "type": "string" },
            "items": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "name": { "type": "string" },
                        "quantity": { "type": "integer" },
                        "category": { "type": "string" },
                        "freshness": {
                            "type": "string",
                            "enum": ["fresh", "use_soon", "spoiled", "unknown"]
                        },
                        "bounding_box": {
                            "type": "object",
                            "properties": {
                                "x": { "type": "number" },
                                "y": { "type": "number" },
                                "width": { "type": "number" },
                                "height": { "type": "number" }
                            },
                            "required": ["x", "y", "width", "height"]
                        }
                    },
                    "required": ["name", "quantity", "category", "freshness"]
                }
            }
        },
        "required": ["summary", "items"]
    })
}
