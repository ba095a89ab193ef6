//! Wire schema of a recipe card
//!
//! Every object level disallows additional properties and lists all of its
//! keys as required; nullable values are expressed as `[type, "null"]`.

use crate::llm::JsonSchema;
use serde_json::json;

pub fn recipe_schema() -> JsonSchema {
    JsonSchema {
        name: "recipe_card".to_string(),
        strict: true,
        schema: json!({
            "type": "object",
            "additionalProperties": false,
            "properties": {
                "recipe": {
                    "type": "object",
                    "additionalProperties": false,
                    "properties": {
                        "name": {"type": "string"},
                        "servings": {"type": ["integer", "null"], "minimum": 1},
                        "times": {
                            "type": "object",
                            "additionalProperties": false,
                            "properties": {
                                "total_min": {"type": "integer", "minimum": 1},
                                "prep_min": {"type": ["integer", "null"], "minimum": 0},
                                "cook_min": {"type": ["integer", "null"], "minimum": 0}
                            },
                            "required": ["total_min", "prep_min", "cook_min"]
                        },
                        "ingredients": {
                            "type": "array",
                            "minItems": 1,
                            "items": {
                                "type": "object",
                                "additionalProperties": false,
                                "properties": {
                                    "name": {"type": "string"},
                                    "quantity": {"type": ["number", "null"]},
                                    "unit": {"type": ["string", "null"]},
                                    "critical": {"type": "boolean"},
                                    "alternative": {"type": ["string", "null"]}
                                },
                                "required": ["name", "quantity", "unit", "critical", "alternative"]
                            }
                        },
                        "steps": {
                            "type": "array",
                            "minItems": 1,
                            "items": {
                                "type": "object",
                                "additionalProperties": false,
                                "properties": {
                                    "index": {"type": "integer", "minimum": 1},
                                    "instruction": {"type": "string"},
                                    "timer_min": {"type": ["integer", "null"], "minimum": 0}
                                },
                                "required": ["index", "instruction", "timer_min"]
                            }
                        }
                    },
                    "required": ["name", "servings", "times", "ingredients", "steps"]
                }
            },
            "required": ["recipe"]
        }),
    }
}
