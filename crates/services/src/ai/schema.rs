//! Response schemas for structured (JSON) generation.

use serde_json::{Value, json};

#[must_use]
pub fn mcqs() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "question": {
                    "type": "STRING",
                    "description": "The question text."
                },
                "options": {
                    "type": "ARRAY",
                    "items": { "type": "STRING" },
                    "description": "An array of 4 possible answers."
                },
                "answer": {
                    "type": "STRING",
                    "description": "The correct answer, which must be one of the strings in the options array."
                }
            },
            "required": ["question", "options", "answer"]
        }
    })
}

#[must_use]
pub fn flashcards() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "term": {
                    "type": "STRING",
                    "description": "The key term or concept."
                },
                "definition": {
                    "type": "STRING",
                    "description": "The definition or explanation of the term."
                }
            },
            "required": ["term", "definition"]
        }
    })
}

#[must_use]
pub fn study_note() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "htmlContent": {
                "type": "STRING",
                "description": "The full semantic HTML content of the textbook chapter."
            },
            "cssStyles": {
                "type": "STRING",
                "description": "The complete CSS style sheet for the chapter."
            }
        },
        "required": ["htmlContent", "cssStyles"]
    })
}
