use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::FieldError;
use crate::extract::FromJsonValue;
use crate::schema::SchemaValidator;

/// Item payload accepted by `POST /items/` and echoed back unchanged
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub tax: Option<f64>,
}

static ITEM_VALIDATOR: OnceLock<SchemaValidator> = OnceLock::new();

impl Item {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Item {
            name: name.into(),
            description: None,
            price,
            tax: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_tax(mut self, tax: f64) -> Self {
        self.tax = Some(tax);
        self
    }

    /// JSON Schema of the payload, shared by request validation and the
    /// OpenAPI document
    pub fn schema() -> Value {
        json!({
            "type": "object",
            "title": "Item",
            "properties": {
                "name": { "type": "string", "title": "Name" },
                "description": {
                    "anyOf": [{ "type": "string" }, { "type": "null" }],
                    "title": "Description"
                },
                "price": { "type": "number", "title": "Price" },
                "tax": {
                    "anyOf": [{ "type": "number" }, { "type": "null" }],
                    "title": "Tax"
                }
            },
            "required": ["name", "price"]
        })
    }

    fn validator() -> &'static SchemaValidator {
        ITEM_VALIDATOR.get_or_init(|| {
            SchemaValidator::new(Item::schema()).expect("invalid item schema")
        })
    }
}

impl FromJsonValue for Item {
    /// Validate a decoded request body against the item schema.
    ///
    /// Every failure is reported at once, in declaration order.
    fn from_json(value: Value) -> Result<Self, Vec<FieldError>> {
        let value = Item::validator().validate(value)?;

        serde_json::from_value(value)
            .map_err(|e| vec![FieldError::body("value_error", e.to_string(), Value::Null)])
    }
}
