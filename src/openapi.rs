// OpenAPI description of the service

use serde_json::{json, Value};

use crate::models::Item;

pub const OPENAPI_VERSION: &str = "3.1.0";

/// Builds the OpenAPI document served at `/openapi.json`.
pub fn openapi_document() -> Value {
    json!({
        "openapi": OPENAPI_VERSION,
        "info": {
            "title": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION")
        },
        "paths": {
            "/": {
                "get": {
                    "summary": "Read Root",
                    "operationId": "read_root",
                    "responses": {
                        "200": {
                            "description": "Successful Response",
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "type": "object",
                                        "properties": { "Hello": { "type": "string" } },
                                        "required": ["Hello"]
                                    }
                                }
                            }
                        }
                    }
                }
            },
            "/items/": {
                "post": {
                    "summary": "Create Item",
                    "operationId": "create_item",
                    "requestBody": {
                        "required": true,
                        "content": {
                            "application/json": {
                                "schema": { "$ref": "#/components/schemas/Item" }
                            }
                        }
                    },
                    "responses": {
                        "200": {
                            "description": "Successful Response",
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/Item" }
                                }
                            }
                        },
                        "422": {
                            "description": "Validation Error",
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/HTTPValidationError" }
                                }
                            }
                        }
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "Item": Item::schema(),
                "ValidationError": validation_error_schema(),
                "HTTPValidationError": {
                    "type": "object",
                    "title": "HTTPValidationError",
                    "properties": {
                        "detail": {
                            "type": "array",
                            "items": { "$ref": "#/components/schemas/ValidationError" }
                        }
                    }
                }
            }
        }
    })
}

fn validation_error_schema() -> Value {
    json!({
        "type": "object",
        "title": "ValidationError",
        "properties": {
            "type": { "type": "string", "title": "Error Type" },
            "loc": {
                "type": "array",
                "title": "Location",
                "items": { "anyOf": [{ "type": "string" }, { "type": "integer" }] }
            },
            "msg": { "type": "string", "title": "Message" },
            "input": { "title": "Input" },
            "ctx": { "type": "object", "title": "Context" }
        },
        "required": ["type", "loc", "msg"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_both_operations() {
        let doc = openapi_document();

        assert_eq!(doc["openapi"], OPENAPI_VERSION);
        assert!(doc["paths"]["/"]["get"].is_object());
        assert!(doc["paths"]["/items/"]["post"].is_object());
        assert!(doc["paths"]["/items/{item_id}"].is_null());
    }

    #[test]
    fn test_item_schema_required_fields() {
        let doc = openapi_document();
        let item = &doc["components"]["schemas"]["Item"];

        assert_eq!(item["required"], json!(["name", "price"]));
        assert_eq!(item["properties"]["price"]["type"], "number");
    }
}
