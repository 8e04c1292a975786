// JSON Schema validation of request bodies
//
// A schema is compiled once and shared. Numeric fields get a lax coercion pass
// before validation, and every violation is mapped to a `FieldError`.

use jsonschema::{error::ValidationErrorKind, JSONSchema, ValidationError};
use serde_json::{Map, Number, Value};

use crate::error::{FieldError, LocSegment};

/// Compiled schema plus the raw document it was compiled from
pub struct SchemaValidator {
    schema: Value,
    compiled: JSONSchema,
}

impl SchemaValidator {
    pub fn new(schema: Value) -> Result<Self, String> {
        let compiled = JSONSchema::compile(&schema).map_err(|e| e.to_string())?;
        Ok(Self { schema, compiled })
    }

    /// Coerce, then validate. Returns the coerced body on success and every
    /// failure, ordered by property declaration, otherwise.
    pub fn validate(&self, mut value: Value) -> Result<Value, Vec<FieldError>> {
        if let Value::Object(fields) = &mut value {
            self.coerce_numbers(fields);
        }

        let mut errors: Vec<FieldError> = match self.compiled.validate(&value) {
            Ok(()) => Vec::new(),
            Err(errors) => errors.map(|e| self.field_error(e)).collect(),
        };
        if errors.is_empty() {
            return Ok(value);
        }
        errors.sort_by_key(|e| self.declaration_index(e.field_name()));

        Err(errors)
    }

    fn properties(&self) -> Option<&Map<String, Value>> {
        self.schema.get("properties").and_then(Value::as_object)
    }

    fn property(&self, name: &str) -> Option<&Value> {
        self.properties().and_then(|props| props.get(name))
    }

    fn declaration_index(&self, field: Option<&str>) -> usize {
        field
            .and_then(|name| self.properties()?.keys().position(|k| k == name))
            .map_or(0, |index| index + 1)
    }

    fn coerce_numbers(&self, fields: &mut Map<String, Value>) {
        let Some(props) = self.properties() else {
            return;
        };
        for (name, prop) in props {
            if expected_type(prop) != Some("number") {
                continue;
            }
            if let Some(raw) = fields.get_mut(name) {
                if let Some(number) = lax_number(raw) {
                    *raw = Value::Number(number);
                }
            }
        }
    }

    fn field_error(&self, error: ValidationError<'_>) -> FieldError {
        let path = error.instance_path.clone().into_vec();
        let mut loc: Vec<LocSegment> = vec!["body".into()];
        loc.extend(path.iter().map(|segment| match segment.parse::<usize>() {
            Ok(index) => LocSegment::Index(index),
            Err(_) => LocSegment::Key(segment.clone()),
        }));
        let input = error.instance.clone().into_owned();

        match &error.kind {
            ValidationErrorKind::Required { property } => {
                let name = property.as_str().unwrap_or_default();
                loc.push(name.into());
                FieldError::new("missing", loc, "Field required", input)
            }
            ValidationErrorKind::Type { .. } | ValidationErrorKind::AnyOf => {
                let expected = match path.as_slice() {
                    [] => Some("object"),
                    [field] => self.property(field).and_then(expected_type),
                    _ => None,
                };
                let (kind, msg) = type_error(expected, &input);
                FieldError::new(kind, loc, msg, input)
            }
            _ => FieldError::new("value_error", loc, error.to_string(), input),
        }
    }
}

/// The non-null type a property schema declares, looking through `anyOf`.
fn expected_type(prop: &Value) -> Option<&str> {
    if let Some(kind) = prop.get("type").and_then(Value::as_str) {
        return Some(kind);
    }
    prop.get("anyOf")?
        .as_array()?
        .iter()
        .filter_map(|variant| variant.get("type").and_then(Value::as_str))
        .find(|kind| *kind != "null")
}

fn type_error(expected: Option<&str>, input: &Value) -> (&'static str, &'static str) {
    match expected {
        Some("object") => (
            "model_attributes_type",
            "Input should be a valid dictionary or object to extract fields from",
        ),
        Some("string") => ("string_type", "Input should be a valid string"),
        Some("number") if input.is_string() => (
            "float_parsing",
            "Input should be a valid number, unable to parse string as a number",
        ),
        Some("number") => ("float_type", "Input should be a valid number"),
        _ => ("type_error", "Input has the wrong type"),
    }
}

/// Booleans become 0/1 and numeric strings are parsed; `nan` and `inf` stay
/// strings since they cannot be written back as JSON numbers.
fn lax_number(raw: &Value) -> Option<Number> {
    match raw {
        Value::Bool(flag) => Number::from_f64(if *flag { 1.0 } else { 0.0 }),
        Value::String(s) => strip_digit_separators(s.trim())
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .and_then(Number::from_f64),
        _ => None,
    }
}

/// Drops underscores that sit between two digits, e.g. `1_000` -> `1000`.
fn strip_digit_separators(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    chars
        .iter()
        .enumerate()
        .filter(|(i, c)| {
            let between_digits = **c == '_'
                && *i > 0
                && chars[i - 1].is_ascii_digit()
                && chars.get(i + 1).is_some_and(char::is_ascii_digit);
            !between_digits
        })
        .map(|(_, c)| *c)
        .collect()
}
