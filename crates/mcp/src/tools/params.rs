// Typed parameter descriptors for tool input schemas

use crate::tools::scope::ScopeDefaults;
use harness_core::pagination::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

/// JSON type of a tool parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    String,
    Number,
    Boolean,
    StringArray,
}

impl ParamKind {
    fn matches(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Number => value.is_number(),
            Self::Boolean => value.is_boolean(),
            Self::StringArray => value
                .as_array()
                .map(|items| items.iter().all(Value::is_string))
                .unwrap_or(false),
        }
    }

    fn schema(self) -> Value {
        match self {
            Self::String => json!({"type": "string"}),
            Self::Number => json!({"type": "number"}),
            Self::Boolean => json!({"type": "boolean"}),
            Self::StringArray => json!({"type": "array", "items": {"type": "string"}}),
        }
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => write!(f, "string"),
            Self::Number => write!(f, "number"),
            Self::Boolean => write!(f, "boolean"),
            Self::StringArray => write!(f, "array of strings"),
        }
    }
}

/// One declared tool parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
    pub name: String,
    pub kind: ParamKind,
    pub description: String,
    pub required: bool,
    pub default: Option<Value>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Errors in a tool's parameter declaration. These are programming errors
/// surfaced once, when the tool is defined.
#[derive(Debug, Error, PartialEq)]
pub enum ParamSpecError {
    #[error("duplicate parameter: {0}")]
    Duplicate(String),

    #[error("parameter {name}: min {min} is greater than max {max}")]
    InvertedBounds { name: String, min: f64, max: f64 },

    #[error("parameter {0}: bounds are only allowed on numbers")]
    BoundsOnNonNumber(String),

    #[error("parameter {name}: default must be a {kind}")]
    DefaultKind { name: String, kind: ParamKind },

    #[error("parameter {0}: default is outside its bounds")]
    DefaultOutOfBounds(String),
}

/// Errors decoding the arguments of a single call.
#[derive(Debug, Error)]
pub enum ArgumentError {
    #[error("arguments must be a JSON object")]
    NotAnObject,

    #[error("missing required parameter: {0}")]
    Missing(String),

    #[error("parameter {name} must be a {kind}")]
    WrongType { name: String, kind: ParamKind },

    #[error(transparent)]
    Invalid(#[from] serde_json::Error),
}

/// Builder for a tool's parameter list.
///
/// `min`, `max` and `default` modify the most recently added parameter.
#[derive(Debug, Clone, Default)]
pub struct ToolParams {
    params: Vec<ParamSpec>,
}

impl ToolParams {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(mut self, name: &str, kind: ParamKind, description: &str, required: bool) -> Self {
        self.params.push(ParamSpec {
            name: name.to_string(),
            kind,
            description: description.to_string(),
            required,
            default: None,
            min: None,
            max: None,
        });
        self
    }

    fn modify_last(mut self, f: impl FnOnce(&mut ParamSpec)) -> Self {
        if let Some(last) = self.params.last_mut() {
            f(last);
        }
        self
    }

    pub fn string(self, name: &str, description: &str) -> Self {
        self.push(name, ParamKind::String, description, false)
    }

    pub fn required_string(self, name: &str, description: &str) -> Self {
        self.push(name, ParamKind::String, description, true)
    }

    pub fn number(self, name: &str, description: &str) -> Self {
        self.push(name, ParamKind::Number, description, false)
    }

    pub fn required_number(self, name: &str, description: &str) -> Self {
        self.push(name, ParamKind::Number, description, true)
    }

    pub fn boolean(self, name: &str, description: &str) -> Self {
        self.push(name, ParamKind::Boolean, description, false)
    }

    pub fn required_boolean(self, name: &str, description: &str) -> Self {
        self.push(name, ParamKind::Boolean, description, true)
    }

    pub fn string_array(self, name: &str, description: &str) -> Self {
        self.push(name, ParamKind::StringArray, description, false)
    }

    pub fn min(self, min: f64) -> Self {
        self.modify_last(|p| p.min = Some(min))
    }

    pub fn max(self, max: f64) -> Self {
        self.modify_last(|p| p.max = Some(max))
    }

    pub fn default_value(self, value: impl Into<Value>) -> Self {
        let value = value.into();
        self.modify_last(|p| p.default = Some(value))
    }

    /// Zero-indexed `page` and `size`.
    pub fn pagination(self) -> Self {
        self.number("page", "Page number for pagination - page 0 is the first page")
            .min(0.0)
            .default_value(0)
            .number("size", "Number of items per page")
            .default_value(DEFAULT_PAGE_SIZE)
            .max(f64::from(MAX_PAGE_SIZE))
    }

    /// One-indexed `page` and `limit`.
    pub fn page_limit(self) -> Self {
        self.number("page", "Page number for pagination - page 1 is the first page")
            .min(1.0)
            .default_value(1)
            .number("limit", "Number of items per page")
            .default_value(DEFAULT_PAGE_SIZE)
            .max(f64::from(MAX_PAGE_SIZE))
    }

    /// `org_id` and `project_id`, for whichever of the two is not configured.
    pub fn scope(self, defaults: &ScopeDefaults, required: bool) -> Self {
        let mut params = self;
        if defaults.org_id.is_empty() {
            params = params.push(
                "org_id",
                ParamKind::String,
                "The ID of the organization.",
                required,
            );
        }
        if defaults.project_id.is_empty() {
            params = params.push(
                "project_id",
                ParamKind::String,
                "The ID of the project.",
                required,
            );
        }
        params
    }

    /// Validate the declaration.
    pub fn build(self) -> Result<ParamSchema, ParamSpecError> {
        let mut seen = HashSet::new();
        for param in &self.params {
            if !seen.insert(param.name.as_str()) {
                return Err(ParamSpecError::Duplicate(param.name.clone()));
            }
            validate_spec(param)?;
        }
        Ok(ParamSchema {
            params: self.params,
        })
    }
}

fn validate_spec(param: &ParamSpec) -> Result<(), ParamSpecError> {
    let bounded = param.min.is_some() || param.max.is_some();
    if bounded && param.kind != ParamKind::Number {
        return Err(ParamSpecError::BoundsOnNonNumber(param.name.clone()));
    }
    if let (Some(min), Some(max)) = (param.min, param.max) {
        if min > max {
            return Err(ParamSpecError::InvertedBounds {
                name: param.name.clone(),
                min,
                max,
            });
        }
    }

    let Some(default) = &param.default else {
        return Ok(());
    };
    if !param.kind.matches(default) {
        return Err(ParamSpecError::DefaultKind {
            name: param.name.clone(),
            kind: param.kind,
        });
    }
    if let Some(n) = default.as_f64() {
        let below = param.min.is_some_and(|min| n < min);
        let above = param.max.is_some_and(|max| n > max);
        if below || above {
            return Err(ParamSpecError::DefaultOutOfBounds(param.name.clone()));
        }
    }
    Ok(())
}

/// A validated parameter list.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSchema {
    params: Vec<ParamSpec>,
}

impl ParamSchema {
    /// JSON Schema object advertised in `tools/list`.
    pub fn input_schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for param in &self.params {
            let mut property = param.kind.schema();
            if let Some(obj) = property.as_object_mut() {
                obj.insert("description".to_string(), json!(param.description));
                if let Some(default) = &param.default {
                    obj.insert("default".to_string(), default.clone());
                }
                if let Some(min) = param.min {
                    obj.insert("minimum".to_string(), json!(min));
                }
                if let Some(max) = param.max {
                    obj.insert("maximum".to_string(), json!(max));
                }
            }
            properties.insert(param.name.clone(), property);
            if param.required {
                required.push(param.name.clone());
            }
        }

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    /// Decode call arguments into `T`.
    ///
    /// Defaults are filled in, required parameters and declared types are
    /// checked, and integral numbers are normalized to integers. Bounds are
    /// advertised only; listing services clamp page sizes themselves.
    pub fn decode<T: DeserializeOwned>(&self, arguments: Value) -> Result<T, ArgumentError> {
        let mut args = match arguments {
            Value::Null => Map::new(),
            Value::Object(map) => map,
            _ => return Err(ArgumentError::NotAnObject),
        };

        for param in &self.params {
            match args.get(&param.name) {
                None | Some(Value::Null) => {
                    args.remove(&param.name);
                    if let Some(default) = &param.default {
                        args.insert(param.name.clone(), default.clone());
                    } else if param.required {
                        return Err(ArgumentError::Missing(param.name.clone()));
                    }
                }
                Some(value) if !param.kind.matches(value) => {
                    return Err(ArgumentError::WrongType {
                        name: param.name.clone(),
                        kind: param.kind,
                    });
                }
                Some(value) => {
                    if let Some(integral) = integral_number(value) {
                        args.insert(param.name.clone(), integral);
                    }
                }
            }
        }

        Ok(serde_json::from_value(Value::Object(args))?)
    }
}

// Clients often send 5.0 for 5.
fn integral_number(value: &Value) -> Option<Value> {
    let n = value.as_f64()?;
    if value.is_f64() && n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        Some(json!(n as i64))
    } else {
        None
    }
}
