//! Declarative request validation.
//!
//! A rule set is an ordered list of [`FieldRule`]s. Each rule names one input
//! (a path parameter or a body field) and carries a chain of [`Check`]s. Every
//! check of every rule is evaluated, so a single request reports all of its
//! violations at once, in declaration order.
//!
//! Inputs are coerced to text before most checks run: a missing value or
//! `null` is `""`, numbers use their decimal form and booleans become
//! `"true"`/`"false"`. This is why `"100"` satisfies [`Check::Numeric`] and an
//! absent field fails [`Check::NotEmpty`].

use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::OnceLock;
use utoipa::ToSchema;

/// Where a validated value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Params,
    Body,
}

/// One failed check, as reported to the client.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct FieldError {
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub value: Option<Value>,
    pub msg: String,
    pub path: String,
    pub location: Location,
}

impl FieldError {
    pub fn new(location: Location, path: &str, value: Option<Value>, msg: &str) -> Self {
        Self {
            kind: "field",
            value,
            msg: msg.to_string(),
            path: path.to_string(),
            location,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Check {
    NotEmpty,
    MinLength(usize),
    MaxLength(usize),
    Numeric,
    Integer,
    Boolean,
    /// Greater than zero, compared numerically.
    Positive,
}

impl Check {
    pub fn passes(self, value: Option<&Value>) -> bool {
        match self {
            Check::NotEmpty => !coerce_to_string(value).is_empty(),
            Check::MinLength(min) => coerce_to_string(value).chars().count() >= min,
            Check::MaxLength(max) => coerce_to_string(value).chars().count() <= max,
            Check::Numeric => numeric_re().is_match(&coerce_to_string(value)),
            Check::Integer => integer_re().is_match(&coerce_to_string(value)),
            Check::Boolean => matches!(
                coerce_to_string(value).as_str(),
                "true" | "false" | "1" | "0"
            ),
            Check::Positive => is_positive(value),
        }
    }
}

/// Checks for a single input, evaluated in order.
#[derive(Debug, Clone)]
pub struct FieldRule {
    pub location: Location,
    pub field: &'static str,
    pub optional: bool,
    pub checks: Vec<(Check, &'static str)>,
}

impl FieldRule {
    pub fn param(field: &'static str) -> Self {
        Self {
            location: Location::Params,
            field,
            optional: false,
            checks: Vec::new(),
        }
    }

    pub fn body(field: &'static str) -> Self {
        Self {
            location: Location::Body,
            field,
            optional: false,
            checks: Vec::new(),
        }
    }

    /// Skip every check when the input is absent.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn check(mut self, check: Check, msg: &'static str) -> Self {
        self.checks.push((check, msg));
        self
    }

    pub fn not_empty(self, msg: &'static str) -> Self {
        self.check(Check::NotEmpty, msg)
    }

    pub fn min_length(self, min: usize, msg: &'static str) -> Self {
        self.check(Check::MinLength(min), msg)
    }

    pub fn max_length(self, max: usize, msg: &'static str) -> Self {
        self.check(Check::MaxLength(max), msg)
    }

    pub fn numeric(self, msg: &'static str) -> Self {
        self.check(Check::Numeric, msg)
    }

    pub fn integer(self, msg: &'static str) -> Self {
        self.check(Check::Integer, msg)
    }

    pub fn boolean(self, msg: &'static str) -> Self {
        self.check(Check::Boolean, msg)
    }

    pub fn positive(self, msg: &'static str) -> Self {
        self.check(Check::Positive, msg)
    }
}

/// Raw request input the rules are evaluated against.
#[derive(Debug, Clone, Default)]
pub struct RequestInput {
    pub params: HashMap<String, String>,
    pub body: Map<String, Value>,
}

impl RequestInput {
    pub fn get(&self, location: Location, field: &str) -> Option<Value> {
        match location {
            Location::Params => self.params.get(field).map(|s| Value::String(s.clone())),
            Location::Body => self.body.get(field).cloned(),
        }
    }

    pub fn param(&self, field: &str) -> Option<&str> {
        self.params.get(field).map(String::as_str)
    }

    pub fn body_field(&self, field: &str) -> Option<&Value> {
        self.body.get(field)
    }
}

pub struct RequestValidator;

impl RequestValidator {
    /// Evaluate every rule and return all violations in declaration order.
    pub fn validate(input: &RequestInput, rules: &[FieldRule]) -> Vec<FieldError> {
        let mut errors = Vec::new();
        for rule in rules {
            let value = input.get(rule.location, rule.field);
            if rule.optional && value.is_none() {
                continue;
            }
            for (check, msg) in &rule.checks {
                if !check.passes(value.as_ref()) {
                    errors.push(FieldError::new(rule.location, rule.field, value.clone(), msg));
                }
            }
        }
        errors
    }
}

/// Text form of a JSON value as seen by the string checks.
pub fn coerce_to_string(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(other) => other.to_string(),
    }
}

/// Numeric reading of a value that passed [`Check::Numeric`].
pub fn coerce_to_f64(value: Option<&Value>) -> Option<f64> {
    match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        Some(Value::Bool(b)) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

/// Boolean reading of a value that passed [`Check::Boolean`].
pub fn coerce_to_bool(value: Option<&Value>) -> Option<bool> {
    match coerce_to_string(value).as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

fn is_positive(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Number(_)) | Some(Value::String(_)) | Some(Value::Bool(_)) => {
            coerce_to_f64(value).is_some_and(|n| n > 0.0)
        }
        _ => false,
    }
}

fn numeric_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[+-]?([0-9]*[.])?[0-9]+$").expect("valid numeric pattern"))
}

fn integer_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[-+]?([1-9][0-9]*|0)$").expect("valid integer pattern"))
}
