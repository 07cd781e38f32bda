//! Runtime values
//!
//! Values flow between the caller, the operation plugins, and the display
//! layer: numbers from the numeric path, expressions from the symbolic path,
//! objects for compound results ({determinant, adjugate}, {L, U, P}), and
//! errors, which propagate instead of panicking.

use crate::render::{format_number, RenderOptions};
use crate::{CalcError, Expr, Term};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Runtime value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Value {
    Number(f64),
    Text(String),
    Bool(bool),
    Expr(Expr),
    Object(HashMap<String, Value>),
    List(Vec<Value>),
    Null,
    Error(CalcError),
}

impl Value {
    // ========== Safe Accessors (never panic) ==========

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_expr(&self) -> Option<&Expr> {
        match self {
            Value::Expr(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&HashMap<String, Value>> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_error(&self) -> Option<&CalcError> {
        match self {
            Value::Error(e) => Some(e),
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    // ========== Object Field Access ==========

    /// Get field from object. Returns Error value if not found or not an object.
    pub fn get(&self, key: &str) -> Value {
        match self {
            Value::Object(map) => map.get(key).cloned().unwrap_or_else(|| {
                Value::Error(CalcError::domain_error(format!("no field '{}'", key)))
            }),
            Value::Error(e) => Value::Error(e.clone()),
            _ => Value::Error(CalcError::type_error("Object", self.type_name())),
        }
    }

    /// Type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "Number",
            Value::Text(_) => "Text",
            Value::Bool(_) => "Bool",
            Value::Expr(_) => "Expr",
            Value::Object(_) => "Object",
            Value::List(_) => "List",
            Value::Null => "Null",
            Value::Error(_) => "Error",
        }
    }

    /// Display text with explicit formatting settings (the `Display` impl
    /// uses the defaults).
    pub fn render(&self, opts: &RenderOptions) -> String {
        match self {
            Value::Number(n) => format_number(*n, opts),
            Value::Text(s) => s.clone(),
            Value::Bool(b) => b.to_string(),
            Value::Expr(e) => e.render(),
            Value::Object(map) => {
                let mut keys: Vec<&String> = map.keys().collect();
                keys.sort();
                let fields: Vec<String> = keys
                    .into_iter()
                    .map(|k| format!("{}: {}", k, map[k].render(opts)))
                    .collect();
                format!("{{{}}}", fields.join(", "))
            }
            Value::List(items) => {
                let parts: Vec<String> = items.iter().map(|v| v.render(opts)).collect();
                format!("[{}]", parts.join(", "))
            }
            Value::Null => "null".to_string(),
            Value::Error(e) => e.to_string(),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render(&RenderOptions::default()))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Value {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Value {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Value {
        Value::Text(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Value {
        Value::Bool(b)
    }
}

impl From<Expr> for Value {
    fn from(e: Expr) -> Value {
        Value::Expr(e)
    }
}

impl From<Term> for Value {
    fn from(t: Term) -> Value {
        Value::Expr(t.into())
    }
}

impl From<CalcError> for Value {
    fn from(e: CalcError) -> Value {
        Value::Error(e)
    }
}
