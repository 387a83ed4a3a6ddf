//! The value model: a single tagged union that carries GraphQL literals
//! from the query AST, resolver arguments, and resolved response data
//! through the whole executor.
//!
//! Two variants exist purely inside the executor and are never produced
//! by the parser: `Map` and `Identity`. They exist to carry two of the
//! source's documented quirks (see `subresolve::check_shape` and
//! `subresolve::field_value_of`) without collapsing them into the plain
//! `Object` variant, which is what ordinary resolvers return.
//!
//! `Object`/`Map` are a `Vec` of entries, not a `BTreeMap`: §5's ordering
//! guarantee requires selection order to survive into the response tree,
//! and a sorted map would alphabetize it instead.

use graphql_parser::query;
use serde_json::{Map as JsonMap, Number as JsonNumber, Value as JsonValue};

use crate::error::ExecutorError;
use crate::schema::ResolveParams;

pub type Entries = Vec<(String, Value)>;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
  Null,
  Int(i64),
  Float(f64),
  String(String),
  Boolean(bool),
  Enum(String),
  List(Vec<Value>),
  /// A record: what resolvers normally return for an Object-typed field.
  Object(Entries),
  /// A bare map. Distinct from `Object` only so the "mapping accepted
  /// where List is expected" anomaly (design note 2) can be triggered
  /// deliberately without also being the shape every resolver returns.
  Map(Entries),
  /// The synthetic return of the identity default resolver (design note
  /// 4): wraps the whole `ResolveParams` it was handed. Shape-checks as
  /// a record, but never yields a named field.
  Identity(Box<ResolveParams>),
}

impl Value {
  pub fn as_str(&self) -> Option<&str> {
    match self {
      Value::String(s) => Some(s),
      _ => None,
    }
  }

  /// Looks a key up in an `Object`/`Map` record. Anything else has no
  /// named members.
  pub fn field(&self, key: &str) -> Option<&Value> {
    match self {
      Value::Object(entries) | Value::Map(entries) => {
        entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
      }
      _ => None,
    }
  }
}

/// Converts a query-AST literal into our internal `Value`.
///
/// `Variable` references are rejected here: callers that need to resolve a
/// variable reference handle `Value::Variable` themselves before reaching
/// this conversion (see `arguments::bind_arguments`); anywhere else a bare
/// `Variable` literal is a type error.
pub fn literal_to_value(lit: &query::Value) -> Result<Value, ExecutorError> {
  match lit {
    query::Value::Variable(name) => Err(ExecutorError::Variable(format!(
      "variable reference ${} is not a constant literal",
      name
    ))),
    query::Value::Int(n) => Ok(Value::Int(n.as_i64().unwrap_or_default())),
    query::Value::Float(f) => Ok(Value::Float(*f)),
    query::Value::String(s) => Ok(Value::String(s.clone())),
    query::Value::Boolean(b) => Ok(Value::Boolean(*b)),
    query::Value::Null => Ok(Value::Null),
    query::Value::Enum(e) => Ok(Value::Enum(e.clone())),
    query::Value::List(items) => {
      let converted = items
        .iter()
        .map(literal_to_value)
        .collect::<Result<Vec<_>, _>>()?;
      Ok(Value::List(converted))
    }
    query::Value::Object(obj) => {
      let mut entries = Vec::with_capacity(obj.len());
      for (k, v) in obj.iter() {
        entries.push((k.clone(), literal_to_value(v)?));
      }
      Ok(Value::Object(entries))
    }
  }
}

/// Converts a `serde_json::Value` (a request's raw `variables` payload)
/// into our internal `Value`. Mirrors the teacher's `json_to_gql`.
pub fn json_to_value(value: JsonValue) -> Value {
  match value {
    JsonValue::Null => Value::Null,
    JsonValue::Bool(b) => Value::Boolean(b),
    JsonValue::Number(n) => {
      if let Some(i) = n.as_i64() {
        Value::Int(i)
      } else {
        Value::Float(n.as_f64().unwrap_or_default())
      }
    }
    JsonValue::String(s) => Value::String(s),
    JsonValue::Array(items) => Value::List(items.into_iter().map(json_to_value).collect()),
    JsonValue::Object(obj) => {
      let entries = obj.into_iter().map(|(k, v)| (k, json_to_value(v))).collect();
      Value::Object(entries)
    }
  }
}

/// Converts a resolved `Value` into JSON for the response tree.
/// `Identity` should never survive to this point in a well-formed
/// resolution (it is consumed inside `subresolve`); encountering one here
/// is a field-terminal condition upstream, not something this function
/// needs to special-case - it serializes defensively so a stray one never
/// panics the response encoder.
pub fn value_to_json(value: &Value) -> JsonValue {
  match value {
    Value::Null => JsonValue::Null,
    Value::Boolean(b) => JsonValue::Bool(*b),
    Value::Int(i) => JsonValue::Number(JsonNumber::from(*i)),
    Value::Float(f) => JsonNumber::from_f64(*f)
      .map(JsonValue::Number)
      .unwrap_or(JsonValue::Null),
    Value::String(s) => JsonValue::String(s.clone()),
    Value::Enum(e) => JsonValue::String(e.clone()),
    Value::List(items) => JsonValue::Array(items.iter().map(value_to_json).collect()),
    Value::Object(entries) | Value::Map(entries) => {
      let mut out = JsonMap::new();
      for (k, v) in entries.iter() {
        out.insert(k.clone(), value_to_json(v));
      }
      JsonValue::Object(out)
    }
    Value::Identity(_) => JsonValue::Null,
  }
}
