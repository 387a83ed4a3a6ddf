//! The variable binder (§4.2): coerces the client-supplied variable bag
//! against the operation's `VariableDefinition`s, applying defaults and
//! non-null checks.

use std::collections::BTreeMap;

use graphql_parser::query;
use serde_json::{Map as JsonMap, Value as JsonValue};

use crate::error::ExecutorError;
use crate::value::{json_to_value, literal_to_value, Value};

/// The per-request, read-only variable environment (§3).
#[derive(Debug, Clone, Default)]
pub struct GlobalVariables {
  pub query_variables_map: BTreeMap<String, Value>,
}

fn named_type(t: &query::Type) -> Option<&str> {
  match t {
    query::Type::NamedType(name) => Some(name.as_str()),
    _ => None,
  }
}

fn is_non_null(t: &query::Type) -> bool {
  matches!(t, query::Type::NonNullType(_))
}

/// `T` or its NonNull inner type is the built-in `Int` scalar.
fn names_builtin_int(t: &query::Type) -> bool {
  let named = match t {
    query::Type::NonNullType(inner) => named_type(inner),
    other => named_type(other),
  };
  named == Some("Int")
}

fn coerce_for_type(value: Value, var_type: &query::Type) -> Value {
  if names_builtin_int(var_type) {
    match value {
      Value::Float(f) => Value::Int(f as i64),
      other => other,
    }
  } else {
    value
  }
}

pub fn bind_variables(
  variable_definitions: &[query::VariableDefinition],
  variables: Option<JsonValue>,
) -> Result<GlobalVariables, ExecutorError> {
  let supplied: JsonMap<String, JsonValue> = match variables {
    Some(JsonValue::Object(map)) => map,
    None => JsonMap::new(),
    Some(other) => {
      return Err(ExecutorError::Variable(format!(
        "request variables must be a JSON object, got {}",
        other
      )))
    }
  };

  let mut bound = BTreeMap::new();
  for def in variable_definitions {
    if let Some(raw) = supplied.get(&def.name) {
      let value = json_to_value(raw.clone());
      bound.insert(def.name.clone(), coerce_for_type(value, &def.var_type));
      continue;
    }

    if is_non_null(&def.var_type) {
      return Err(ExecutorError::Variable(format!(
        "variable '{}' is NonNullType '{}!' and was not provided",
        def.name,
        named_type(match &def.var_type {
          query::Type::NonNullType(inner) => inner,
          other => other,
        })
        .unwrap_or("?")
      )));
    }

    if let Some(default) = &def.default_value {
      let value = literal_to_value(default).map_err(|_| {
        ExecutorError::Variable(format!(
          "default value for variable '{}' must be a constant literal",
          def.name
        ))
      })?;
      bound.insert(def.name.clone(), value);
    }
    // else: nullable, no default, omitted entirely from the map.
  }

  Ok(GlobalVariables {
    query_variables_map: bound,
  })
}
