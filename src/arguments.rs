//! The argument binder (§4.3) and argument validation (§4.4).
//!
//! Both return a plain `String` error: the walker is the one that knows
//! the current field path, so it wraps these into a `FieldError` there
//! (§7: argument binding errors are field-terminal, kind 5).

use std::collections::BTreeMap;

use graphql_parser::query;

use crate::schema::Argument;
use crate::value::{literal_to_value, Value};
use crate::variables::GlobalVariables;

/// Resolves a field's syntactic arguments to concrete values.
///
/// Quirk (design note 1, preserved on purpose): a `Variable` argument
/// value is looked up in `global_vars` by the **argument's own name**,
/// not by the variable name the AST actually carries. `field(foo: $bar)`
/// only works if the bound variable is itself named `foo`.
pub fn bind_arguments(
  global_vars: &GlobalVariables,
  arguments: &[(String, query::Value)],
) -> Result<BTreeMap<String, Value>, String> {
  let mut bound = BTreeMap::new();
  for (name, value) in arguments {
    match value {
      query::Value::Variable(_) => {
        let resolved = global_vars
          .query_variables_map
          .get(name)
          .ok_or_else(|| format!("argument references undefined variable ${}", name))?;
        bound.insert(name.clone(), resolved.clone());
      }
      literal => {
        let value = literal_to_value(literal)
          .map_err(|_| "argument type assertion failed".to_owned())?;
        bound.insert(name.clone(), value);
      }
    }
  }
  Ok(bound)
}

/// Every key present in `input` must be declared on the field; missing
/// declared arguments are permitted (§4.4).
pub fn validate_arguments(
  input: &BTreeMap<String, Value>,
  declared: Option<&BTreeMap<String, Argument>>,
) -> Result<(), String> {
  let declared = declared.cloned().unwrap_or_default();
  for name in input.keys() {
    if !declared.contains_key(name) {
      return Err(format!("input argument '{}' does not defined in schema", name));
    }
  }
  Ok(())
}
