//! Selection-set walking (§4.5): for each selected field, either invokes
//! its resolver (root level) or reuses already-resolved parent data (a
//! sub-selection under a List/Object field), then hands the result to
//! `subresolve::resolve_sub_field` for type-directed sub-resolution.
//!
//! Grounded in `original_source/src/backend/executor.go`'s
//! `resolveSelectionSet`/`resolveField`, with `Result.errors` collection
//! (§7) standing in for the Go original's silently-dropped field errors -
//! design note 3 is deliberately not preserved.

use std::collections::BTreeMap;

use graphql_parser::query;
use log::trace;

use crate::arguments::{bind_arguments, validate_arguments};
use crate::error::FieldError;
use crate::schema::{ObjectField, ResolveParams};
use crate::subresolve::{check_shape, resolve_sub_field};
use crate::value::{Entries, Value};
use crate::variables::GlobalVariables;

fn field_path(parent_path: &str, field_name: &str) -> String {
  if parent_path.is_empty() {
    field_name.to_owned()
  } else {
    format!("{}.{}", parent_path, field_name)
  }
}

/// Resolves one selected field (§4.5).
///
/// `parent_data`:
/// - `None` - this is a root-level field. Its own resolver (or the
///   identity default, design note 4, when none is declared) is invoked.
/// - `Some(data)` - this field is a sub-selection under a List/Object
///   field whose own resolver already produced `data`; no resolver call
///   happens here; `data` is reused directly as the value to sub-resolve.
fn resolve_field(
  global_vars: &GlobalVariables,
  field: &query::Field,
  object_field: &ObjectField,
  parent_data: Option<&Value>,
  path: &str,
  errors: &mut Vec<FieldError>,
) -> Value {
  trace!("resolve_field: {}", path);

  // §4.5 steps 3-4: argument binding, resolver invocation, and the shape
  // check all happen only when there is no already-resolved parent value
  // to reuse. When `parent_data` is `Some`, it is reused as-is.
  let resolved = match parent_data {
    Some(data) => data.clone(),
    None => {
      let arguments = match bind_arguments(global_vars, &field.arguments) {
        Ok(a) => a,
        Err(msg) => {
          errors.push(FieldError::new(path, msg));
          return Value::Null;
        }
      };
      if let Err(msg) = validate_arguments(&arguments, object_field.arguments.as_ref()) {
        errors.push(FieldError::new(path, msg));
        return Value::Null;
      }

      let resolved = match object_field.resolver {
        Some(resolver) => {
          let params = ResolveParams {
            context: Value::Null,
            arguments,
          };
          match resolver(&params) {
            Ok(value) => value,
            Err(err) => {
              errors.push(FieldError::new(path, err.to_string()));
              return Value::Null;
            }
          }
        }
        // Design note 4: no resolver declared, so the field resolves to
        // the whole `ResolveParams` it would have been handed.
        None => Value::Identity(Box::new(ResolveParams {
          context: Value::Null,
          arguments,
        })),
      };

      if let Err(msg) = check_shape(&resolved, &object_field.field_type) {
        errors.push(FieldError::new(path, msg));
        return Value::Null;
      }

      resolved
    }
  };

  resolve_sub_field(
    global_vars,
    &field.selection_set,
    object_field,
    &object_field.field_type,
    resolved,
    path,
    errors,
  )
}

/// Walks every selected field in `selection_set` against `declared_fields`
/// (§4.5), producing an ordered record of the results. Errors for
/// individual fields are pushed to `errors` and the field resolves to
/// `Null` (§7); an unknown field name is itself a field-terminal error
/// rather than aborting the whole selection set.
pub fn resolve_selection_set(
  global_vars: &GlobalVariables,
  selection_set: &query::SelectionSet,
  declared_fields: &BTreeMap<String, ObjectField>,
  parent_data: Option<&Value>,
  parent_path: &str,
  errors: &mut Vec<FieldError>,
) -> Entries {
  let mut out = Vec::new();
  for selection in &selection_set.items {
    let field = match selection {
      query::Selection::Field(f) => f,
      // Fragments and directives are out of scope for this executor.
      _ => continue,
    };
    // Aliases are not part of this executor's supported query shape (§6);
    // the response key is always the field's own name.
    let response_key = field.name.clone();
    let path = field_path(parent_path, &response_key);

    let object_field = match declared_fields.get(&field.name) {
      Some(f) => f,
      None => {
        errors.push(FieldError::new(
          &path,
          format!("field '{}' is not defined on this type", field.name),
        ));
        out.push((response_key, Value::Null));
        continue;
      }
    };

    let value = resolve_field(global_vars, field, object_field, parent_data, &path, errors);
    out.push((response_key, value));
  }
  out
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::schema::{int_scalar, new_object, Type};
  use graphql_parser::parse_query;

  fn doc_selection_set(src: &str) -> query::SelectionSet {
    let doc = parse_query(src).unwrap();
    for def in doc.definitions {
      if let query::Definition::Operation(query::OperationDefinition::Query(q)) = def {
        return q.selection_set;
      }
      if let query::Definition::Operation(query::OperationDefinition::SelectionSet(s)) = def {
        return s;
      }
    }
    panic!("no operation found");
  }

  #[test]
  fn unknown_field_is_a_field_terminal_error_not_an_abort() {
    let mut fields = BTreeMap::new();
    fields.insert(
      "known".to_owned(),
      ObjectField {
        name: "known".to_owned(),
        field_type: Type::Scalar(int_scalar()),
        description: None,
        arguments: None,
        resolver: None,
      },
    );
    let object = new_object("Query", fields).unwrap();
    let selection_set = doc_selection_set("{ missing known }");
    let global = GlobalVariables::default();
    let mut errors = Vec::new();
    let out = resolve_selection_set(&global, &selection_set, &object.fields, None, "", &mut errors);
    assert_eq!(out.len(), 2);
    assert_eq!(out[0].0, "missing");
    assert_eq!(out[1].0, "known");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].path, "missing");
  }

  #[test]
  fn selection_order_is_preserved_in_the_output() {
    let mut fields = BTreeMap::new();
    fields.insert(
      "b".to_owned(),
      ObjectField {
        name: "b".to_owned(),
        field_type: Type::Scalar(int_scalar()),
        description: None,
        arguments: None,
        resolver: Some(|_| Ok(Value::Int(2))),
      },
    );
    fields.insert(
      "a".to_owned(),
      ObjectField {
        name: "a".to_owned(),
        field_type: Type::Scalar(int_scalar()),
        description: None,
        arguments: None,
        resolver: Some(|_| Ok(Value::Int(1))),
      },
    );
    let object = new_object("Query", fields).unwrap();
    let selection_set = doc_selection_set("{ b a }");
    let global = GlobalVariables::default();
    let mut errors = Vec::new();
    let out = resolve_selection_set(&global, &selection_set, &object.fields, None, "", &mut errors);
    assert_eq!(
      out,
      vec![("b".to_owned(), Value::Int(2)), ("a".to_owned(), Value::Int(1))]
    );
    assert!(errors.is_empty());
  }
}
