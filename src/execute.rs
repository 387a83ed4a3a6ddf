//! The entry point (§4.1): parses the query text, locates the operation,
//! picks the matching root object, binds variables, and walks the root
//! selection set. Grounded in `original_source/src/backend/executor.go`'s
//! `Execute`, with the request/response envelope named after
//! `Dieff-clacks/src/gqln/base_types.rs`'s `GqlRequest`/`GqlResponse`.

use graphql_parser::query::{self, parse_query};
use log::debug;

use crate::error::{ExecutorError, FieldError};
use crate::schema::{Object, Schema};
use crate::value::{value_to_json, Value};
use crate::variables::bind_variables;
use crate::walker::resolve_selection_set;

/// The request envelope (§6): a schema, raw query text, and an optional
/// JSON object of variables.
pub struct Request<'a> {
  pub schema: &'a Schema,
  pub query_text: &'a str,
  pub variables: Option<serde_json::Value>,
}

/// The response envelope (§6): `data` is `None` whenever a request-terminal
/// error (kinds 1-4) occurred; otherwise the assembled response tree.
/// Field-terminal errors (kinds 5-8) are collected into `errors` alongside
/// `data`, not in place of it.
#[derive(Debug, Clone)]
pub struct ExecutionResult {
  pub data: Option<Value>,
  pub errors: Vec<FieldError>,
}

impl ExecutionResult {
  fn failure(err: ExecutorError) -> Self {
    ExecutionResult {
      data: None,
      errors: vec![FieldError::new("", err.to_string())],
    }
  }

  /// Renders the `{ "data": ..., "errors": [...] }` envelope (§6).
  pub fn to_json(&self) -> serde_json::Value {
    let data = match &self.data {
      Some(v) => value_to_json(v),
      None => serde_json::Value::Null,
    };
    let errors = if self.errors.is_empty() {
      serde_json::Value::Null
    } else {
      serde_json::Value::Array(
        self
          .errors
          .iter()
          .map(|e| {
            serde_json::json!({
              "message": e.message,
              "location": e.location.as_ref().map(|l| serde_json::json!({
                "line": l.line,
                "col": l.col,
              })),
            })
          })
          .collect(),
      )
    };
    serde_json::json!({ "data": data, "errors": errors })
  }
}

/// Picks the single operation definition out of the document (§4.1 step 2,
/// design note 5: no operation-name selection is performed - the first
/// operation found wins).
fn locate_operation(document: &query::Document) -> Option<&query::OperationDefinition> {
  document.definitions.iter().find_map(|def| match def {
    query::Definition::Operation(op) => Some(op),
    query::Definition::Fragment(_) => None,
  })
}

struct OperationParts<'a> {
  variable_definitions: &'a [query::VariableDefinition],
  selection_set: &'a query::SelectionSet,
  root_kind: &'static str,
}

fn operation_parts(op: &query::OperationDefinition) -> OperationParts<'_> {
  match op {
    // The shorthand `{ ... }` form carries no variable definitions and is
    // always a query.
    query::OperationDefinition::SelectionSet(s) => OperationParts {
      variable_definitions: &[],
      selection_set: s,
      root_kind: "query",
    },
    query::OperationDefinition::Query(q) => OperationParts {
      variable_definitions: &q.variable_definitions,
      selection_set: &q.selection_set,
      root_kind: "query",
    },
    query::OperationDefinition::Mutation(m) => OperationParts {
      variable_definitions: &m.variable_definitions,
      selection_set: &m.selection_set,
      root_kind: "mutation",
    },
    // Design note 6: subscriptions are treated as a one-shot resolve,
    // identical in shape to a query, for parity with the source.
    query::OperationDefinition::Subscription(s) => OperationParts {
      variable_definitions: &s.variable_definitions,
      selection_set: &s.selection_set,
      root_kind: "subscription",
    },
  }
}

fn root_object_for<'a>(schema: &'a Schema, root_kind: &str) -> Option<&'a Object> {
  match root_kind {
    "query" => schema.query.as_ref(),
    "mutation" => schema.mutation.as_ref(),
    "subscription" => schema.subscription.as_ref(),
    _ => None,
  }
}

/// Runs one request to completion (§4.1).
pub fn execute(request: Request) -> ExecutionResult {
  debug!("execute: {} byte query", request.query_text.len());

  let document = match parse_query(request.query_text) {
    Ok(doc) => doc,
    Err(err) => return ExecutionResult::failure(ExecutorError::Parse(err.to_string())),
  };

  let operation = match locate_operation(&document) {
    Some(op) => op,
    None => {
      return ExecutionResult::failure(ExecutorError::NoOperation(
        "no operation definition found in document".to_owned(),
      ))
    }
  };

  let parts = operation_parts(operation);

  let root_object = match root_object_for(request.schema, parts.root_kind) {
    Some(obj) => obj,
    None => {
      return ExecutionResult::failure(ExecutorError::SchemaMismatch(format!(
        "schema does not define this operation type ('{}')",
        parts.root_kind
      )))
    }
  };

  let global_vars = match bind_variables(parts.variable_definitions, request.variables) {
    Ok(vars) => vars,
    Err(err) => return ExecutionResult::failure(err),
  };

  let mut errors = Vec::new();
  let data = resolve_selection_set(
    &global_vars,
    parts.selection_set,
    &root_object.fields,
    None,
    "",
    &mut errors,
  );

  ExecutionResult {
    data: Some(Value::Object(data)),
    errors,
  }
}
