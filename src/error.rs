use std::fmt;

use serde::Serialize;

/// Where a parser-originated error points into the query source text.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ErrorLocation {
  pub line: usize,
  pub col: usize,
}

/// Request-terminal errors: kinds 1-4 of the taxonomy. Returning one of
/// these short-circuits `execute()` and leaves `Result.data` null.
#[derive(Debug, Clone, Serialize)]
pub enum ExecutorError {
  /// Kind 1: the query text did not parse.
  Parse(String),
  /// Kind 2: no single operation definition could be located.
  NoOperation(String),
  /// Kind 3: the request's operation type has no matching root object.
  SchemaMismatch(String),
  /// Kind 4: variable binding failed (missing non-null, bad default, bad JSON shape).
  Variable(String),
}

impl fmt::Display for ExecutorError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ExecutorError::Parse(msg) => write!(f, "parse error: {}", msg),
      ExecutorError::NoOperation(msg) => write!(f, "operation selection error: {}", msg),
      ExecutorError::SchemaMismatch(msg) => write!(f, "schema/operation mismatch: {}", msg),
      ExecutorError::Variable(msg) => write!(f, "variable binding error: {}", msg),
    }
  }
}

impl std::error::Error for ExecutorError {}

/// Field-terminal errors: kinds 5-8. Collected into `Result.errors` with
/// the dotted field path attached; resolution of the offending field
/// yields `null` but sibling fields still resolve.
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
  pub message: String,
  pub path: String,
  pub location: Option<ErrorLocation>,
}

impl FieldError {
  pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
    FieldError {
      message: message.into(),
      path: path.into(),
      location: None,
    }
  }
}

impl fmt::Display for FieldError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} (at {})", self.message, self.path)
  }
}

impl std::error::Error for FieldError {}
