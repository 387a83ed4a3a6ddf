//! A GraphQL query execution core: given a programmatically-built schema
//! and a parsed query document, walks the selection set and assembles a
//! response tree of resolved values.
//!
//! Fragments, directives, interfaces, unions, aliases and introspection
//! are out of scope; see `SPEC_FULL.md` for the full component write-up.

pub mod arguments;
pub mod error;
pub mod execute;
pub mod schema;
pub mod subresolve;
pub mod value;
pub mod variables;
pub mod walker;

pub use error::{ErrorLocation, ExecutorError, FieldError};
pub use execute::{execute, ExecutionResult, Request};
pub use schema::{
  bool_scalar, float_scalar, int_scalar, new_list, new_object, new_schema, new_scalar,
  string_scalar, Argument, Object, ObjectField, ResolveParams, ResolverFn, Schema, SchemaError,
  Scalar, Type,
};
pub use value::Value;
