//! The schema model: the programmatic builder surface (`new_object`,
//! `new_list`, `new_scalar`, `new_schema`) a host program uses to describe
//! its queryable types, grounded in `original_source/src/backend/executor.go`'s
//! `Object`/`ObjectField`/`Scalar`/`List`/`NewObject`/`NewList`/`NewScalar`/
//! `NewSchema`. Schema values are built once at startup and shared
//! read-only across every request (§5).

use std::collections::BTreeMap;
use std::fmt;

use crate::error::ExecutorError;
use crate::value::Value;

/// The three declared-type variants this core supports.
#[derive(Clone)]
pub enum Type {
  Scalar(Scalar),
  Object(Object),
  List(Box<Type>),
}

impl Type {
  /// The name used in shape-mismatch error messages.
  pub fn type_name(&self) -> String {
    match self {
      Type::Scalar(s) => s.name.clone(),
      Type::Object(o) => o.name.clone(),
      Type::List(inner) => format!("[{}]", inner.type_name()),
    }
  }
}

impl fmt::Debug for Type {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Type({})", self.type_name())
  }
}

/// `(context, arguments)` threaded into every resolver callback.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolveParams {
  pub context: Value,
  pub arguments: BTreeMap<String, Value>,
}

/// A resolver callback: `(ResolveParams) -> (value, error)`. Plain `fn`
/// pointers suffice here (no closure state is required by this core),
/// matching the teacher's `Resolver<C>` and the Go original's
/// `ResolveFunction` - both are bare function types, not boxed closures.
pub type ResolverFn = fn(&ResolveParams) -> Result<Value, ExecutorError>;

#[derive(Clone)]
pub struct Argument {
  pub name: String,
  pub arg_type: Type,
}

#[derive(Clone)]
pub struct ObjectField {
  pub name: String,
  pub field_type: Type,
  pub description: Option<String>,
  pub arguments: Option<BTreeMap<String, Argument>>,
  pub resolver: Option<ResolverFn>,
}

#[derive(Clone)]
pub struct Object {
  pub name: String,
  pub fields: BTreeMap<String, ObjectField>,
}

#[derive(Clone)]
pub struct Scalar {
  pub name: String,
  pub description: Option<String>,
  pub resolver: ResolverFn,
}

#[derive(Clone, Default)]
pub struct Schema {
  pub query: Option<Object>,
  pub mutation: Option<Object>,
  pub subscription: Option<Object>,
}

/// Errors raised while *constructing* a schema (builder time, not
/// per-request). Matches `Dieff-clacks/src/gqln/base_types.rs`'s
/// `GqlSchemaErr` in spirit: plain enum, `Display` by hand.
#[derive(Debug, Clone)]
pub enum SchemaError {
  EmptyName(&'static str),
  NoRootObject,
}

impl fmt::Display for SchemaError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      SchemaError::EmptyName(of) => write!(f, "{} name must not be empty", of),
      SchemaError::NoRootObject => write!(
        f,
        "a schema must define at least one of Query, Mutation or Subscription"
      ),
    }
  }
}

impl std::error::Error for SchemaError {}

/// Builds an Object type. Fails if `name` is empty (§6).
pub fn new_object(name: &str, fields: BTreeMap<String, ObjectField>) -> Result<Object, SchemaError> {
  if name.is_empty() {
    return Err(SchemaError::EmptyName("object"));
  }
  Ok(Object {
    name: name.to_owned(),
    fields,
  })
}

/// Wraps a type as the payload of a List. The Go original guards against
/// a nil inner type via `log.Fatal`; in Rust `Type` is a concrete enum, so
/// there is no nil value to reject - the type system already makes this
/// failure mode unrepresentable.
pub fn new_list(inner: Type) -> Type {
  Type::List(Box::new(inner))
}

/// Builds a Scalar type. Panics if `name` is empty (§6) - unlike
/// `new_object`, which *may fail* and returns a `Result`, §6 specifies a
/// Scalar with an empty name *fails fatally*, mirroring the Go original's
/// `log.Fatal` in `NewScalar`. This is a programmer error caught at
/// schema-construction time, not a per-request condition, so it is not
/// worth threading through `Result`.
pub fn new_scalar(name: &str, description: Option<&str>, resolver: ResolverFn) -> Scalar {
  if name.is_empty() {
    panic!("scalar name must not be empty");
  }
  Scalar {
    name: name.to_owned(),
    description: description.map(|d| d.to_owned()),
    resolver,
  }
}

/// Builds a Schema. At least one of `query`/`mutation`/`subscription` must
/// be present (§3 invariant).
pub fn new_schema(
  query: Option<Object>,
  mutation: Option<Object>,
  subscription: Option<Object>,
) -> Result<Schema, SchemaError> {
  if query.is_none() && mutation.is_none() && subscription.is_none() {
    return Err(SchemaError::NoRootObject);
  }
  Ok(Schema {
    query,
    mutation,
    subscription,
  })
}

fn extract_int(params: &ResolveParams) -> Result<Value, ExecutorError> {
  match &params.context {
    Value::Int(i) => Ok(Value::Int(*i)),
    Value::Float(f) => Ok(Value::Int(*f as i64)),
    other => Err(ExecutorError::Variable(format!(
      "Int scalar resolver received non-numeric context {:?}",
      other
    ))),
  }
}

fn extract_float(params: &ResolveParams) -> Result<Value, ExecutorError> {
  match &params.context {
    Value::Float(f) => Ok(Value::Float(*f)),
    Value::Int(i) => Ok(Value::Float(*i as f64)),
    other => Err(ExecutorError::Variable(format!(
      "Float scalar resolver received non-numeric context {:?}",
      other
    ))),
  }
}

fn extract_string(params: &ResolveParams) -> Result<Value, ExecutorError> {
  match &params.context {
    Value::String(s) => Ok(Value::String(s.clone())),
    Value::Enum(s) => Ok(Value::String(s.clone())),
    other => Err(ExecutorError::Variable(format!(
      "String scalar resolver received non-string context {:?}",
      other
    ))),
  }
}

fn extract_bool(params: &ResolveParams) -> Result<Value, ExecutorError> {
  match &params.context {
    Value::Boolean(b) => Ok(Value::Boolean(*b)),
    other => Err(ExecutorError::Variable(format!(
      "Bool scalar resolver received non-boolean context {:?}",
      other
    ))),
  }
}

/// The four built-in scalars (§4.8). Each resolver extracts its primitive
/// from whatever `field_value_of` handed it as `Context`.
pub fn int_scalar() -> Scalar {
  new_scalar("Int", Some("GraphQL Int type"), extract_int)
}

pub fn float_scalar() -> Scalar {
  new_scalar("Float", Some("GraphQL Float type"), extract_float)
}

pub fn string_scalar() -> Scalar {
  new_scalar("String", Some("GraphQL String type"), extract_string)
}

pub fn bool_scalar() -> Scalar {
  new_scalar("Bool", Some("GraphQL Bool type"), extract_bool)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn new_object_rejects_empty_name() {
    assert!(new_object("", BTreeMap::new()).is_err());
  }

  #[test]
  #[should_panic(expected = "scalar name must not be empty")]
  fn new_scalar_panics_on_empty_name() {
    new_scalar("", None, extract_int);
  }

  #[test]
  fn new_schema_requires_a_root() {
    assert!(new_schema(None, None, None).is_err());
    let q = new_object("Query", BTreeMap::new()).unwrap();
    assert!(new_schema(Some(q), None, None).is_ok());
  }

  #[test]
  fn int_scalar_truncates_float_context() {
    let params = ResolveParams {
      context: Value::Float(3.0),
      arguments: BTreeMap::new(),
    };
    let scalar = int_scalar();
    assert_eq!((scalar.resolver)(&params).unwrap(), Value::Int(3));
  }
}
