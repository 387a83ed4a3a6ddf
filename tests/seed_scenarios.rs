//! End-to-end coverage of the executor's seed scenarios and universal
//! properties, built against the public `gqlcore` surface the way a host
//! application would use it.

use std::collections::BTreeMap;

use gqlcore::{
  execute, int_scalar, new_object, new_schema, string_scalar, ExecutorError, ObjectField,
  ResolveParams, Schema, Type, Value, Request,
};

fn echo_resolver(params: &ResolveParams) -> Result<Value, ExecutorError> {
  params
    .arguments
    .get("n")
    .or_else(|| params.arguments.get("id"))
    .cloned()
    .ok_or_else(|| ExecutorError::Variable("echo requires an 'n' or 'id' argument".to_owned()))
}

fn echo_schema() -> Schema {
  let mut arguments = BTreeMap::new();
  arguments.insert(
    "n".to_owned(),
    gqlcore::Argument {
      name: "n".to_owned(),
      arg_type: Type::Scalar(int_scalar()),
    },
  );
  arguments.insert(
    "id".to_owned(),
    gqlcore::Argument {
      name: "id".to_owned(),
      arg_type: Type::Scalar(int_scalar()),
    },
  );

  let mut fields = BTreeMap::new();
  fields.insert(
    "echo".to_owned(),
    ObjectField {
      name: "echo".to_owned(),
      field_type: Type::Scalar(int_scalar()),
      description: None,
      arguments: Some(arguments),
      resolver: Some(echo_resolver),
    },
  );
  let query = new_object("Query", fields).unwrap();
  new_schema(Some(query), None, None).unwrap()
}

#[test]
fn seed_scenario_two_variable_with_default() {
  let schema = echo_schema();
  let result = execute(Request {
    schema: &schema,
    query_text: "query($n: Int = 5) { echo(n: $n) }",
    variables: None,
  });
  assert!(result.errors.is_empty());
  let json = result.to_json();
  assert_eq!(json["data"]["echo"], serde_json::json!(5));
}

#[test]
fn seed_scenario_five_numeric_coercion() {
  let schema = echo_schema();
  let result = execute(Request {
    schema: &schema,
    query_text: "query($id: Int!) { echo(id:$id) }",
    variables: Some(serde_json::json!({"id": 2.0})),
  });
  assert!(result.errors.is_empty());
  let json = result.to_json();
  assert_eq!(json["data"]["echo"], serde_json::json!(2));
}

#[test]
fn numeric_coercion_is_idempotent_between_int_and_float_input() {
  let schema = echo_schema();
  let as_int = execute(Request {
    schema: &schema,
    query_text: "query($id: Int!) { echo(id:$id) }",
    variables: Some(serde_json::json!({"id": 3})),
  })
  .to_json();
  let as_float = execute(Request {
    schema: &schema,
    query_text: "query($id: Int!) { echo(id:$id) }",
    variables: Some(serde_json::json!({"id": 3.0})),
  })
  .to_json();
  assert_eq!(as_int["data"], as_float["data"]);
}

#[test]
fn schema_is_immutable_across_repeated_requests() {
  let schema = echo_schema();
  let first = execute(Request {
    schema: &schema,
    query_text: "query($n: Int = 5) { echo(n: $n) }",
    variables: None,
  })
  .to_json();
  let second = execute(Request {
    schema: &schema,
    query_text: "query($n: Int = 5) { echo(n: $n) }",
    variables: None,
  })
  .to_json();
  assert_eq!(first, second);
}

fn user_object() -> gqlcore::Object {
  let mut fields = BTreeMap::new();
  fields.insert(
    "name".to_owned(),
    ObjectField {
      name: "name".to_owned(),
      field_type: Type::Scalar(string_scalar()),
      description: None,
      arguments: None,
      resolver: None,
    },
  );
  new_object("User", fields).unwrap()
}

#[test]
fn list_typed_field_length_matches_resolver_return() {
  fn users_resolver(_: &ResolveParams) -> Result<Value, ExecutorError> {
    Ok(Value::List(vec![
      Value::Object(vec![("name".to_owned(), Value::String("Bob".to_owned()))]),
      Value::Object(vec![("name".to_owned(), Value::String("Alice".to_owned()))]),
      Value::Object(vec![("name".to_owned(), Value::String("Carol".to_owned()))]),
    ]))
  }
  let mut fields = BTreeMap::new();
  fields.insert(
    "users".to_owned(),
    ObjectField {
      name: "users".to_owned(),
      field_type: Type::List(Box::new(Type::Object(user_object()))),
      description: None,
      arguments: None,
      resolver: Some(users_resolver),
    },
  );
  let query = new_object("Query", fields).unwrap();
  let schema = new_schema(Some(query), None, None).unwrap();

  let result = execute(Request {
    schema: &schema,
    query_text: "{ users { name } }",
    variables: None,
  });
  let json = result.to_json();
  assert_eq!(json["data"]["users"].as_array().unwrap().len(), 3);
}

#[test]
fn map_is_anomalously_accepted_where_a_list_is_declared() {
  fn mapping_resolver(_: &ResolveParams) -> Result<Value, ExecutorError> {
    Ok(Value::Map(vec![
      ("first".to_owned(), Value::Object(vec![("name".to_owned(), Value::String("Bob".to_owned()))])),
      ("second".to_owned(), Value::Object(vec![("name".to_owned(), Value::String("Alice".to_owned()))])),
    ]))
  }
  let mut fields = BTreeMap::new();
  fields.insert(
    "users".to_owned(),
    ObjectField {
      name: "users".to_owned(),
      field_type: Type::List(Box::new(Type::Object(user_object()))),
      description: None,
      arguments: None,
      resolver: Some(mapping_resolver),
    },
  );
  let query = new_object("Query", fields).unwrap();
  let schema = new_schema(Some(query), None, None).unwrap();

  let result = execute(Request {
    schema: &schema,
    query_text: "{ users { name } }",
    variables: None,
  });
  assert!(result.errors.is_empty());
  let json = result.to_json();
  assert_eq!(json["data"]["users"].as_array().unwrap().len(), 2);
}
