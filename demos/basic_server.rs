//! A transport-free descendant of the teacher's `main.rs`: builds an
//! in-memory schema (the seed scenario 1 shape), runs one query through
//! `execute`, and prints the JSON response. No actix, no database - this
//! core has no network transport of its own (§1 out of scope).

use std::collections::BTreeMap;

use gqlcore::{execute, int_scalar, new_object, new_schema, string_scalar};
use gqlcore::{ExecutorError, ObjectField, Request, ResolveParams, Type, Value};

fn user_object() -> gqlcore::Object {
  let mut fields = BTreeMap::new();
  fields.insert(
    "id".to_owned(),
    ObjectField {
      name: "id".to_owned(),
      field_type: Type::Scalar(int_scalar()),
      description: None,
      arguments: None,
      resolver: None,
    },
  );
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
  fields.insert(
    "email".to_owned(),
    ObjectField {
      name: "email".to_owned(),
      field_type: Type::Scalar(string_scalar()),
      description: None,
      arguments: None,
      resolver: None,
    },
  );
  new_object("User", fields).expect("non-empty name")
}

fn resolve_list(_: &ResolveParams) -> Result<Value, ExecutorError> {
  Ok(Value::List(vec![
    Value::Object(vec![
      ("id".to_owned(), Value::Int(1)),
      ("name".to_owned(), Value::String("Bob".to_owned())),
      ("email".to_owned(), Value::String("bob@example.com".to_owned())),
    ]),
    Value::Object(vec![
      ("id".to_owned(), Value::Int(2)),
      ("name".to_owned(), Value::String("Alice".to_owned())),
      ("email".to_owned(), Value::String("alice@example.com".to_owned())),
    ]),
  ]))
}

fn main() {
  env_logger::init();

  let mut fields = BTreeMap::new();
  fields.insert(
    "list".to_owned(),
    ObjectField {
      name: "list".to_owned(),
      field_type: Type::List(Box::new(Type::Object(user_object()))),
      description: Some("All known users".to_owned()),
      arguments: None,
      resolver: Some(resolve_list),
    },
  );
  let query = new_object("Query", fields).expect("non-empty name");
  let schema = new_schema(Some(query), None, None).expect("at least one root object");

  let result = execute(Request {
    schema: &schema,
    query_text: "{ list { id name } }",
    variables: None,
  });

  println!("{}", serde_json::to_string_pretty(&result.to_json()).unwrap());
}
