//! # JSON Conversion
//!
//! The `graphql_request::json` module contains utilities to convert from and to `serde_json`
//! values and to wrap a rendered document into the JSON body of a GraphQL request.
//!
//! JSON values can be passed anywhere a value is accepted, since `&serde_json::Value`
//! implements [`IntoValue`](crate::ast::IntoValue). Objects become input objects and arrays
//! become lists.
//!
//! The [ValueFromNode] trait allows conversion to `serde_json` values using a `to_json` method on
//! any given value. This method converts without using any type information.
//!
//! The module otherwise contains:
//!
//! - [ast_from_value_untyped] is used to convert any given JSON value to AST values without
//!   casting.
//! - [value_from_ast_untyped] is used to convert a given AST value to a JSON value while filling
//!   in variables.
//! - [GraphQLRequest] is the `{"query", "operationName", "variables"}` body sent to a GraphQL
//!   service.

#[cfg(feature = "json")]
extern crate serde_json;

#[cfg(feature = "json")]
extern crate serde;

mod conversion;
mod request;
mod values;

pub use conversion::*;
pub use request::*;
pub use values::*;
