//! # GraphQL Request AST
//!
//! The `graphql_request::ast` module contains the AST of a GraphQL request document together with
//! the functions to build it and the trait to print it. The AST implemented in this crate is
//! specialized to the client-side GraphQL query language that clients use to make requests to a
//! GraphQL service.
//! [Reference](https://spec.graphql.org/October2021/#sec-Language)
//!
//! It's easiest to use this module by importing all of it, however, its three main parts are:
//! - [`ASTContext`], a context containing an arena that defines the lifetime for an AST
//! - the builder functions, e.g. [`document`], [`operation`], [`field`] and [`input_object`]
//! - [`PrintNode`], a trait using which AST Nodes are printed into source text
//!
//! The following workflow describes the minimum that's done using this module and while an AST
//! Context is active in the given scope.
//!
//! ```
//! use graphql_request::ast::*;
//!
//! // Create an AST Context for a document
//! let ctx = ASTContext::new();
//!
//! // Build a Document AST root node
//! let ast = document(
//!     &ctx,
//!     [anonymous_operation(&ctx, OperationKind::Query, [field(&ctx, "field")])],
//! );
//!
//! // Render the Document node to an output String
//! let output = ast.render().unwrap();
//! assert_eq!(output, "query {\n  field\n}");
//! ```

#[allow(clippy::module_inception)]
mod ast;

mod ast_conversion;
mod builder;
mod printer;
mod values;


pub use ast::*;
pub use builder::*;
pub use printer::{ActiveObjects, PrintNode};
pub use values::IntoValue;
