//! `graphql_request`
//! =========
//!
//! _Fast and easy building of GraphQL request documents._
//!
//! The **`graphql_request`** library follows two goals:
//!
//! - To support a pleasant-to-use API for composing GraphQL requests in code
//! - To always print those requests as syntactically valid GraphQL
//!
//! Requests are built bottom-up, from values and input objects to fields, operations and
//! finally a document, all of which are allocated on a single arena. Input objects are shared
//! by reference, so one object can be passed in several places of a request without being
//! copied, and are printed in full wherever they appear.
//!
//! The crate only generates requests. It doesn't parse GraphQL, validate requests against a
//! schema, or send them anywhere.
//!
//! [A good place to start learning more about this crate is the `ast` module...](ast)

pub mod ast;
pub mod error;

pub use bumpalo;

#[cfg(feature = "json")]
pub mod json;
