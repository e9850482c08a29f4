use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;
use tracing::debug;

use super::JSVariables;
use crate::ast::Document;
use crate::error::Result;

/// The JSON body of a GraphQL request, as it's sent to a GraphQL service over HTTP.
///
/// The `query` is the rendered [Document]. When the document contains more than one operation,
/// `operation_name` selects the one to execute. Absent fields are left out of the JSON output.
///
/// [Reference](https://graphql.github.io/graphql-over-http/draft/#sec-Request-Parameters)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQLRequest {
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<JSVariables>,
}

impl GraphQLRequest {
    /// Renders `document` into a new request body.
    ///
    /// When an `operation_name` is passed it must name one of the document's operations.
    pub fn new(document: &Document, operation_name: Option<&str>) -> Result<Self> {
        if operation_name.is_some() {
            document.operation(operation_name)?;
        }
        let query = document.render()?;
        debug!(operation_name, "created GraphQL request body");
        Ok(GraphQLRequest {
            query,
            operation_name: operation_name.map(str::to_string),
            variables: None,
        })
    }

    /// Returns this request with all of its variables replaced by `variables`.
    #[inline]
    pub fn with_variables(self, variables: JSVariables) -> Self {
        GraphQLRequest {
            variables: Some(variables),
            ..self
        }
    }

    /// Returns this request with the variable `name` set to the serialized `value`.
    pub fn with_variable<V: Serialize>(mut self, name: &str, value: V) -> Result<Self> {
        let value = serde_json::to_value(value)?;
        self.variables
            .get_or_insert_with(JSVariables::new)
            .insert(name.to_string(), value);
        Ok(self)
    }

    /// Converts this request into its JSON value.
    pub fn to_json(&self) -> Result<JSValue> {
        Ok(serde_json::to_value(self)?)
    }

    /// Serializes this request into a JSON string.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
