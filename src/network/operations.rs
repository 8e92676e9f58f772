use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::common::SendMessageEnvelope;

/// A named GraphQL document plus the top-level field it selects.
#[derive(Debug, Clone, Copy)]
pub struct Operation {
    pub name: &'static str,
    pub document: &'static str,
    pub field: &'static str,
}

pub const SEND_MESSAGE: Operation = Operation {
    name: "SendMessage",
    document: "mutation SendMessage($input: String!) {
  sendMessage(input: $input) {
    result
    requestId
    timestamp
    error
  }
}",
    field: "sendMessage",
};

pub const CHECK_STATUS: Operation = Operation {
    name: "CheckStatus",
    document: "query CheckStatus {
  status
}",
    field: "status",
};

/// POST body of a GraphQL-over-HTTP request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphqlRequest<'a> {
    pub operation_name: &'a str,
    pub query: &'a str,
    pub variables: Value,
}

impl<'a> GraphqlRequest<'a> {
    pub fn new(operation: &'a Operation, variables: Value) -> Self {
        Self {
            operation_name: operation.name,
            query: operation.document,
            variables,
        }
    }
}

/// Response body; `data` and `errors` may both be present.
#[derive(Debug, Deserialize)]
pub struct GraphqlResponse<T> {
    pub data: Option<T>,
    pub errors: Option<Vec<GraphqlError>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GraphqlError {
    pub message: String,
    #[serde(default)]
    pub path: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageData {
    pub send_message: Option<SendMessageEnvelope>,
}

#[derive(Debug, Deserialize)]
pub struct StatusData {
    pub status: Option<String>,
}
