use futures::FutureExt;
use futures::future::BoxFuture;
use reqwest::header::{CACHE_CONTROL, HeaderMap, HeaderValue, PRAGMA};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use thiserror::Error;

use crate::common::SendMessageEnvelope;

use super::operations::{
    CHECK_STATUS, GraphqlError, GraphqlRequest, GraphqlResponse, Operation, SEND_MESSAGE,
    SendMessageData, StatusData,
};

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("server replied with HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed GraphQL response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("GraphQL error: {}", first_message(.0))]
    Graphql(Vec<GraphqlError>),
    #[error("response carried no `{0}` field")]
    MissingData(&'static str),
}

impl TransportError {
    /// First server-side message when the endpoint rejected the operation itself.
    pub fn graphql_message(&self) -> Option<&str> {
        match self {
            TransportError::Graphql(errors) => errors.first().map(|err| err.message.as_str()),
            _ => None,
        }
    }
}

fn first_message(errors: &[GraphqlError]) -> &str {
    errors
        .first()
        .map(|err| err.message.as_str())
        .unwrap_or("unknown error")
}

/// Operations the chat needs from its backend.
pub trait ChatTransport: Send + Sync {
    fn send_message<'a>(
        &'a self,
        input: &'a str,
    ) -> BoxFuture<'a, Result<SendMessageEnvelope, TransportError>>;

    fn status(&self) -> BoxFuture<'_, Result<Option<String>, TransportError>>;
}

/// GraphQL-over-HTTP client bound to one endpoint.
///
/// Every request bypasses caches and partial errors never discard data.
pub struct GraphqlTransport {
    http: reqwest::Client,
    endpoint: String,
}

impl GraphqlTransport {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, TransportError> {
        let mut headers = HeaderMap::new();
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn send_message(&self, input: &str) -> Result<SendMessageEnvelope, TransportError> {
        let (data, errors) = self
            .execute::<SendMessageData>(&SEND_MESSAGE, json!({ "input": input }))
            .await?;
        settle(&SEND_MESSAGE, data.and_then(|data| data.send_message), errors)
    }

    pub async fn status(&self) -> Result<Option<String>, TransportError> {
        let (data, errors) = self
            .execute::<StatusData>(&CHECK_STATUS, json!({}))
            .await?;
        settle(&CHECK_STATUS, data.map(|data| data.status), errors)
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        operation: &Operation,
        variables: Value,
    ) -> Result<(Option<T>, Vec<GraphqlError>), TransportError> {
        log::debug!("POST {} ({})", self.endpoint, operation.name);

        let response = self
            .http
            .post(&self.endpoint)
            .json(&GraphqlRequest::new(operation, variables))
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        let parsed: GraphqlResponse<T> = match serde_json::from_str(&body) {
            Ok(parsed) => parsed,
            Err(_) if !status.is_success() => {
                return Err(TransportError::Status {
                    status: status.as_u16(),
                    body,
                });
            }
            Err(err) => return Err(TransportError::Decode(err)),
        };

        let errors = parsed.errors.unwrap_or_default();
        if !status.is_success() && errors.is_empty() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok((parsed.data, errors))
    }
}

impl ChatTransport for GraphqlTransport {
    fn send_message<'a>(
        &'a self,
        input: &'a str,
    ) -> BoxFuture<'a, Result<SendMessageEnvelope, TransportError>> {
        GraphqlTransport::send_message(self, input).boxed()
    }

    fn status(&self) -> BoxFuture<'_, Result<Option<String>, TransportError>> {
        GraphqlTransport::status(self).boxed()
    }
}

/// Applies the "all" error policy: usable data wins, errors are only fatal without it.
fn settle<V>(
    operation: &Operation,
    value: Option<V>,
    errors: Vec<GraphqlError>,
) -> Result<V, TransportError> {
    match value {
        Some(value) => {
            for err in &errors {
                log::warn!("{} returned a partial error: {}", operation.name, err.message);
            }
            Ok(value)
        }
        None if !errors.is_empty() => Err(TransportError::Graphql(errors)),
        None => Err(TransportError::MissingData(operation.field)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn error(message: &str) -> GraphqlError {
        GraphqlError {
            message: message.to_string(),
            path: None,
        }
    }

    #[test]
    fn data_survives_partial_errors() {
        let settled = settle(&CHECK_STATUS, Some(Some("ok".to_string())), vec![error("late")]);
        assert_eq!(settled.unwrap().as_deref(), Some("ok"));
    }

    #[test]
    fn errors_without_data_are_reported() {
        let err = settle::<SendMessageEnvelope>(&SEND_MESSAGE, None, vec![error("denied")])
            .unwrap_err();
        assert_eq!(err.graphql_message(), Some("denied"));
        assert_eq!(err.to_string(), "GraphQL error: denied");
    }

    #[test]
    fn empty_response_names_the_missing_field() {
        let err = settle::<SendMessageEnvelope>(&SEND_MESSAGE, None, Vec::new()).unwrap_err();
        assert!(matches!(err, TransportError::MissingData("sendMessage")));
        assert!(err.graphql_message().is_none());
    }
}
