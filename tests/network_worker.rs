use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures::FutureExt;
use futures::future::BoxFuture;
use httpmock::Method::POST;
use httpmock::MockServer;
use serde_json::json;
use tokio::sync::mpsc;

use graphql_chat::common::{NetworkCommand, NetworkEvent, SendMessageEnvelope, Sender};
use graphql_chat::network::{ChatClient, ChatTransport, GraphqlTransport, TransportError};
use graphql_chat::ui::ChatState;
use graphql_chat::ui::state::GENERIC_FAILURE_TEXT;

/// Replays canned outcomes and records every input it was asked to send.
#[derive(Default)]
struct ScriptedTransport {
    replies: Mutex<VecDeque<Result<SendMessageEnvelope, TransportError>>>,
    inputs: Arc<Mutex<Vec<String>>>,
}

impl ScriptedTransport {
    fn with_replies(replies: Vec<Result<SendMessageEnvelope, TransportError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            inputs: Arc::default(),
        }
    }
}

impl ChatTransport for ScriptedTransport {
    fn send_message<'a>(
        &'a self,
        input: &'a str,
    ) -> BoxFuture<'a, Result<SendMessageEnvelope, TransportError>> {
        self.inputs.lock().unwrap().push(input.to_string());
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(TransportError::MissingData("sendMessage")));
        async move { reply }.boxed()
    }

    fn status(&self) -> BoxFuture<'_, Result<Option<String>, TransportError>> {
        async { Ok(Some("ok".to_string())) }.boxed()
    }
}

fn reply(result: &str, request_id: &str) -> SendMessageEnvelope {
    SendMessageEnvelope {
        result: Some(result.to_string()),
        request_id: Some(request_id.to_string()),
        timestamp: Some("2024-01-01T00:00:00Z".to_string()),
        error: None,
    }
}

struct Harness {
    state: ChatState,
    commands: mpsc::Sender<NetworkCommand>,
    events: mpsc::Receiver<NetworkEvent>,
}

impl Harness {
    fn start<T: ChatTransport + 'static>(transport: T) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel(4);
        let (event_tx, event_rx) = mpsc::channel(4);
        tokio::spawn(ChatClient::new(transport, event_tx, cmd_rx).run());
        Self {
            state: ChatState::new(),
            commands: cmd_tx,
            events: event_rx,
        }
    }

    async fn submit(&mut self, text: &str) -> bool {
        self.state.input_text = text.to_string();
        match self.state.submit() {
            Some(command) => {
                self.commands.send(command).await.expect("worker alive");
                true
            }
            None => false,
        }
    }

    async fn settle(&mut self) {
        let event = tokio::time::timeout(Duration::from_secs(5), self.events.recv())
            .await
            .expect("reply in time")
            .expect("worker alive");
        let NetworkEvent::ReplyReceived { ticket, outcome } = event;
        assert!(self.state.resolve(ticket, outcome));
    }
}

#[tokio::test]
async fn full_round_trip_against_graphql_endpoint() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/graphql");
            then.status(200).json_body(json!({
                "data": {
                    "sendMessage": {
                        "result": "hi",
                        "requestId": "r1",
                        "timestamp": "2024-01-01T00:00:00Z",
                        "error": null
                    }
                }
            }));
        })
        .await;
    let mut harness = Harness::start(GraphqlTransport::new(server.url("/graphql")).unwrap());

    assert!(harness.submit("hello").await);
    assert_eq!(harness.state.messages().len(), 1);
    assert!(harness.state.is_pending());

    assert!(!harness.submit("while pending").await);

    harness.settle().await;

    mock.assert_calls(1);
    let messages = harness.state.messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[1].sender, Sender::Bot);
    assert_eq!(messages[1].id, "r1");
    assert_eq!(messages[1].text, "hi");
    assert!(!harness.state.is_pending());
}

#[tokio::test]
async fn unreachable_endpoint_produces_generic_reply() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let endpoint = format!("http://{}/graphql", listener.local_addr().unwrap());
    drop(listener);
    let mut harness = Harness::start(GraphqlTransport::new(endpoint).unwrap());

    assert!(harness.submit("hello").await);
    harness.settle().await;

    assert_eq!(harness.state.messages()[1].text, GENERIC_FAILURE_TEXT);
    assert!(harness.submit("try again").await);
}

#[tokio::test]
async fn sequential_turns_keep_submission_order() {
    let transport = ScriptedTransport::with_replies(vec![
        Ok(reply("one", "r1")),
        Ok(SendMessageEnvelope {
            error: Some("rate limited".to_string()),
            ..reply("", "r2")
        }),
        Ok(reply("three", "r3")),
    ]);
    let inputs = Arc::clone(&transport.inputs);
    let mut harness = Harness::start(transport);

    for text in ["a", "b", "c"] {
        assert!(harness.submit(text).await);
        assert!(!harness.submit("dropped").await);
        harness.settle().await;
    }

    assert_eq!(*inputs.lock().unwrap(), vec!["a", "b", "c"]);
    let texts: Vec<&str> = harness
        .state
        .messages()
        .iter()
        .map(|message| message.text.as_str())
        .collect();
    assert_eq!(texts, ["a", "one", "b", "Error: rate limited", "c", "three"]);
}

#[tokio::test]
async fn worker_stops_once_the_view_is_gone() {
    let (cmd_tx, cmd_rx) = mpsc::channel(4);
    let (event_tx, event_rx) = mpsc::channel(4);
    let transport = ScriptedTransport::with_replies(vec![Ok(reply("late", "r1"))]);
    let worker = tokio::spawn(ChatClient::new(transport, event_tx, cmd_rx).run());

    drop(event_rx);
    cmd_tx
        .send(NetworkCommand::SendMessage {
            ticket: 1,
            input: "hello".to_string(),
        })
        .await
        .unwrap();

    tokio::time::timeout(Duration::from_secs(5), worker)
        .await
        .expect("worker exits")
        .expect("worker did not panic");
}

#[tokio::test]
async fn worker_stops_when_commands_close() {
    let (cmd_tx, cmd_rx) = mpsc::channel::<NetworkCommand>(4);
    let (event_tx, _event_rx) = mpsc::channel(4);
    let worker = tokio::spawn(ChatClient::new(ScriptedTransport::default(), event_tx, cmd_rx).run());

    drop(cmd_tx);

    tokio::time::timeout(Duration::from_secs(5), worker)
        .await
        .expect("worker exits")
        .expect("worker did not panic");
}
