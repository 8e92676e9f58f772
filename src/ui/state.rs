use chrono::Utc;
use tokio::sync::mpsc;

use crate::common::{ChatMessage, NetworkCommand, SendMessageEnvelope, Sender};
use crate::network::TransportError;

pub const GENERIC_FAILURE_TEXT: &str = "An unknown error occurred, please try again later.";

/// Whether the view is waiting on a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Pending { ticket: u64 },
}

/// Notifications pushed to subscribers after every mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateChange {
    MessageAppended { index: usize, sender: Sender },
    PhaseChanged(Phase),
}

/// Local state of the chat view: the transcript, the input buffer and the
/// single-flight request gate.
///
/// The transcript only ever grows. Nothing here knows about egui.
pub struct ChatState {
    messages: Vec<ChatMessage>,
    pub input_text: String,
    phase: Phase,
    next_ticket: u64,
    scroll_to_latest: bool,
    subscribers: Vec<mpsc::UnboundedSender<StateChange>>,
}

impl ChatState {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            input_text: String::new(),
            phase: Phase::Idle,
            next_ticket: 1,
            scroll_to_latest: false,
            subscribers: Vec::new(),
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.phase, Phase::Pending { .. })
    }

    /// True when a submit would be accepted right now.
    pub fn can_submit(&self) -> bool {
        !self.is_pending() && !self.input_text.trim().is_empty()
    }

    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<StateChange> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.push(tx);
        rx
    }

    /// Consumes the pending "scroll to the newest message" request.
    pub fn take_scroll_request(&mut self) -> bool {
        std::mem::take(&mut self.scroll_to_latest)
    }

    /// Moves Idle -> Pending: appends the user message, clears the input and
    /// returns the command to dispatch. Returns `None` (and changes nothing)
    /// for blank input or while another request is in flight.
    pub fn submit(&mut self) -> Option<NetworkCommand> {
        if !self.can_submit() {
            return None;
        }

        let input = std::mem::take(&mut self.input_text);
        let ticket = self.next_ticket;
        self.next_ticket += 1;

        self.append(ChatMessage::user(input.clone(), Utc::now()));
        self.set_phase(Phase::Pending { ticket });

        Some(NetworkCommand::SendMessage { ticket, input })
    }

    /// Moves Pending -> Idle with the bot message derived from `outcome`.
    /// Replies for any other ticket are ignored.
    pub fn resolve(
        &mut self,
        ticket: u64,
        outcome: Result<SendMessageEnvelope, TransportError>,
    ) -> bool {
        if !self.accepts(ticket) {
            return false;
        }

        self.append(reply_message(outcome));
        self.set_phase(Phase::Idle);
        true
    }

    /// Settles a request that never reached the network worker.
    pub fn abandon(&mut self, ticket: u64) -> bool {
        if !self.accepts(ticket) {
            return false;
        }

        self.append(ChatMessage::local_bot(GENERIC_FAILURE_TEXT));
        self.set_phase(Phase::Idle);
        true
    }

    fn accepts(&self, ticket: u64) -> bool {
        match self.phase {
            Phase::Pending { ticket: pending } if pending == ticket => true,
            _ => {
                log::debug!("Ignoring reply #{ticket}; phase is {:?}", self.phase);
                false
            }
        }
    }

    fn append(&mut self, message: ChatMessage) {
        let change = StateChange::MessageAppended {
            index: self.messages.len(),
            sender: message.sender,
        };
        self.messages.push(message);
        self.notify(change);
    }

    fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
        self.notify(StateChange::PhaseChanged(phase));
    }

    fn notify(&mut self, change: StateChange) {
        self.scroll_to_latest = true;
        self.subscribers
            .retain(|subscriber| subscriber.send(change.clone()).is_ok());
    }
}

impl Default for ChatState {
    fn default() -> Self {
        Self::new()
    }
}

/// Turns whatever the worker reported into the bot message the user sees.
pub fn reply_message(outcome: Result<SendMessageEnvelope, TransportError>) -> ChatMessage {
    match outcome {
        Ok(envelope) => {
            let timestamp = envelope.reported_at();
            let text = match envelope.error {
                Some(error) => format!("Error: {error}"),
                None => envelope.result.unwrap_or_default(),
            };
            let mut message = ChatMessage::local_bot(text);
            if let Some(request_id) = envelope.request_id {
                message.id = request_id;
            }
            message.timestamp = timestamp;
            message
        }
        Err(err) => match err.graphql_message() {
            Some(detail) => {
                log::warn!("Endpoint rejected the message: {detail}");
                ChatMessage::local_bot(format!("An error occurred: {detail}"))
            }
            None => ChatMessage::local_bot(GENERIC_FAILURE_TEXT),
        },
    }
}
