use crate::network::TransportError;

use super::types::SendMessageEnvelope;

/// Events the network worker reports back to the UI.
#[derive(Debug)]
pub enum NetworkEvent {
    ReplyReceived {
        ticket: u64,
        outcome: Result<SendMessageEnvelope, TransportError>,
    },
}
