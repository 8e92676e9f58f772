use std::ops::ControlFlow;

use tokio::sync::mpsc;

use crate::common::{NetworkCommand, NetworkEvent};

use super::transport::ChatTransport;

/// Background worker that owns the transport and serves UI commands one at a time.
pub struct ChatClient<T> {
    transport: T,
    event_sender: mpsc::Sender<NetworkEvent>,
    command_receiver: mpsc::Receiver<NetworkCommand>,
}

impl<T: ChatTransport> ChatClient<T> {
    pub fn new(
        transport: T,
        event_sender: mpsc::Sender<NetworkEvent>,
        command_receiver: mpsc::Receiver<NetworkCommand>,
    ) -> Self {
        Self {
            transport,
            event_sender,
            command_receiver,
        }
    }

    /// Runs until the UI drops its command sender or stops listening for events.
    pub async fn run(mut self) {
        log::info!("Network worker started");

        while let Some(command) = self.command_receiver.recv().await {
            if self.handle_command(command).await.is_break() {
                break;
            }
        }

        log::info!("Network worker stopped");
    }

    async fn handle_command(&mut self, command: NetworkCommand) -> ControlFlow<()> {
        match command {
            NetworkCommand::SendMessage { ticket, input } => {
                let outcome = self.transport.send_message(&input).await;
                if let Err(err) = &outcome {
                    log::error!("sendMessage #{ticket} failed: {err}");
                }

                if self
                    .event_sender
                    .send(NetworkEvent::ReplyReceived { ticket, outcome })
                    .await
                    .is_err()
                {
                    log::debug!("Chat view is gone; dropping reply #{ticket}");
                    return ControlFlow::Break(());
                }
            }
        }

        ControlFlow::Continue(())
    }
}
