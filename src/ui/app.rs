use eframe::egui;
use tokio::sync::mpsc;

use crate::common::{NetworkCommand, NetworkEvent};

use super::components::{chat_area, header, input_bar};
use super::state::ChatState;
use super::theme::Theme;

pub struct ChatApp {
    state: ChatState,
    theme: Theme,
    title: String,
    command_sender: mpsc::Sender<NetworkCommand>,
    event_receiver: mpsc::Receiver<NetworkEvent>,
}

impl ChatApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        title: String,
        command_sender: mpsc::Sender<NetworkCommand>,
        event_receiver: mpsc::Receiver<NetworkEvent>,
    ) -> Self {
        let theme = Theme::default();
        theme.apply_visuals(&cc.egui_ctx);

        Self {
            state: ChatState::new(),
            theme,
            title,
            command_sender,
            event_receiver,
        }
    }

    fn handle_network_events(&mut self) {
        while let Ok(event) = self.event_receiver.try_recv() {
            match event {
                NetworkEvent::ReplyReceived { ticket, outcome } => {
                    self.state.resolve(ticket, outcome);
                }
            }
        }
    }

    fn submit(&mut self) {
        let Some(command) = self.state.submit() else {
            return;
        };

        let NetworkCommand::SendMessage { ticket, .. } = command;
        if let Err(err) = self.command_sender.try_send(command) {
            log::warn!("Failed to send command to network: {err}");
            self.state.abandon(ticket);
        }
    }
}

impl eframe::App for ChatApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_network_events();

        egui::TopBottomPanel::top("header")
            .frame(self.theme.header_frame())
            .show(ctx, |ui| {
                header::render(ui, &self.theme, &self.title);
            });

        let pending = self.state.is_pending();
        let mut send = false;
        egui::TopBottomPanel::bottom("composer")
            .frame(self.theme.composer_frame())
            .show(ctx, |ui| {
                send = input_bar::render(ui, &self.theme, &mut self.state.input_text, pending);
            });
        if send {
            self.submit();
        }

        let scroll_to_latest = self.state.take_scroll_request();
        egui::CentralPanel::default().show(ctx, |ui| {
            chat_area::render(
                ui,
                &self.theme,
                self.state.messages(),
                self.state.is_pending(),
                scroll_to_latest,
            );
        });

        // Replies arrive on another thread; keep polling while one is outstanding.
        if self.state.is_pending() {
            ctx.request_repaint();
        }
    }
}
