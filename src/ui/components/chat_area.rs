use chrono::{DateTime, Local, Utc};
use egui::{Align, Layout, RichText};

use crate::common::ChatMessage;
use crate::ui::theme::Theme;

pub fn render(
    ui: &mut egui::Ui,
    theme: &Theme,
    messages: &[ChatMessage],
    pending: bool,
    scroll_to_latest: bool,
) {
    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .stick_to_bottom(true)
        .show(ui, |ui| {
            ui.add_space(theme.spacing_16);

            if messages.is_empty() {
                render_empty_state(ui, theme);
                return;
            }

            for message in messages {
                render_message(ui, theme, message);
            }

            if pending {
                render_thinking(ui, theme);
            }

            if scroll_to_latest {
                ui.scroll_to_cursor(Some(Align::BOTTOM));
            }
        });
}

fn render_empty_state(ui: &mut egui::Ui, theme: &Theme) {
    ui.vertical_centered(|ui| {
        ui.add_space(ui.available_height() / 3.0);
        ui.label(RichText::new("Start a new conversation").color(theme.text_muted));
        ui.label(
            RichText::new("Send a message to begin chatting")
                .small()
                .color(theme.text_muted),
        );
    });
}

fn render_message(ui: &mut egui::Ui, theme: &Theme, message: &ChatMessage) {
    let (layout, avatar, avatar_fill, bubble_fill) = if message.is_user() {
        (
            Layout::right_to_left(Align::TOP),
            "Me",
            theme.user_avatar,
            theme.accent_strong,
        )
    } else {
        (
            Layout::left_to_right(Align::TOP),
            "AI",
            theme.accent,
            theme.surface_2,
        )
    };

    ui.with_layout(layout, |ui| {
        theme.avatar_frame(avatar_fill).show(ui, |ui| {
            ui.label(RichText::new(avatar).strong());
        });

        theme.bubble_frame(bubble_fill).show(ui, |ui| {
            ui.set_max_width(theme.bubble_max_width);
            ui.vertical(|ui| {
                ui.label(&message.text);
                ui.label(
                    RichText::new(format_time(message.timestamp))
                        .small()
                        .color(theme.text_muted),
                );
            });
        });
    });
}

fn render_thinking(ui: &mut egui::Ui, theme: &Theme) {
    ui.with_layout(Layout::left_to_right(Align::TOP), |ui| {
        theme.bubble_frame(theme.surface_2).show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.add(egui::Spinner::new());
                ui.label("Thinking...");
            });
        });
    });
}

/// Local wall-clock time as `HH:MM`.
pub fn format_time(timestamp: DateTime<Utc>) -> String {
    timestamp.with_timezone(&Local).format("%H:%M").to_string()
}
