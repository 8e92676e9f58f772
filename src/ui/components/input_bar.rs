use egui::{Key, RichText};

use crate::ui::theme::Theme;

const MAX_VISIBLE_ROWS: f32 = 3.0;

/// What Enter does in the composer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnterAction {
    Submit,
    Newline,
}

pub fn enter_action(shift_held: bool) -> EnterAction {
    if shift_held {
        EnterAction::Newline
    } else {
        EnterAction::Submit
    }
}

/// Draws the composer. Returns true when the user asked to send.
pub fn render(ui: &mut egui::Ui, theme: &Theme, input_text: &mut String, pending: bool) -> bool {
    let input_id = ui.make_persistent_id("chat_input");
    let focused = ui.memory(|memory| memory.has_focus(input_id));

    // Plain Enter must not reach the multiline editor, or it would insert a newline.
    let submit_by_key = focused
        && !pending
        && ui.input_mut(|input| {
            let enter = input.key_pressed(Key::Enter);
            if enter && enter_action(input.modifiers.shift) == EnterAction::Submit {
                input.events.retain(|event| {
                    !matches!(
                        event,
                        egui::Event::Key {
                            key: Key::Enter,
                            pressed: true,
                            ..
                        }
                    )
                });
                true
            } else {
                false
            }
        });

    let mut clicked = false;
    ui.horizontal(|ui| {
        let button_width = 72.0;
        let row_height = ui.text_style_height(&egui::TextStyle::Body);

        egui::ScrollArea::vertical()
            .max_height(row_height * MAX_VISIBLE_ROWS + theme.spacing_8)
            .max_width(ui.available_width() - button_width)
            .show(ui, |ui| {
                ui.add_enabled(
                    !pending,
                    egui::TextEdit::multiline(input_text)
                        .id(input_id)
                        .hint_text("Type a message...")
                        .desired_rows(1)
                        .desired_width(f32::INFINITY),
                );
            });

        let can_send = !pending && !input_text.trim().is_empty();
        if pending {
            ui.add(egui::Spinner::new().size(24.0));
        } else if ui
            .add_enabled(can_send, egui::Button::new(RichText::new("Send").strong()))
            .clicked()
        {
            clicked = true;
        }
    });

    clicked || submit_by_key
}
