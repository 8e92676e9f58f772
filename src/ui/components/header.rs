use egui::RichText;

use crate::ui::theme::Theme;

pub fn render(ui: &mut egui::Ui, theme: &Theme, title: &str) {
    ui.vertical_centered(|ui| {
        ui.heading(RichText::new(title).strong().color(theme.title));
    });
}
