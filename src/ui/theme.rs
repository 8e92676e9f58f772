use egui::{Color32, CornerRadius, FontId, Frame, Margin, Stroke, TextStyle};

/// The single static dark palette of the chat window.
#[derive(Debug, Clone)]
pub struct Theme {
    pub surface_0: Color32,
    pub surface_1: Color32,
    pub surface_2: Color32,
    pub accent: Color32,
    pub accent_strong: Color32,
    pub title: Color32,
    pub user_avatar: Color32,
    pub text_primary: Color32,
    pub text_muted: Color32,
    pub border_subtle: Color32,
    pub spacing_8: f32,
    pub spacing_16: f32,
    pub radius_12: u8,
    pub radius_16: u8,
    pub bubble_max_width: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            surface_0: Color32::from_rgb(0x11, 0x18, 0x27),
            surface_1: Color32::from_rgb(0x1F, 0x29, 0x37),
            surface_2: Color32::from_rgb(0x37, 0x41, 0x51),
            accent: Color32::from_rgb(0x16, 0xA3, 0x4A),
            accent_strong: Color32::from_rgb(0x15, 0x80, 0x3D),
            title: Color32::from_rgb(0x22, 0xC5, 0x5E),
            user_avatar: Color32::from_rgb(0x25, 0x63, 0xEB),
            text_primary: Color32::from_rgb(0xF3, 0xF4, 0xF6),
            text_muted: Color32::from_rgb(0x9C, 0xA3, 0xAF),
            border_subtle: Color32::from_rgb(0x37, 0x41, 0x51),
            spacing_8: 8.0,
            spacing_16: 16.0,
            radius_12: 12,
            radius_16: 16,
            bubble_max_width: 640.0,
        }
    }
}

impl Theme {
    pub fn apply_visuals(&self, ctx: &egui::Context) {
        let mut visuals = egui::Visuals::dark();
        visuals.panel_fill = self.surface_0;
        visuals.extreme_bg_color = self.surface_2;
        visuals.override_text_color = Some(self.text_primary);
        visuals.widgets.inactive.bg_fill = self.accent;
        visuals.widgets.inactive.weak_bg_fill = self.accent;
        visuals.widgets.inactive.bg_stroke = Stroke::NONE;
        visuals.widgets.hovered.bg_fill = self.accent_strong;
        visuals.widgets.hovered.weak_bg_fill = self.accent_strong;
        visuals.widgets.active.bg_fill = self.accent_strong;
        visuals.selection.bg_fill = self.accent_strong;
        visuals.selection.stroke = Stroke::new(1.0, self.title);

        let mut style = (*ctx.style()).clone();
        style.visuals = visuals;
        style.spacing.item_spacing = egui::vec2(self.spacing_8, self.spacing_8);
        style.spacing.button_padding = egui::vec2(12.0, 8.0);
        style.text_styles.insert(TextStyle::Heading, FontId::proportional(20.0));
        style.text_styles.insert(TextStyle::Body, FontId::proportional(15.0));
        style.text_styles.insert(TextStyle::Small, FontId::proportional(11.0));
        ctx.set_style(style);
    }

    pub fn header_frame(&self) -> Frame {
        Frame::new()
            .fill(self.surface_1)
            .inner_margin(Margin::symmetric(24, 16))
    }

    pub fn composer_frame(&self) -> Frame {
        Frame::new()
            .fill(self.surface_0)
            .inner_margin(Margin::same(self.spacing_16 as i8))
            .stroke(Stroke::new(1.0, self.border_subtle))
    }

    pub fn bubble_frame(&self, fill: Color32) -> Frame {
        Frame::new()
            .fill(fill)
            .inner_margin(Margin::same(12))
            .corner_radius(CornerRadius::same(self.radius_16))
    }

    pub fn avatar_frame(&self, fill: Color32) -> Frame {
        Frame::new()
            .fill(fill)
            .inner_margin(Margin::symmetric(8, 6))
            .corner_radius(CornerRadius::same(self.radius_12))
    }
}
