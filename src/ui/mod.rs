pub mod app;
pub mod components;
pub mod state;
pub mod theme;

pub use app::ChatApp;
pub use state::ChatState;
pub use theme::Theme;
