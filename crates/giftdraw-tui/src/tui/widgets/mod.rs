// TUI widget modules for each screen panel.

pub mod draw_banner;
pub mod drawer_picker;
pub mod name_input;
pub mod quit_confirm;
pub mod results;
pub mod status_bar;
