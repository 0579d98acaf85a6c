pub mod output;
pub mod text;

pub use output::{
    clear_screen, display_error, display_notice, draw_waiting, finish_waiting, spinner_frame,
    terminal_width,
};
pub use text::{expand_shortcodes, style_text};
