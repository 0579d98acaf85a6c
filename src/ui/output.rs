use colored::*;
use std::io::{self, Write};
use terminal_size::{terminal_size, Width};

const SPINNER: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
const DEFAULT_WIDTH: usize = 80;

pub fn terminal_width() -> usize {
    terminal_size()
        .map(|(Width(w), _)| w as usize)
        .unwrap_or(DEFAULT_WIDTH)
}

pub fn clear_screen() {
    print!("\x1b[2J\x1b[H");
    let _ = io::stdout().flush();
}

pub fn spinner_frame(frame: usize) -> char {
    SPINNER[frame % SPINNER.len()]
}

/// Redraw the waiting indicator in place.
pub fn draw_waiting(frame: usize) {
    print!("\r{} {}", "abot".bright_magenta().bold(), spinner_frame(frame).to_string().cyan());
    let _ = io::stdout().flush();
}

pub fn finish_waiting() {
    print!("\r\x1b[2K");
    let _ = io::stdout().flush();
}

pub fn display_notice(message: &str) {
    println!("{}", message.yellow());
}

pub fn display_error(message: &str) {
    eprintln!("{} {}", "Error:".red(), message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_wraps_around() {
        assert_eq!(spinner_frame(0), spinner_frame(SPINNER.len()));
        assert_ne!(spinner_frame(0), spinner_frame(1));
    }
}
