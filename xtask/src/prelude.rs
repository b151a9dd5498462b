pub use anstream::println as aprintln;

/// ANSI colors for plan output.
mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const GREEN: &str = "\x1b[32m";
    pub const RED: &str = "\x1b[31m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
}

fn paint(color: &str, text: &str) -> String {
    format!("{}{}{}", color, text, colors::RESET)
}

/// Green text.
pub fn p_g(text: &str) -> String {
    paint(colors::GREEN, text)
}

/// Red text.
pub fn p_r(text: &str) -> String {
    paint(colors::RED, text)
}

/// Yellow text.
pub fn p_y(text: &str) -> String {
    paint(colors::YELLOW, text)
}

/// Blue text.
pub fn p_b(text: &str) -> String {
    paint(colors::BLUE, text)
}

/// Cyan text.
pub fn p_c(text: &str) -> String {
    paint(colors::CYAN, text)
}
