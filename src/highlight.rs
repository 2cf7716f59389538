use inksac::prelude::*;
use std::io::IsTerminal;

/// Colours diagnostics and error reports written to stderr.
#[derive(Debug, Clone, Copy)]
pub struct Highlighter {
    color_support: ColorSupport,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter {
    pub fn new() -> Self {
        let support = if std::io::stderr().is_terminal() {
            check_color_support().unwrap_or(ColorSupport::NoColor)
        } else {
            ColorSupport::NoColor
        };
        Self {
            color_support: support,
        }
    }

    pub fn plain() -> Self {
        Self {
            color_support: ColorSupport::NoColor,
        }
    }

    fn enabled(&self) -> bool {
        !matches!(self.color_support, ColorSupport::NoColor)
    }

    pub fn error(&self, error: &str) -> String {
        if !self.enabled() {
            return error.to_string();
        }

        let error_style = Style::builder()
            .foreground(Color::Red)
            .bold()
            .build();

        error.style(error_style).to_string()
    }

    pub fn hint(&self, hint: &str) -> String {
        if !self.enabled() {
            return hint.to_string();
        }

        let hint_style = Style::builder()
            .foreground(Color::RGB(128, 128, 128))
            .build();

        hint.style(hint_style).to_string()
    }
}
