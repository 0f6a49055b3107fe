use ratatui::style::Color;

/// Colors used by the terminal front end.
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub border: Color,
    pub accent: Color,
    pub cpu_line: Color,
    pub mem_line: Color,
    pub header_accent_fg: Color,
    pub header_accent_bg: Color,
    pub row_highlight_bg: Color,
    pub statusbar_bg: Color,
    pub pill_key_fg: Color,
    pub pill_key_bg: Color,
    pub pill_desc_fg: Color,
    pub status_err: Color,
}

impl Theme {
    /// Catppuccin Mocha.
    pub fn catppuccin() -> Self {
        Theme {
            background: Color::Rgb(0x1e, 0x1e, 0x2e),
            text_primary: Color::Rgb(0xcd, 0xd6, 0xf4),
            text_secondary: Color::Rgb(0xa6, 0xad, 0xc8),
            border: Color::Rgb(0xd9, 0xe0, 0xee),
            accent: Color::Rgb(0xcb, 0xa6, 0xf7),
            cpu_line: Color::Rgb(0xf5, 0xc2, 0xe7),
            mem_line: Color::Rgb(0x89, 0xb4, 0xfa),
            header_accent_fg: Color::Rgb(0x1e, 0x1e, 0x2e),
            header_accent_bg: Color::Rgb(0xf5, 0xc2, 0xe7),
            row_highlight_bg: Color::Rgb(0x45, 0x47, 0x5a),
            statusbar_bg: Color::Rgb(0x18, 0x18, 0x25),
            pill_key_fg: Color::Rgb(0x1e, 0x1e, 0x2e),
            pill_key_bg: Color::Rgb(0xcb, 0xa6, 0xf7),
            pill_desc_fg: Color::Rgb(0xcd, 0xd6, 0xf4),
            status_err: Color::Rgb(0xf3, 0x8b, 0xa8),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::catppuccin()
    }
}
