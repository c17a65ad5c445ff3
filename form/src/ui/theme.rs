use ratatui::style::{Color, Modifier, Style};

/// Light form palette: dark text, green results, red errors.
pub struct Theme;

impl Theme {
    pub const BG: Color = Color::Rgb(240, 240, 240);
    pub const PANEL: Color = Color::Rgb(255, 255, 255);
    pub const FG: Color = Color::Rgb(51, 51, 51);
    pub const FG_MUTED: Color = Color::Rgb(127, 140, 141);

    pub const ACCENT_GREEN: Color = Color::Rgb(39, 174, 96);
    pub const ACCENT_RED: Color = Color::Rgb(231, 76, 60);

    /// Default full-screen style.
    pub fn base() -> Style {
        Style::default().fg(Self::FG).bg(Self::BG)
    }

    /// Output panel background.
    pub fn panel() -> Style {
        Style::default().fg(Self::FG).bg(Self::PANEL)
    }

    /// Titles (bold).
    pub fn title() -> Style {
        Style::default().fg(Self::FG).add_modifier(Modifier::BOLD)
    }

    /// Regular text.
    pub fn text() -> Style {
        Style::default().fg(Self::FG)
    }

    /// Informational text.
    pub fn muted() -> Style {
        Style::default().fg(Self::FG_MUTED)
    }

    pub fn ok() -> Style {
        Style::default()
            .fg(Self::ACCENT_GREEN)
            .add_modifier(Modifier::BOLD)
    }

    pub fn error() -> Style {
        Style::default()
            .fg(Self::ACCENT_RED)
            .add_modifier(Modifier::BOLD)
    }
}
