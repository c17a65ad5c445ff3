use ratatui::{
    layout::Alignment,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::state::form::{format_currency, format_years, FormState, Readout};

use super::theme::Theme;

pub fn title<'a>(state: &FormState) -> Paragraph<'a> {
    let mode = if state.is_polynomial() {
        "polynomial regression"
    } else {
        "linear regression"
    };

    Paragraph::new(vec![
        Line::from(Span::styled("Salary Prediction Tool", Theme::title())),
        Line::from(Span::styled(mode, Theme::muted())),
    ])
    .alignment(Alignment::Center)
}

pub fn input<'a>(state: &'a FormState) -> Paragraph<'a> {
    Paragraph::new(Span::styled(state.input(), Theme::text())).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Years of Experience"),
    )
}

pub fn output<'a>(state: &FormState) -> Paragraph<'a> {
    let (headline, status) = match state.readout() {
        Readout::Idle => (
            Span::styled(format_currency(0.0), Theme::ok()),
            Span::styled("Enter experience to see prediction", Theme::muted()),
        ),
        Readout::Predicted { salary, experience } => (
            Span::styled(format_currency(*salary), Theme::ok()),
            Span::styled(
                format!("Experience: {} years", format_years(*experience)),
                Theme::muted(),
            ),
        ),
        Readout::Invalid(reason) => (
            Span::styled("Invalid", Theme::error()),
            Span::styled(capitalize(reason), Theme::error()),
        ),
        Readout::Failed(msg) => (
            Span::styled("Error", Theme::error()),
            Span::styled(msg.clone(), Theme::error()),
        ),
    };

    Paragraph::new(vec![Line::from(headline), Line::from(""), Line::from(status)])
        .style(Theme::panel())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Predicted Salary"),
        )
        .wrap(Wrap { trim: true })
}

pub fn hints<'a>() -> Paragraph<'a> {
    Paragraph::new(Span::styled("Ctrl+R reset  |  Esc exit", Theme::muted()))
        .alignment(Alignment::Center)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
