use ratatui::{widgets::Block, Frame};

use crate::state::form::FormState;

use super::{layout, theme::Theme, widgets};

/// Draws the entire form.
pub fn draw(f: &mut Frame, state: &FormState) {
    let area = f.size();
    f.render_widget(Block::default().style(Theme::base()), area);

    let form = layout::centered(70, 80, area);
    let (title_area, input_area, output_area, hints_area) = layout::vertical(form);

    f.render_widget(widgets::title(state), title_area);
    f.render_widget(widgets::input(state), input_area);
    f.render_widget(widgets::output(state), output_area);
    f.render_widget(widgets::hints(), hints_area);

    let cursor_x = input_area.x + 1 + state.input().chars().count() as u16;
    f.set_cursor(
        cursor_x.min(input_area.right().saturating_sub(2)),
        input_area.y + 1,
    );
}
