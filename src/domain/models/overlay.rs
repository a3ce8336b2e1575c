use ratatui::prelude::Alignment;
use ratatui::prelude::Backend;
use ratatui::prelude::Constraint;
use ratatui::prelude::Direction;
use ratatui::prelude::Layout;
use ratatui::prelude::Rect;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Clear;
use ratatui::widgets::Padding;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

pub const OVERLAY_TRIGGER: &str = "tapos na ba?";
pub const OVERLAY_DURATION_MS: u64 = 7000;

#[derive(Default)]
pub struct Overlay {}

impl Overlay {
    pub fn render<B: Backend>(&self, frame: &mut Frame<B>, rect: Rect) {
        frame.render_widget(Clear, rect);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![
                Constraint::Percentage(40),
                Constraint::Min(4),
                Constraint::Percentage(40),
            ])
            .split(rect);

        frame.render_widget(
            Paragraph::new("Thank you for chatting with Aura.\nThis session is wrapping up.")
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Double)
                        .padding(Padding::new(1, 1, 1, 1)),
                )
                .alignment(Alignment::Center),
            rows[1],
        );
    }
}
