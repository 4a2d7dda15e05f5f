use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::config::Theme;
use crate::session::Snapshot;

/// Renders the one-line status band and returns the remaining play area
/// above it.
#[must_use]
pub fn render_hud(
    frame: &mut Frame<'_>,
    area: Rect,
    snapshot: &Snapshot<'_>,
    theme: &Theme,
) -> Rect {
    let [play_area, status_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

    let mut spans = vec![
        Span::styled(
            format!("Score: {}", snapshot.score),
            Style::new()
                .fg(theme.hud_score)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("   Length: {}", snapshot.snake.len())),
    ];
    if snapshot.slowed {
        spans.push(Span::styled(
            "   SLOW-MO",
            Style::new().fg(theme.hud_slow).add_modifier(Modifier::BOLD),
        ));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Left),
        status_area,
    );

    play_area
}
