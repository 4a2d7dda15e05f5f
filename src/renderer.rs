use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Block;
use ratatui::Frame;

use crate::config::{
    Theme, BORDER_HALF_BLOCK, GLYPH_APPLE, GLYPH_BONUS, GLYPH_SNAKE_BODY, GLYPH_SNAKE_HEAD_DOWN,
    GLYPH_SNAKE_HEAD_LEFT, GLYPH_SNAKE_HEAD_RIGHT, GLYPH_SNAKE_HEAD_UP,
};
use crate::grid::Position;
use crate::input::Direction;
use crate::session::{Renderer, Snapshot};
use crate::terminal_runtime::AppTerminal;
use crate::ui::hud::render_hud;

/// Terminal-backed frame sink handed to the session during play.
pub struct FrameRenderer<'a> {
    pub terminal: &'a mut AppTerminal,
    pub theme: &'static Theme,
}

impl Renderer for FrameRenderer<'_> {
    fn render(&mut self, snapshot: &Snapshot<'_>) {
        let theme = self.theme;
        let _ = self.terminal.draw(|frame| draw_frame(frame, snapshot, theme));
    }
}

/// Renders one full game frame from an immutable snapshot.
pub fn draw_frame(frame: &mut Frame<'_>, snapshot: &Snapshot<'_>, theme: &Theme) {
    let area = frame.area();
    let play_area = render_hud(frame, area, snapshot, theme);
    let board = board_rect(play_area, snapshot.tile_count);

    let block = Block::bordered()
        .border_set(BORDER_HALF_BLOCK)
        .border_style(Style::new().fg(theme.border_fg))
        .style(Style::new().bg(theme.play_bg));

    let inner = block.inner(board);
    frame.render_widget(block, board);

    render_apple(frame, inner, snapshot, theme);
    render_bonus(frame, inner, snapshot, theme);
    render_snake(frame, inner, snapshot, theme);
}

/// Clamps the play area to the board plus its border.
fn board_rect(play_area: Rect, tile_count: i32) -> Rect {
    let side = u16::try_from(tile_count).unwrap_or(u16::MAX).saturating_add(2);
    Rect {
        x: play_area.x,
        y: play_area.y,
        width: play_area.width.min(side),
        height: play_area.height.min(side),
    }
}

fn render_apple(frame: &mut Frame<'_>, inner: Rect, snapshot: &Snapshot<'_>, theme: &Theme) {
    let Some((x, y)) = cell_to_terminal(inner, snapshot.tile_count, snapshot.food) else {
        return;
    };

    let buffer = frame.buffer_mut();
    buffer.set_string(x, y, GLYPH_APPLE, Style::new().fg(theme.apple));
}

fn render_bonus(frame: &mut Frame<'_>, inner: Rect, snapshot: &Snapshot<'_>, theme: &Theme) {
    let Some(anchor) = snapshot.bonus else {
        return;
    };

    // The bonus occupies a 2×2 footprint anchored at its top-left cell.
    let buffer = frame.buffer_mut();
    for dy in 0..2 {
        for dx in 0..2 {
            let cell = Position {
                x: anchor.x + dx,
                y: anchor.y + dy,
            };
            let Some((x, y)) = cell_to_terminal(inner, snapshot.tile_count, cell) else {
                continue;
            };
            buffer.set_string(
                x,
                y,
                GLYPH_BONUS,
                Style::new().fg(theme.bonus).add_modifier(Modifier::BOLD),
            );
        }
    }
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, snapshot: &Snapshot<'_>, theme: &Theme) {
    let head = snapshot.snake.head();

    let buffer = frame.buffer_mut();
    for segment in snapshot.snake.segments() {
        let Some((x, y)) = cell_to_terminal(inner, snapshot.tile_count, *segment) else {
            continue;
        };

        if *segment == head {
            buffer.set_string(
                x,
                y,
                head_glyph(snapshot.snake.heading()),
                Style::new()
                    .fg(theme.snake_head)
                    .add_modifier(Modifier::BOLD),
            );
        } else {
            buffer.set_string(x, y, GLYPH_SNAKE_BODY, Style::new().fg(theme.snake_body));
        }
    }
}

fn head_glyph(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => GLYPH_SNAKE_HEAD_UP,
        Direction::Down => GLYPH_SNAKE_HEAD_DOWN,
        Direction::Left => GLYPH_SNAKE_HEAD_LEFT,
        Direction::Right => GLYPH_SNAKE_HEAD_RIGHT,
    }
}

fn cell_to_terminal(inner: Rect, tile_count: i32, position: Position) -> Option<(u16, u16)> {
    if position.x < 0 || position.y < 0 || position.x >= tile_count || position.y >= tile_count {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x >= inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
