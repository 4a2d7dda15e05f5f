use std::time::Duration;

use ratatui::style::Color;
use ratatui::symbols::border;

/// Logical board size in display pixels. 400 / 20 gives the 20×20 grid.
pub const DEFAULT_DISPLAY_SIZE: u32 = 400;

/// Edge length of one grid tile in display pixels.
pub const DEFAULT_TILE_SIZE: u32 = 20;

/// Base tick interval in milliseconds.
pub const BASE_TICK_INTERVAL_MS: u64 = 100;

/// Tick interval while the slow-motion window is active.
pub const SLOW_TICK_INTERVAL_MS: u64 = 200;

/// Wall-clock length of the slow-motion window in milliseconds.
pub const SLOW_WINDOW_MS: u64 = 5000;

/// Apples eaten between bonus orange spawns.
pub const APPLES_PER_BONUS: u32 = 10;

/// Points granted per apple.
pub const APPLE_POINTS: u32 = 1;

/// Segments gained per apple.
pub const APPLE_GROWTH: usize = 1;

/// Points granted per bonus orange.
pub const BONUS_POINTS: u32 = 10;

/// Segments gained per bonus orange.
pub const BONUS_GROWTH: usize = 5;

/// Chebyshev radius around the bonus anchor that counts as eating it.
///
/// The bonus is visually large, so its hitbox is the full 3×3 region around
/// the anchor rather than exact head-on-anchor overlap.
pub const BONUS_EAT_RADIUS: i32 = 1;

/// Tunable session parameters, grouped so the binary and tests share one
/// source of defaults.
#[derive(Debug, Clone, Copy)]
pub struct GameConfig {
    pub display_size: u32,
    pub tile_size: u32,
    pub base_tick_interval: Duration,
    pub slow_tick_interval: Duration,
    pub slow_window: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            display_size: DEFAULT_DISPLAY_SIZE,
            tile_size: DEFAULT_TILE_SIZE,
            base_tick_interval: Duration::from_millis(BASE_TICK_INTERVAL_MS),
            slow_tick_interval: Duration::from_millis(SLOW_TICK_INTERVAL_MS),
            slow_window: Duration::from_millis(SLOW_WINDOW_MS),
        }
    }
}

/// A color theme applied to all visual elements.
#[derive(Debug)]
pub struct Theme {
    pub name: &'static str,
    pub snake_head: Color,
    pub snake_body: Color,
    pub apple: Color,
    pub bonus: Color,
    pub play_bg: Color,
    pub border_fg: Color,
    pub hud_score: Color,
    pub hud_slow: Color,
    pub menu_title: Color,
    pub menu_footer: Color,
}

/// Red snake on dark, the original palette.
pub const THEME_CLASSIC: Theme = Theme {
    name: "classic",
    snake_head: Color::White,
    snake_body: Color::Red,
    apple: Color::Green,
    bonus: Color::Yellow,
    play_bg: Color::Black,
    border_fg: Color::White,
    hud_score: Color::White,
    hud_slow: Color::Yellow,
    menu_title: Color::Red,
    menu_footer: Color::DarkGray,
};

/// Ocean cyan theme.
pub const THEME_OCEAN: Theme = Theme {
    name: "ocean",
    snake_head: Color::White,
    snake_body: Color::Cyan,
    apple: Color::Yellow,
    bonus: Color::Magenta,
    play_bg: Color::Black,
    border_fg: Color::Cyan,
    hud_score: Color::Cyan,
    hud_slow: Color::Magenta,
    menu_title: Color::Cyan,
    menu_footer: Color::DarkGray,
};

/// Neon magenta theme.
pub const THEME_NEON: Theme = Theme {
    name: "neon",
    snake_head: Color::White,
    snake_body: Color::Magenta,
    apple: Color::Green,
    bonus: Color::Yellow,
    play_bg: Color::Black,
    border_fg: Color::Magenta,
    hud_score: Color::Magenta,
    hud_slow: Color::Yellow,
    menu_title: Color::Magenta,
    menu_footer: Color::DarkGray,
};

/// All available themes in lookup order.
pub const THEMES: &[Theme] = &[THEME_CLASSIC, THEME_OCEAN, THEME_NEON];

/// Returns the theme matching `name` (case-insensitive), if any.
#[must_use]
pub fn theme_by_name(name: &str) -> Option<&'static Theme> {
    THEMES
        .iter()
        .find(|theme| theme.name.eq_ignore_ascii_case(name))
}

/// Half-block border set: solid side faces the play area.
pub const BORDER_HALF_BLOCK: border::Set = border::Set {
    top_left: "▄",
    top_right: "▄",
    bottom_left: "▀",
    bottom_right: "▀",
    vertical_left: "█",
    vertical_right: "█",
    horizontal_top: "▄",
    horizontal_bottom: "▀",
};

pub const GLYPH_SNAKE_HEAD_UP: &str = "▲";
pub const GLYPH_SNAKE_HEAD_DOWN: &str = "▼";
pub const GLYPH_SNAKE_HEAD_LEFT: &str = "◀";
pub const GLYPH_SNAKE_HEAD_RIGHT: &str = "▶";
pub const GLYPH_SNAKE_BODY: &str = "█";
pub const GLYPH_APPLE: &str = "●";
pub const GLYPH_BONUS: &str = "▓";
