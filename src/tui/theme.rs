//! TUI Theme configuration
//!
//! Everforest palette for the picker, built once at startup and passed by
//! reference into rendering. Supports multiple color depths for terminal
//! compatibility.

use ratatui::style::{Color, Modifier, Style};

/// Rows of margin above and below the list
pub const MARGIN_VERTICAL: u16 = 1;

/// Columns of margin left and right of the list
pub const MARGIN_HORIZONTAL: u16 = 2;

/// Total (horizontal, vertical) space taken by the margins
pub fn frame_size() -> (u16, u16) {
    (MARGIN_HORIZONTAL * 2, MARGIN_VERTICAL * 2)
}

/// Terminal color capability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Basic 16 ANSI colors (maximum compatibility)
    Basic,
    /// 256 color palette
    #[default]
    Indexed,
    /// True color (24-bit RGB)
    TrueColor,
}

impl ColorMode {
    /// Detect the best color mode for the current terminal
    pub fn detect() -> Self {
        Self::from_env(
            std::env::var("COLORTERM").ok().as_deref(),
            std::env::var("TERM").ok().as_deref(),
        )
    }

    /// Decide from `$COLORTERM` and `$TERM`
    pub fn from_env(colorterm: Option<&str>, term: Option<&str>) -> Self {
        if matches!(colorterm, Some("truecolor" | "24bit")) {
            return Self::TrueColor;
        }

        match term {
            Some(term) if term.contains("kitty") || term.contains("alacritty") => Self::TrueColor,
            Some(term) if term.contains("256color") => Self::Indexed,
            _ => Self::Basic,
        }
    }
}

/// Theme configuration for the picker
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    // Items
    pub normal_title: Color,
    pub normal_desc: Color,
    pub selected_title: Color,
    pub selected_desc: Color,
    pub selected_border: Color,
    pub dimmed_title: Color,
    pub dimmed_desc: Color,
    pub filter_match: Color,

    // Title badge
    pub title_bg: Color,
    pub title_fg: Color,

    // Filter input
    pub filter_prompt: Color,
    pub filter_text: Color,
    pub filter_cursor: Color,

    // Status, pagination and help
    pub status: Color,
    pub pagination_active: Color,
    pub pagination_inactive: Color,
    pub help: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::for_color_mode(ColorMode::detect())
    }
}

impl Theme {
    /// Create a theme for the specified color mode
    pub fn for_color_mode(mode: ColorMode) -> Self {
        match mode {
            ColorMode::Basic => Self::basic(),
            ColorMode::Indexed => Self::indexed(),
            ColorMode::TrueColor => Self::truecolor(),
        }
    }

    /// Basic 16-color theme
    pub fn basic() -> Self {
        Self {
            normal_title: Color::Reset,
            normal_desc: Color::Gray,
            selected_title: Color::Green,
            selected_desc: Color::Cyan,
            selected_border: Color::Green,
            dimmed_title: Color::DarkGray,
            dimmed_desc: Color::DarkGray,
            filter_match: Color::Red,

            title_bg: Color::Green,
            title_fg: Color::Black,

            filter_prompt: Color::Green,
            filter_text: Color::Reset,
            filter_cursor: Color::Green,

            status: Color::DarkGray,
            pagination_active: Color::Gray,
            pagination_inactive: Color::DarkGray,
            help: Color::DarkGray,
        }
    }

    /// 256-color approximation of Everforest
    pub fn indexed() -> Self {
        Self {
            normal_title: Color::Indexed(187),
            normal_desc: Color::Indexed(247),
            selected_title: Color::Indexed(144),
            selected_desc: Color::Indexed(109),
            selected_border: Color::Indexed(144),
            dimmed_title: Color::Indexed(244),
            dimmed_desc: Color::Indexed(242),
            filter_match: Color::Indexed(174),

            title_bg: Color::Indexed(144),
            title_fg: Color::Indexed(235),

            filter_prompt: Color::Indexed(144),
            filter_text: Color::Indexed(187),
            filter_cursor: Color::Indexed(144),

            status: Color::Indexed(244),
            pagination_active: Color::Indexed(250),
            pagination_inactive: Color::Indexed(240),
            help: Color::Indexed(242),
        }
    }

    /// Everforest in true color
    pub fn truecolor() -> Self {
        Self {
            normal_title: Color::Rgb(0xd3, 0xc6, 0xaa),   // Foreground
            normal_desc: Color::Rgb(0x9d, 0xa9, 0xa0),    // Dimmer
            selected_title: Color::Rgb(0xa7, 0xc0, 0x80), // Green
            selected_desc: Color::Rgb(0x7f, 0xbb, 0xb3),  // Blue
            selected_border: Color::Rgb(0xa7, 0xc0, 0x80),
            dimmed_title: Color::Rgb(0x7a, 0x84, 0x78),   // Greyish green
            dimmed_desc: Color::Rgb(0x5c, 0x6a, 0x72),    // Greyish blue
            filter_match: Color::Rgb(0xe6, 0x7e, 0x80),   // Red

            title_bg: Color::Rgb(0xa7, 0xc0, 0x80),
            title_fg: Color::Rgb(0x27, 0x2e, 0x33),       // Background dark

            filter_prompt: Color::Rgb(0xa7, 0xc0, 0x80),
            filter_text: Color::Rgb(0xd3, 0xc6, 0xaa),
            filter_cursor: Color::Rgb(0xa7, 0xc0, 0x80),

            status: Color::Rgb(0x85, 0x92, 0x89),
            pagination_active: Color::Rgb(0xd3, 0xc6, 0xaa),
            pagination_inactive: Color::Rgb(0x5c, 0x6a, 0x72),
            help: Color::Rgb(0x7a, 0x84, 0x78),
        }
    }

    /// Style for the title badge
    pub fn title(&self) -> Style {
        Style::default()
            .bg(self.title_bg)
            .fg(self.title_fg)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for matched characters, layered over the item style
    pub fn filter_match(&self) -> Style {
        Style::default()
            .fg(self.filter_match)
            .add_modifier(Modifier::UNDERLINED)
    }

    /// Style for the block cursor in the filter input
    pub fn filter_cursor(&self) -> Style {
        Style::default().bg(self.filter_cursor)
    }
}
