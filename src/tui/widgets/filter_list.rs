//! Filterable, paginated list widget
//!
//! [`FilterListState`] owns the filter text, the visible subset, and the
//! cursor. It stores indices into the caller's items and never mutates them,
//! so clearing the filter restores the original list exactly.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::StatefulWidget,
};

use crate::project::Entry;
use crate::tui::fuzzy::fuzzy_match;
use crate::tui::theme::Theme;

/// Rows used by each item: title, description, spacer
pub const ITEM_HEIGHT: u16 = 3;

/// Rows used by the title, status, pagination and help lines plus spacers
pub const CHROME_HEIGHT: u16 = 6;

const SELECTED_PREFIX: &str = "│ ";
const NORMAL_PREFIX: &str = "  ";

/// Where the user is with respect to the filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    /// Every item shown, keys navigate
    #[default]
    Unfiltered,
    /// Keys edit the filter text
    Filtering,
    /// Filter committed, keys navigate the matches
    FilterApplied,
}

/// One visible item and the characters of its filter key that matched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    /// Index into the item slice
    pub index: usize,
    /// Char positions in the filter key that matched
    pub positions: Vec<usize>,
}

/// Filter list state
#[derive(Debug, Default)]
pub struct FilterListState {
    mode: FilterMode,
    filter: String,
    matches: Vec<Match>,
    total: usize,
    cursor: usize,
    width: u16,
    height: u16,
    show_full_help: bool,
}

impl FilterListState {
    /// Create state showing every item
    pub fn new(items: &[Entry]) -> Self {
        let mut state = Self::default();
        state.refilter(items);
        state
    }

    pub fn mode(&self) -> FilterMode {
        self.mode
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Visible items in display order
    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    /// Number of items before filtering
    pub fn total(&self) -> usize {
        self.total
    }

    /// Cursor position within the visible items
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Item index under the cursor
    pub fn selected(&self) -> Option<usize> {
        self.matches.get(self.cursor).map(|m| m.index)
    }

    /// Whether items should render dimmed (typing with nothing typed yet)
    pub fn is_dimmed(&self) -> bool {
        self.mode == FilterMode::Filtering && self.filter.is_empty()
    }

    pub fn show_full_help(&self) -> bool {
        self.show_full_help
    }

    pub fn toggle_help(&mut self) {
        self.show_full_help = !self.show_full_help;
    }

    /// Open the filter input, keeping any existing text
    pub fn start_filtering(&mut self) {
        self.mode = FilterMode::Filtering;
    }

    /// Commit the filter and return to navigation
    pub fn accept_filter(&mut self) {
        self.mode = if self.filter.is_empty() {
            FilterMode::Unfiltered
        } else {
            FilterMode::FilterApplied
        };
    }

    /// Drop the filter and show every item
    pub fn clear_filter(&mut self, items: &[Entry]) {
        self.filter.clear();
        self.mode = FilterMode::Unfiltered;
        self.refilter(items);
    }

    /// Replace the filter text
    pub fn set_filter(&mut self, text: &str, items: &[Entry]) {
        self.filter = text.to_string();
        self.refilter(items);
    }

    /// Append a character to the filter
    pub fn push_char(&mut self, c: char, items: &[Entry]) {
        self.filter.push(c);
        self.refilter(items);
    }

    /// Remove the last character of the filter
    pub fn pop_char(&mut self, items: &[Entry]) {
        if self.filter.pop().is_some() {
            self.refilter(items);
        }
    }

    fn refilter(&mut self, items: &[Entry]) {
        self.total = items.len();

        let mut scored: Vec<(i64, Match)> = items
            .iter()
            .enumerate()
            .filter_map(|(index, item)| {
                fuzzy_match(item.filter_value(), &self.filter)
                    .map(|m| (m.score, Match { index, positions: m.positions }))
            })
            .collect();

        // Stable: equal scores keep their original order
        scored.sort_by(|a, b| b.0.cmp(&a.0));

        self.matches = scored.into_iter().map(|(_, m)| m).collect();
        self.cursor = 0;
    }

    /// Select the next item, wrapping to the top
    pub fn next(&mut self) {
        if self.matches.is_empty() {
            return;
        }
        self.cursor = if self.cursor + 1 >= self.matches.len() {
            0
        } else {
            self.cursor + 1
        };
    }

    /// Select the previous item, wrapping to the bottom
    pub fn previous(&mut self) {
        if self.matches.is_empty() {
            return;
        }
        self.cursor = if self.cursor == 0 {
            self.matches.len() - 1
        } else {
            self.cursor - 1
        };
    }

    pub fn first(&mut self) {
        self.cursor = 0;
    }

    pub fn last(&mut self) {
        self.cursor = self.matches.len().saturating_sub(1);
    }

    /// Move to the start of the next page
    pub fn next_page(&mut self) {
        if self.page() + 1 < self.total_pages() {
            self.cursor = ((self.page() + 1) * self.per_page()).min(self.matches.len() - 1);
        }
    }

    /// Move to the start of the previous page
    pub fn previous_page(&mut self) {
        if self.page() > 0 {
            self.cursor = (self.page() - 1) * self.per_page();
        }
    }

    /// Set the renderable size of the list
    pub fn set_size(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    /// Renderable (width, height) of the list
    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Items that fit on one page (at least one)
    pub fn per_page(&self) -> usize {
        (self.height.saturating_sub(CHROME_HEIGHT) / ITEM_HEIGHT).max(1) as usize
    }

    pub fn page(&self) -> usize {
        self.cursor / self.per_page()
    }

    pub fn total_pages(&self) -> usize {
        self.matches.len().div_ceil(self.per_page()).max(1)
    }
}

/// Filterable list widget
pub struct FilterList<'a> {
    items: &'a [Entry],
    theme: &'a Theme,
    title: &'a str,
}

impl<'a> FilterList<'a> {
    pub fn new(items: &'a [Entry], theme: &'a Theme) -> Self {
        Self {
            items,
            theme,
            title: "",
        }
    }

    /// Set the badge text shown while not filtering
    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    fn title_line(&self, state: &FilterListState) -> Line<'a> {
        if state.mode() == FilterMode::Filtering {
            Line::from(vec![
                Span::styled("Filter: ", Style::default().fg(self.theme.filter_prompt)),
                Span::styled(
                    state.filter().to_string(),
                    Style::default().fg(self.theme.filter_text),
                ),
                Span::styled(" ", self.theme.filter_cursor()),
            ])
        } else {
            Line::from(Span::styled(format!(" {} ", self.title), self.theme.title()))
        }
    }

    fn status_line(&self, state: &FilterListState) -> Line<'a> {
        let visible = state.matches().len();
        let text = if visible == 0 {
            if state.filter().is_empty() {
                "No items".to_string()
            } else {
                "Nothing matched".to_string()
            }
        } else if state.filter().is_empty() {
            format!("{} {}", visible, plural(visible))
        } else {
            format!("“{}” {} of {} {}", state.filter(), visible, state.total(), plural(state.total()))
        };

        Line::from(Span::styled(text, Style::default().fg(self.theme.status)))
    }

    fn item_lines(&self, state: &FilterListState, m: &Match, selected: bool) -> (Line<'a>, Line<'a>) {
        let entry = &self.items[m.index];

        let (title_style, desc_style) = if selected && !state.is_dimmed() {
            (
                Style::default().fg(self.theme.selected_title),
                Style::default().fg(self.theme.selected_desc),
            )
        } else if state.is_dimmed() {
            (
                Style::default().fg(self.theme.dimmed_title),
                Style::default().fg(self.theme.dimmed_desc),
            )
        } else {
            (
                Style::default().fg(self.theme.normal_title),
                Style::default().fg(self.theme.normal_desc),
            )
        };

        let prefix = if selected && !state.is_dimmed() {
            Span::styled(SELECTED_PREFIX, Style::default().fg(self.theme.selected_border))
        } else {
            Span::raw(NORMAL_PREFIX)
        };

        let mut title_spans = vec![prefix.clone()];
        title_spans.extend(highlight(
            entry.title(),
            &m.positions,
            title_style,
            title_style.patch(self.theme.filter_match()),
        ));

        let desc = Line::from(vec![
            prefix,
            Span::styled(entry.description().to_string(), desc_style),
        ]);

        (Line::from(title_spans), desc)
    }

    fn pagination_line(&self, state: &FilterListState) -> Option<Line<'a>> {
        let pages = state.total_pages();
        if pages <= 1 {
            return None;
        }

        let spans = (0..pages)
            .map(|p| {
                if p == state.page() {
                    Span::styled("•", Style::default().fg(self.theme.pagination_active))
                } else {
                    Span::styled("○", Style::default().fg(self.theme.pagination_inactive))
                }
            })
            .collect::<Vec<_>>();

        Some(Line::from(spans))
    }

    fn help_line(&self, state: &FilterListState) -> Line<'a> {
        let text = match (state.mode(), state.show_full_help()) {
            (FilterMode::Filtering, _) => {
                "enter choose • esc clear • tab apply • ↑/↓ move • ctrl+c quit"
            }
            (_, false) => "↑/k up • ↓/j down • / filter • enter choose • q quit • ? more",
            (_, true) => {
                "↑/k up • ↓/j down • ←/h prev page • →/l next page • g/home first • G/end last • / filter • esc clear filter • enter choose • q quit • ? less"
            }
        };

        Line::from(Span::styled(text, Style::default().fg(self.theme.help)))
    }
}

impl StatefulWidget for FilterList<'_> {
    type State = FilterListState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let bottom = area.y + area.height;
        let mut y = area.y;

        buf.set_line(area.x, y, &self.title_line(state), area.width);
        y += 2;
        if y < bottom {
            buf.set_line(area.x, y, &self.status_line(state), area.width);
        }
        y += 2;

        let per_page = state.per_page();
        let start = state.page() * per_page;
        let cursor = state.cursor();

        for (offset, m) in state.matches().iter().enumerate().skip(start).take(per_page) {
            if y + 1 >= bottom {
                break;
            }
            let (title, desc) = self.item_lines(state, m, offset == cursor);
            buf.set_line(area.x, y, &title, area.width);
            buf.set_line(area.x, y + 1, &desc, area.width);
            y += ITEM_HEIGHT;
        }

        // Footer rows would overlap the header or items
        if area.height < CHROME_HEIGHT + ITEM_HEIGHT {
            return;
        }
        if let Some(pages) = self.pagination_line(state) {
            buf.set_line(area.x, bottom - 2, &pages, area.width);
        }
        buf.set_line(area.x, bottom - 1, &self.help_line(state), area.width);
    }
}

/// Split `text` into spans, styling the chars at `positions` with `matched`
fn highlight(text: &str, positions: &[usize], base: Style, matched: Style) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut run = String::new();
    let mut run_matched = false;

    for (i, c) in text.chars().enumerate() {
        let is_match = positions.contains(&i);
        if is_match != run_matched && !run.is_empty() {
            let style = if run_matched { matched } else { base };
            spans.push(Span::styled(std::mem::take(&mut run), style));
        }
        run_matched = is_match;
        run.push(c);
    }

    if !run.is_empty() {
        let style = if run_matched { matched } else { base };
        spans.push(Span::styled(run, style));
    }

    spans
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "item" } else { "items" }
}
