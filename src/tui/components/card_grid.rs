use crate::cards::{Card, is_preview_field};
use crate::selection::Selection;
use crate::tui::action::Action;
use crate::tui::component::{Component, Focusable};
use crate::tui::theme::Theme;
use crate::window::{self, GridLayout};
use color_eyre::Result;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tracing::debug;

/// Scrollable grid of cards with cursor navigation and multi-select.
///
/// Owns the authoritative card list and the selection over it. Navigation
/// moves a cursor through the grid; scrolling follows the cursor so it stays
/// in view. Only the cards inside the visible window are rendered.
#[derive(Debug, Clone)]
pub struct CardGrid {
    cards: Vec<Card>,
    selection: Selection,
    cursor: usize,
    scroll_top: usize,
    layout: GridLayout,
    // Updated on every render so key handling can page and clamp correctly
    // before the next frame.
    last_viewport_height: usize,
    focused: bool,
    theme: Theme,
}

impl CardGrid {
    pub fn new(theme: Theme) -> Self {
        Self {
            cards: Vec::new(),
            selection: Selection::new(),
            cursor: 0,
            scroll_top: 0,
            layout: GridLayout::default(),
            last_viewport_height: 20,
            focused: true,
            theme,
        }
    }

    /// Replace the card list. Resets the cursor, scroll position, and
    /// selection: indices into the old list mean nothing against the new one.
    pub fn set_cards(&mut self, cards: Vec<Card>) {
        debug!(count = cards.len(), "replacing card list");
        self.cards = cards;
        self.selection.clear();
        self.cursor = 0;
        self.scroll_top = 0;
    }

    pub fn set_layout(&mut self, columns: usize, gap: usize) {
        self.layout.columns = columns.max(1);
        self.layout.gap = gap;
        self.ensure_cursor_visible();
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selected_cards(&self) -> Vec<&Card> {
        self.selection.resolve(&self.cards)
    }

    pub fn selected_count(&self) -> usize {
        self.selection.len()
    }

    pub fn total(&self) -> usize {
        self.cards.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn columns(&self) -> usize {
        self.layout.columns()
    }

    fn viewport_rows(&self) -> usize {
        (self.last_viewport_height / self.layout.row_height()).max(1)
    }

    fn move_cursor_by(&mut self, delta: isize) {
        if self.cards.is_empty() {
            return;
        }
        let max = self.cards.len() - 1;
        self.cursor = self.cursor.saturating_add_signed(delta).min(max);
        self.ensure_cursor_visible();
    }

    fn ensure_cursor_visible(&mut self) {
        let row = self.cursor / self.columns();
        self.scroll_top = window::scroll_to_row(
            row,
            self.layout.row_height(),
            self.scroll_top,
            self.last_viewport_height,
        );
    }

    fn render_card(&self, frame: &mut Frame, area: Rect, index: usize) {
        let card = &self.cards[index];
        let at_cursor = index == self.cursor;
        let selected = self.selection.contains(index);

        let mark = if selected { "[x]" } else { "[ ]" };
        let mark_style = if selected {
            self.theme.selected_mark_style()
        } else {
            self.theme.muted_style()
        };

        let mut title = vec![Span::styled(format!(" {} ", mark), mark_style)];
        if let Some(category) = &card.category {
            title.push(Span::styled(format!("{} ", category), self.theme.badge_style()));
        }

        let block = Block::default()
            .title(Line::from(title))
            .borders(Borders::ALL)
            .border_style(self.theme.card_border_style(at_cursor, selected));

        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let mut lines: Vec<Line> = Vec::new();

        // Terminal stand-in for the card image.
        lines.push(Line::from(Span::styled(
            "[ image ]",
            self.theme.image_placeholder_style(),
        )));

        if let Some(material_id) = &card.material_id {
            lines.push(Line::from(Span::styled(
                material_id.clone(),
                self.theme.muted_style(),
            )));
        }

        for field in &card.fields {
            // The host's preview column feeds the image, never a field row.
            if is_preview_field(&field.name) {
                continue;
            }
            let value: &str = if field.value.is_empty() { "-" } else { &field.value };
            let mut spans = vec![Span::styled(
                format!("{}: ", field.name),
                self.theme.card_title_style(),
            )];
            if field.is_image {
                spans.push(Span::styled("[image]", self.theme.image_placeholder_style()));
            } else if field.is_url {
                spans.push(Span::styled("[link]", self.theme.link_style()));
            } else {
                spans.push(Span::raw(value.to_string()));
            }
            lines.push(Line::from(spans));
        }

        lines.truncate(inner.height as usize);
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

impl Component for CardGrid {
    fn handle_action(&mut self, action: Action) -> Result<bool> {
        let columns = self.columns() as isize;
        match action {
            Action::MoveUp => self.move_cursor_by(-columns),
            Action::MoveDown => self.move_cursor_by(columns),
            Action::MoveLeft => self.move_cursor_by(-1),
            Action::MoveRight => self.move_cursor_by(1),
            Action::PageUp => {
                self.move_cursor_by(-(self.viewport_rows() as isize) * columns);
            }
            Action::PageDown => {
                self.move_cursor_by(self.viewport_rows() as isize * columns);
            }
            Action::GoToTop => {
                self.cursor = 0;
                self.ensure_cursor_visible();
            }
            Action::GoToBottom => {
                self.cursor = self.cards.len().saturating_sub(1);
                self.ensure_cursor_visible();
            }
            Action::ToggleSelect => {
                if !self.cards.is_empty() {
                    self.selection.toggle(self.cursor);
                }
            }
            Action::SelectAll => {
                self.selection.select_all(self.cards.len());
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.last_viewport_height = area.height as usize;

        if self.cards.is_empty() {
            let empty = Paragraph::new("No image cards. Configure a dimension field containing image URLs.")
                .style(self.theme.muted_style())
                .alignment(Alignment::Center)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(self.theme.border_style(self.focused)),
                );
            frame.render_widget(empty, area);
            return;
        }

        let columns = self.columns();
        let w = window::visible_window(
            self.cards.len(),
            self.layout,
            self.scroll_top,
            area.height as usize,
        );

        let cell_width = (area.width as usize / columns).max(1);
        let row_height = self.layout.row_height();

        for index in w.first_card..w.end_card {
            let row = index / columns;
            let col = index % columns;
            let top = row * row_height;
            if top < self.scroll_top {
                continue;
            }
            let y = area.y as usize + (top - self.scroll_top);
            if y + self.layout.card_height > (area.y + area.height) as usize {
                continue;
            }
            let card_area = Rect {
                x: area.x + (col * cell_width) as u16,
                y: y as u16,
                width: cell_width.saturating_sub(self.layout.gap).max(3) as u16,
                height: self.layout.card_height as u16,
            };
            self.render_card(frame, card_area, index);
        }
    }

    fn supported_actions(&self) -> &[Action] {
        &[
            Action::MoveUp,
            Action::MoveDown,
            Action::MoveLeft,
            Action::MoveRight,
            Action::PageUp,
            Action::PageDown,
            Action::GoToTop,
            Action::GoToBottom,
            Action::ToggleSelect,
            Action::SelectAll,
        ]
    }

    fn name(&self) -> &str {
        "CardGrid"
    }
}

impl Focusable for CardGrid {
    fn is_focused(&self) -> bool {
        self.focused
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}
