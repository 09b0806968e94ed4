use crate::tui::action::Action;
use crate::tui::component::Component;
use crate::tui::theme::Theme;
use color_eyre::Result;
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

/// Bottom status bar showing selection counts and key hints
#[derive(Debug, Clone)]
pub struct StatusBar {
    selected: usize,
    total: usize,
    theme: Theme,
}

impl StatusBar {
    pub fn new(theme: Theme) -> Self {
        Self {
            selected: 0,
            total: 0,
            theme,
        }
    }

    pub fn set_counts(&mut self, selected: usize, total: usize) {
        self.selected = selected;
        self.total = total;
    }

    pub fn summary(&self) -> String {
        format!("Selected {} of {} cards", self.selected, self.total)
    }
}

impl Component for StatusBar {
    fn handle_action(&mut self, _action: Action) -> Result<bool> {
        Ok(false)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let hints = "Space: select | a: all | e: export | ?: help | q: quit";
        let summary = self.summary();

        let padding = area
            .width
            .saturating_sub((summary.len() + hints.len() + 2) as u16);
        let line = Line::from(vec![
            Span::raw(format!(" {}", summary)),
            Span::raw(" ".repeat(padding as usize)),
            Span::raw(format!("{} ", hints)),
        ]);

        let paragraph = Paragraph::new(line).style(self.theme.status_bar_style());
        frame.render_widget(paragraph, area);
    }

    fn supported_actions(&self) -> &[Action] {
        &[]
    }

    fn name(&self) -> &str {
        "StatusBar"
    }
}
