use crate::tui::action::Action;
use crate::tui::component::Component;
use crate::tui::theme::Theme;
use color_eyre::Result;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

/// Severity of a message shown in the dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Warning,
    Error,
    Success,
}

/// Modal dialog for informational and warning messages
#[derive(Debug, Clone)]
pub struct MessageDialog {
    pub title: String,
    pub message: String,
    pub kind: MessageKind,
    pub open: bool,
    theme: Theme,
}

impl MessageDialog {
    pub fn new(theme: Theme) -> Self {
        Self {
            title: String::new(),
            message: String::new(),
            kind: MessageKind::Info,
            open: false,
            theme,
        }
    }

    pub fn show(&mut self, kind: MessageKind, title: &str, message: &str) {
        self.kind = kind;
        self.title = title.to_string();
        self.message = message.to_string();
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    fn accent_style(&self) -> Style {
        match self.kind {
            MessageKind::Info => self.theme.dialog_border_style(),
            MessageKind::Warning => self.theme.warning_style(),
            MessageKind::Error => self.theme.error_style(),
            MessageKind::Success => self.theme.success_style(),
        }
    }
}

impl Component for MessageDialog {
    fn handle_action(&mut self, action: Action) -> Result<bool> {
        if !self.open {
            return Ok(false);
        }
        match action {
            Action::Confirm | Action::Cancel => {
                self.close();
                Ok(true)
            }
            // Swallow everything else while the dialog is up
            _ => Ok(true),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if !self.open {
            return;
        }

        let width = area.width.saturating_sub(4).min(60).max(20);
        let wrapped = textwrap::wrap(&self.message, width.saturating_sub(4) as usize);
        let height = (wrapped.len() as u16 + 4).min(area.height);

        let dialog_area = Rect {
            x: area.x + (area.width.saturating_sub(width)) / 2,
            y: area.y + (area.height.saturating_sub(height)) / 2,
            width,
            height,
        };

        frame.render_widget(Clear, dialog_area);

        let mut lines: Vec<Line> = wrapped
            .iter()
            .map(|l| Line::from(l.to_string()))
            .collect();
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Press Enter or Esc to close",
            self.theme.muted_style(),
        )));

        let block = Block::default()
            .title(format!(" {} ", self.title))
            .borders(Borders::ALL)
            .border_style(self.accent_style());

        let paragraph = Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Left);

        frame.render_widget(paragraph, dialog_area);
    }

    fn supported_actions(&self) -> &[Action] {
        &[Action::Confirm, Action::Cancel]
    }

    fn name(&self) -> &str {
        "MessageDialog"
    }
}
