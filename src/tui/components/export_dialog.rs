use crate::tui::action::Action;
use crate::tui::component::Component;
use crate::tui::theme::Theme;
use color_eyre::Result;
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

/// Modal dialog for choosing which fields go into the CSV export.
///
/// All fields start checked. Confirming with at least one field checked
/// closes the dialog and stashes the chosen names for the caller to take.
#[derive(Debug, Clone)]
pub struct ExportDialog {
    pub open: bool,
    fields: Vec<String>,
    checked: Vec<bool>,
    cursor: usize,
    warning: Option<String>,
    confirmed: Option<Vec<String>>,
    theme: Theme,
}

impl ExportDialog {
    pub fn new(theme: Theme) -> Self {
        Self {
            open: false,
            fields: Vec::new(),
            checked: Vec::new(),
            cursor: 0,
            warning: None,
            confirmed: None,
            theme,
        }
    }

    /// Open the dialog with every field checked
    pub fn open_with(&mut self, fields: Vec<String>) {
        self.checked = vec![true; fields.len()];
        self.fields = fields;
        self.cursor = 0;
        self.warning = None;
        self.confirmed = None;
        self.open = true;
    }

    /// Take the confirmed field names, if the user confirmed since the last call
    pub fn take_confirmed(&mut self) -> Option<Vec<String>> {
        self.confirmed.take()
    }

    pub fn chosen_fields(&self) -> Vec<String> {
        self.fields
            .iter()
            .zip(&self.checked)
            .filter(|&(_, &checked)| checked)
            .map(|(name, _)| name.clone())
            .collect()
    }

    fn all_checked(&self) -> bool {
        !self.checked.is_empty() && self.checked.iter().all(|&c| c)
    }
}

impl Component for ExportDialog {
    fn handle_action(&mut self, action: Action) -> Result<bool> {
        if !self.open {
            return Ok(false);
        }
        match action {
            Action::MoveUp => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            Action::MoveDown => {
                if self.cursor + 1 < self.fields.len() {
                    self.cursor += 1;
                }
            }
            Action::ToggleSelect => {
                if let Some(checked) = self.checked.get_mut(self.cursor) {
                    *checked = !*checked;
                    self.warning = None;
                }
            }
            Action::SelectAll => {
                let fill = !self.all_checked();
                self.checked.iter_mut().for_each(|c| *c = fill);
                self.warning = None;
            }
            Action::Confirm => {
                let chosen = self.chosen_fields();
                if chosen.is_empty() {
                    self.warning = Some("Choose at least one field to export".to_string());
                } else {
                    self.confirmed = Some(chosen);
                    self.open = false;
                }
            }
            Action::Cancel => {
                self.open = false;
            }
            _ => {}
        }
        Ok(true)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if !self.open {
            return;
        }

        let width = area.width.saturating_sub(4).min(50).max(24);
        let height = (self.fields.len() as u16 + 5).min(area.height);
        let dialog_area = Rect {
            x: area.x + (area.width.saturating_sub(width)) / 2,
            y: area.y + (area.height.saturating_sub(height)) / 2,
            width,
            height,
        };

        frame.render_widget(Clear, dialog_area);

        let mut lines: Vec<Line> = Vec::with_capacity(self.fields.len() + 3);
        for (i, name) in self.fields.iter().enumerate() {
            let mark = if self.checked[i] { "[x]" } else { "[ ]" };
            let style = if i == self.cursor {
                self.theme.card_title_style()
            } else {
                ratatui::style::Style::default()
            };
            lines.push(Line::from(Span::styled(
                format!(" {} {}", mark, name),
                style,
            )));
        }
        lines.push(Line::from(""));
        if let Some(warning) = &self.warning {
            lines.push(Line::from(Span::styled(
                format!(" {}", warning),
                self.theme.warning_style(),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                " Space: toggle | a: all | Enter: export | Esc: cancel",
                self.theme.muted_style(),
            )));
        }

        let block = Block::default()
            .title(" Export CSV ")
            .borders(Borders::ALL)
            .border_style(self.theme.dialog_border_style());

        frame.render_widget(Paragraph::new(lines).block(block), dialog_area);
    }

    fn supported_actions(&self) -> &[Action] {
        &[
            Action::MoveUp,
            Action::MoveDown,
            Action::ToggleSelect,
            Action::SelectAll,
            Action::Confirm,
            Action::Cancel,
        ]
    }

    fn name(&self) -> &str {
        "ExportDialog"
    }
}
