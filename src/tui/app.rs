use crate::cards::{build_cards, export_field_names};
use crate::export::{FileSink, build_csv};
use crate::host::{Envelope, Settings};
use crate::tui::action::{Action, ActionCategory};
use crate::tui::component::Component;
use crate::tui::components::{CardGrid, ExportDialog, MessageDialog, MessageKind, StatusBar};
use crate::tui::keybindings::KeyBindings;
use crate::tui::theme::Theme;
use color_eyre::Result;
use crossterm::event::KeyEvent;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use tracing::{debug, info};

/// Host gap values are pixel units; the terminal renders in cells.
const PIXELS_PER_CELL: usize = 8;

/// Top-level application state: the card grid plus its dialogs, driven by
/// keyboard actions and inbound host messages.
pub struct App {
    grid: CardGrid,
    status_bar: StatusBar,
    export_dialog: ExportDialog,
    message_dialog: MessageDialog,
    keybindings: KeyBindings,
    theme: Theme,
    settings: Settings,
    sink: Box<dyn FileSink>,
    show_help: bool,
    should_quit: bool,
}

impl App {
    pub fn new(sink: Box<dyn FileSink>, keybindings: KeyBindings, theme: Theme) -> Self {
        Self {
            grid: CardGrid::new(theme.clone()),
            status_bar: StatusBar::new(theme.clone()),
            export_dialog: ExportDialog::new(theme.clone()),
            message_dialog: MessageDialog::new(theme.clone()),
            keybindings,
            theme,
            settings: Settings::default(),
            sink,
            show_help: false,
            should_quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn grid(&self) -> &CardGrid {
        &self.grid
    }

    /// Apply one host message. Messages that are not `propertiesChange` are
    /// ignored; `vizData` and `settings` slices apply independently.
    pub fn apply_envelope(&mut self, envelope: Envelope) {
        if !envelope.is_properties_change() {
            debug!(kind = %envelope.kind, "ignoring host message");
            return;
        }
        let Some(data) = envelope.data else {
            return;
        };
        if let Some(viz) = &data.viz_data {
            let cards = build_cards(viz);
            info!(count = cards.len(), "rebuilt card list from host payload");
            self.grid.set_cards(cards);
        }
        if let Some(settings) = data.settings {
            let columns = settings.columns() as usize;
            let gap_cells = (settings.gap() as usize).div_ceil(PIXELS_PER_CELL);
            self.grid.set_layout(columns, gap_cells);
            self.settings = settings;
        }
    }

    pub fn handle_key(&mut self, key: &KeyEvent) -> Result<()> {
        if let Some(action) = self.keybindings.get_action(key) {
            self.dispatch(action)?;
        }
        Ok(())
    }

    /// Route an action: modal layers first, then the grid.
    pub fn dispatch(&mut self, action: Action) -> Result<()> {
        if self.message_dialog.open {
            self.message_dialog.handle_action(action)?;
            return Ok(());
        }

        if self.export_dialog.open {
            self.export_dialog.handle_action(action)?;
            if let Some(fields) = self.export_dialog.take_confirmed() {
                self.perform_export(fields);
            }
            return Ok(());
        }

        if self.show_help {
            if matches!(action, Action::Cancel | Action::Confirm | Action::ToggleHelp) {
                self.show_help = false;
            }
            return Ok(());
        }

        match action {
            Action::Quit => {
                self.should_quit = true;
            }
            Action::ToggleHelp => {
                self.show_help = true;
            }
            Action::Export => {
                self.open_export_dialog();
            }
            _ => {
                self.grid.handle_action(action)?;
            }
        }
        Ok(())
    }

    /// Export preconditions are user warnings, not errors.
    fn open_export_dialog(&mut self) {
        if self.grid.selected_count() == 0 {
            self.message_dialog.show(
                MessageKind::Warning,
                "Export",
                "No cards selected. Select at least one card before exporting.",
            );
            return;
        }
        let fields = export_field_names(self.grid.cards());
        if fields.is_empty() {
            self.message_dialog.show(
                MessageKind::Warning,
                "Export",
                "The selected cards have no exportable fields.",
            );
            return;
        }
        self.export_dialog.open_with(fields);
    }

    fn perform_export(&mut self, fields: Vec<String>) {
        let selected = self.grid.selected_cards();
        match build_csv(&selected, &fields) {
            Ok(export) => match self.sink.save(&export) {
                Ok(path) => {
                    info!(path = %path.display(), rows = selected.len(), "export written");
                    self.message_dialog.show(
                        MessageKind::Success,
                        "Export complete",
                        &format!("Wrote {} card(s) to {}", selected.len(), path.display()),
                    );
                }
                Err(e) => {
                    self.message_dialog.show(
                        MessageKind::Error,
                        "Export failed",
                        &format!("Could not write the CSV file: {e}"),
                    );
                }
            },
            Err(e) => {
                self.message_dialog
                    .show(MessageKind::Warning, "Export", &e.to_string());
            }
        }
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(frame.area());

        self.status_bar
            .set_counts(self.grid.selected_count(), self.grid.total());

        self.grid.render(frame, chunks[0]);
        self.status_bar.render(frame, chunks[1]);

        if self.show_help {
            self.render_help(frame, frame.area());
        }
        self.export_dialog.render(frame, frame.area());
        self.message_dialog.render(frame, frame.area());
    }

    fn render_help(&self, frame: &mut Frame, area: Rect) {
        let help_area = centered_rect(60, 80, area);
        frame.render_widget(Clear, help_area);

        let mut lines: Vec<Line> = Vec::new();
        for category in [
            ActionCategory::Navigation,
            ActionCategory::Selection,
            ActionCategory::Export,
            ActionCategory::View,
            ActionCategory::Application,
        ] {
            lines.push(Line::from(Span::styled(
                category.to_string(),
                self.theme.card_title_style(),
            )));
            for action in Action::all() {
                if action.category() != category {
                    continue;
                }
                let keys = self.keybindings.get_keys_for_action(action);
                if keys.is_empty() {
                    continue;
                }
                lines.push(Line::from(vec![
                    Span::styled(format!("  {:<18}", keys.join(", ")), self.theme.link_style()),
                    Span::raw(action.description()),
                ]));
            }
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(
            "Press Esc to close",
            self.theme.muted_style(),
        )));

        let block = Block::default()
            .title(" Help ")
            .borders(Borders::ALL)
            .border_style(self.theme.dialog_border_style());
        frame.render_widget(Paragraph::new(lines).block(block), help_area);
    }
}

/// Centered sub-rect sized as a percentage of `area`.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
