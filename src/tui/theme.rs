use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};

/// Color theme for the gallery UI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,

    // Base colors
    pub background: Color,
    pub foreground: Color,
    pub border: Color,
    pub border_focused: Color,

    // Card colors
    pub card_title: Color,
    pub cursor_highlight: Color,
    pub selected_mark: Color,
    pub category_badge: Color,
    pub image_placeholder: Color,
    pub link_marker: Color,
    pub muted: Color,

    // Status / dialogs
    pub status_bar: Color,
    pub status_bar_text: Color,
    pub dialog_border: Color,
    pub error: Color,
    pub success: Color,
    pub warning: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            background: Color::Reset,
            foreground: Color::White,
            border: Color::DarkGray,
            border_focused: Color::Cyan,
            card_title: Color::White,
            cursor_highlight: Color::Yellow,
            selected_mark: Color::Green,
            category_badge: Color::Magenta,
            image_placeholder: Color::DarkGray,
            link_marker: Color::Blue,
            muted: Color::DarkGray,
            status_bar: Color::DarkGray,
            status_bar_text: Color::White,
            dialog_border: Color::Cyan,
            error: Color::Red,
            success: Color::Green,
            warning: Color::Yellow,
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            background: Color::White,
            foreground: Color::Black,
            border: Color::Gray,
            border_focused: Color::Blue,
            card_title: Color::Black,
            cursor_highlight: Color::Blue,
            selected_mark: Color::Green,
            category_badge: Color::Magenta,
            image_placeholder: Color::Gray,
            link_marker: Color::Blue,
            muted: Color::Gray,
            status_bar: Color::Gray,
            status_bar_text: Color::Black,
            dialog_border: Color::Blue,
            error: Color::Red,
            success: Color::Green,
            warning: Color::Yellow,
        }
    }

    pub fn border_style(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.border_focused)
        } else {
            Style::default().fg(self.border)
        }
    }

    pub fn card_border_style(&self, at_cursor: bool, selected: bool) -> Style {
        if at_cursor {
            Style::default()
                .fg(self.cursor_highlight)
                .add_modifier(Modifier::BOLD)
        } else if selected {
            Style::default().fg(self.selected_mark)
        } else {
            Style::default().fg(self.border)
        }
    }

    pub fn card_title_style(&self) -> Style {
        Style::default()
            .fg(self.card_title)
            .add_modifier(Modifier::BOLD)
    }

    pub fn selected_mark_style(&self) -> Style {
        Style::default()
            .fg(self.selected_mark)
            .add_modifier(Modifier::BOLD)
    }

    pub fn badge_style(&self) -> Style {
        Style::default()
            .fg(self.category_badge)
            .add_modifier(Modifier::BOLD)
    }

    pub fn image_placeholder_style(&self) -> Style {
        Style::default().fg(self.image_placeholder)
    }

    pub fn link_style(&self) -> Style {
        Style::default().fg(self.link_marker)
    }

    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn status_bar_style(&self) -> Style {
        Style::default().bg(self.status_bar).fg(self.status_bar_text)
    }

    pub fn dialog_border_style(&self) -> Style {
        Style::default().fg(self.dialog_border)
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error).add_modifier(Modifier::BOLD)
    }

    pub fn success_style(&self) -> Style {
        Style::default().fg(self.success)
    }

    pub fn warning_style(&self) -> Style {
        Style::default().fg(self.warning)
    }
}
