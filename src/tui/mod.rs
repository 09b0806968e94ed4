//! Terminal UI layer: components, actions, keybindings, and the app shell.

pub mod action;
pub mod app;
pub mod component;
pub mod components;
pub mod keybindings;
pub mod theme;

pub use action::{Action, ActionCategory};
pub use app::{App, centered_rect};
pub use component::{Component, Focusable};
pub use components::{CardGrid, ExportDialog, MessageDialog, MessageKind, StatusBar};
pub use keybindings::{KeyBinding, KeyBindings, KeyPattern};
pub use theme::Theme;
