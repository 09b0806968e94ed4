pub mod cards;
pub mod classify;
pub mod export;
pub mod host;
pub mod logging;
pub mod selection;
pub mod tui;
pub mod window;

// Re-export commonly used types
pub use cards::{Card, Field, VizData, build_cards, export_field_names};
pub use export::{CsvExport, DiskSink, ExportError, FileSink, build_csv};
pub use host::{Envelope, Settings, parse_message};
pub use selection::Selection;
pub use tui::{Action, ActionCategory};
pub use window::{GridLayout, Window, visible_window};
