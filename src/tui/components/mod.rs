pub mod card_grid;
pub mod export_dialog;
pub mod message_dialog;
pub mod status_bar;

pub use card_grid::CardGrid;
pub use export_dialog::ExportDialog;
pub use message_dialog::{MessageDialog, MessageKind};
pub use status_bar::StatusBar;
