//! End-to-end pipeline tests: host message in, CSV bytes out.

use cardgrid::export::{CsvExport, FileSink, build_csv};
use cardgrid::tui::{Action, App, KeyBindings, Theme};
use cardgrid::{Selection, build_cards, export_field_names, parse_message};
use color_eyre::Result;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

fn catalog_message() -> String {
    json!({
        "type": "propertiesChange",
        "data": {
            "vizData": {
                "datasets": [
                    {
                        "p": "https://cdn.shop.example/items/100.jpg",
                        "n": "Desk lamp",
                        "c": "LIGHTING",
                        "m": "M-100",
                        "price": 49.9
                    },
                    {
                        "p": "out of stock",
                        "n": "Ghost item",
                        "c": "NONE",
                        "m": "M-101",
                        "price": 0
                    },
                    {
                        "p": "https://cdn.shop.example/items/102.webp",
                        "n": "Bookshelf, oak \"XL\"",
                        "c": "FURNITURE",
                        "m": "M-102",
                        "price": 239.0
                    }
                ],
                "fieldMap": {
                    "p": { "alias": "Preview" },
                    "n": { "alias": "Name" },
                    "c": { "alias": "LR_ZS" },
                    "m": { "alias": "Material ID" },
                    "price": { "alias": "Price" }
                },
                "locationMap": {
                    "dimensions": ["p", "n", "c", "m"],
                    "measures": ["price"]
                }
            },
            "settings": { "layout": { "columns": 2, "gap": 8 } }
        }
    })
    .to_string()
}

#[test]
fn message_to_cards_to_csv() {
    let envelope = parse_message(&catalog_message()).unwrap();
    assert!(envelope.is_properties_change());
    let data = envelope.data.unwrap();

    let cards = build_cards(data.viz_data.as_ref().unwrap());
    // The out-of-stock row has no image URL and is dropped.
    assert_eq!(cards.len(), 2);
    assert_eq!(cards[0].category.as_deref(), Some("LIGHTING"));
    assert_eq!(cards[0].material_id.as_deref(), Some("M-100"));

    // "Preview" is reserved and never exportable.
    let fields = export_field_names(&cards);
    assert_eq!(fields, vec!["Name", "LR_ZS", "Material ID", "Price"]);

    let mut selection = Selection::new();
    selection.select_all(cards.len());
    let selected = selection.resolve(&cards);

    let export = build_csv(&selected, &fields).unwrap();
    assert_eq!(export.content_type, "text/csv;charset=utf-8");
    assert_eq!(&export.bytes[..3], &[0xEF, 0xBB, 0xBF]);

    let text = std::str::from_utf8(&export.bytes).unwrap();
    let body = text.strip_prefix('\u{feff}').unwrap();
    let lines: Vec<&str> = body.lines().collect();
    assert_eq!(lines[0], "Name,LR_ZS,Material ID,Price");
    assert_eq!(lines[1], "Desk lamp,LIGHTING,M-100,49.9");
    // Comma and quotes in the name force quoting with doubled quotes.
    assert_eq!(lines[2], "\"Bookshelf, oak \"\"XL\"\"\",FURNITURE,M-102,239.0");
}

#[derive(Clone, Default)]
struct MemorySink {
    saved: Arc<Mutex<Vec<CsvExport>>>,
}

impl FileSink for MemorySink {
    fn save(&mut self, export: &CsvExport) -> Result<PathBuf> {
        self.saved.lock().unwrap().push(export.clone());
        Ok(PathBuf::from(&export.filename))
    }
}

#[test]
fn interactive_select_and_export() {
    let sink = MemorySink::default();
    let mut app = App::new(
        Box::new(sink.clone()),
        KeyBindings::default(),
        Theme::default(),
    );

    app.apply_envelope(parse_message(&catalog_message()).unwrap());
    assert_eq!(app.grid().total(), 2);

    app.dispatch(Action::SelectAll).unwrap();
    app.dispatch(Action::Export).unwrap();
    app.dispatch(Action::Confirm).unwrap();

    let saved = sink.saved.lock().unwrap();
    assert_eq!(saved.len(), 1);
    assert!(saved[0].filename.starts_with("cards_"));
    assert!(saved[0].filename.ends_with(".csv"));
    let text = String::from_utf8(saved[0].bytes.clone()).unwrap();
    // Header plus both selected cards.
    assert_eq!(text.lines().count(), 3);
}

#[test]
fn replacing_dataset_clears_selection() {
    let mut app = App::new(
        Box::new(MemorySink::default()),
        KeyBindings::default(),
        Theme::default(),
    );

    app.apply_envelope(parse_message(&catalog_message()).unwrap());
    app.dispatch(Action::ToggleSelect).unwrap();
    assert_eq!(app.grid().selected_count(), 1);

    app.apply_envelope(parse_message(&catalog_message()).unwrap());
    assert_eq!(app.grid().selected_count(), 0);
    assert_eq!(app.grid().total(), 2);
}

#[test]
fn malformed_messages_are_dropped() {
    for raw in ["", "not json", "[1,2]", "42", "\"propertiesChange\""] {
        assert!(parse_message(raw).is_none(), "accepted: {raw:?}");
    }
}
