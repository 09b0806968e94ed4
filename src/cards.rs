//! Card building: projecting the host's raw `vizData` payload into an
//! ordered list of renderable cards.
//!
//! The card list is the authoritative index space. Selection, windowing and
//! export all refer to cards by position in this list, so it is rebuilt
//! deterministically and in full whenever a new payload arrives; partial
//! updates are not supported.

use crate::classify::{is_image_url, is_url};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// Role key for dimension field ids in the location map.
pub const DIMENSIONS: &str = "dimensions";
/// Role key for measure field ids in the location map.
pub const MEASURES: &str = "measures";

/// Classification-code field used for the card badge. Matched exactly on the
/// field key or display name, or as a substring of the display name.
pub const CATEGORY_FIELD: &str = "LR_ZS";

/// Display name reserved for the host's preview column. Never shown in card
/// field rows and never exportable.
pub const RESERVED_PREVIEW_FIELD: &str = "preview";

/// One row's worth of host data: field id to arbitrary scalar.
pub type Row = HashMap<String, Value>;

/// Host-supplied alias for a field id.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FieldAlias {
    #[serde(default)]
    pub alias: Option<String>,
}

/// The `vizData` slice of a `propertiesChange` message. Every part is
/// optional; a payload missing `datasets` or `fieldMap` builds an empty card
/// list rather than erroring.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VizData {
    #[serde(default)]
    pub datasets: Option<Vec<Row>>,
    #[serde(default)]
    pub field_map: Option<HashMap<String, FieldAlias>>,
    #[serde(default)]
    pub location_map: Option<HashMap<String, Vec<String>>>,
}

/// A classified field within a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Raw field identifier from the dataset schema.
    pub key: String,
    /// Display name: the alias, falling back to the key.
    pub name: String,
    /// String-coerced cell value; empty if absent or null.
    pub value: String,
    pub is_image: bool,
    pub is_url: bool,
}

/// One renderable unit derived from a dataset row, anchored to its primary
/// image URL. Rows with no image-classified field produce no card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub image_url: String,
    pub fields: Vec<Field>,
    /// Value of the classification-code field, when present and non-empty.
    pub category: Option<String>,
    /// Value of the material-id field, when present and non-empty.
    pub material_id: Option<String>,
}

impl Card {
    /// Value of the first field whose display name equals `name`.
    pub fn field_value(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }
}

/// Build the card list from a host payload.
///
/// Iteration order is dimension field ids then measure field ids, each in
/// their configured sequence. That order is load-bearing: the first
/// image-classified field wins as the primary image, and the first matching
/// well-known field wins as category/material id.
pub fn build_cards(viz: &VizData) -> Vec<Card> {
    let (Some(datasets), Some(field_map)) = (&viz.datasets, &viz.field_map) else {
        return Vec::new();
    };

    let empty = Vec::new();
    let location_map = viz.location_map.as_ref();
    let dimensions = location_map
        .and_then(|m| m.get(DIMENSIONS))
        .unwrap_or(&empty);
    let measures = location_map.and_then(|m| m.get(MEASURES)).unwrap_or(&empty);
    let all_field_ids: Vec<&String> = dimensions.iter().chain(measures.iter()).collect();

    let mut cards = Vec::new();
    for row in datasets {
        if let Some(card) = build_card(row, field_map, &all_field_ids) {
            cards.push(card);
        }
    }
    cards
}

fn build_card(
    row: &Row,
    field_map: &HashMap<String, FieldAlias>,
    all_field_ids: &[&String],
) -> Option<Card> {
    let mut image_url = String::new();
    let mut category = None;
    let mut material_id = None;
    let mut fields = Vec::with_capacity(all_field_ids.len());

    for &field_id in all_field_ids {
        let value = coerce_scalar(row.get(field_id));
        let name = field_map
            .get(field_id)
            .and_then(|f| f.alias.clone())
            .filter(|a| !a.is_empty())
            .unwrap_or_else(|| field_id.clone());
        let field_is_image = is_image_url(&value);
        let field_is_url = is_url(&value);

        if image_url.is_empty() && field_is_image {
            image_url = value.clone();
        }

        if category.is_none() && !value.is_empty() && is_category_field(field_id, &name) {
            category = Some(value.clone());
        }

        if material_id.is_none() && !value.is_empty() && is_material_id_field(&name) {
            material_id = Some(value.clone());
        }

        fields.push(Field {
            key: field_id.clone(),
            name,
            value,
            is_image: field_is_image,
            is_url: field_is_url,
        });
    }

    if image_url.is_empty() {
        return None;
    }
    Some(Card {
        image_url,
        fields,
        category,
        material_id,
    })
}

/// Distinct exportable display names across all cards, in first-seen order.
/// The reserved preview name is excluded.
pub fn export_field_names(cards: &[Card]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for card in cards {
        for field in &card.fields {
            if is_preview_field(&field.name) {
                continue;
            }
            if !names.contains(&field.name) {
                names.push(field.name.clone());
            }
        }
    }
    names
}

/// True for the reserved preview display name.
pub fn is_preview_field(name: &str) -> bool {
    name.eq_ignore_ascii_case(RESERVED_PREVIEW_FIELD)
}

fn is_category_field(key: &str, name: &str) -> bool {
    key == CATEGORY_FIELD || name == CATEGORY_FIELD || name.contains(CATEGORY_FIELD)
}

fn is_material_id_field(name: &str) -> bool {
    name.eq_ignore_ascii_case("material id") || name.eq_ignore_ascii_case("material_id")
}

/// Defensive string coercion: absent and null cells become the empty string,
/// scalars format naturally, and structured values fall back to their
/// compact JSON text. Never panics on malformed rows.
fn coerce_scalar(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => other.to_string(),
    }
}
