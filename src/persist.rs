//! Persisted history layout.
//!
//! The stored form carries canonical fields only. Derived geometry (arrowhead,
//! text lines, pencil bounds) is rebuilt through the factory on load, so a
//! stored document can never disagree with itself.
//!
//! ```json
//! { "history": [[], [{ "id": "…", "type": "RECTANGLE", "x1": 0, "y1": 0, "x2": 10, "y2": 10 }]],
//!   "historyIndex": 1 }
//! ```

#[cfg(test)]
#[path = "persist_test.rs"]
mod persist_test;

use serde::{Deserialize, Serialize};

use crate::element::{Element, ElementCollection, ElementId, ElementKind, Shape};
use crate::error::{ContractError, PersistError};
use crate::factory;
use crate::geometry::Point;
use crate::history::History;

/// Canonical fields of one element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementRecord {
    pub id: ElementId,
    #[serde(rename = "type")]
    pub kind: ElementKind,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<Vec<Point>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
}

impl From<&Element> for ElementRecord {
    fn from(element: &Element) -> Self {
        let mut record = Self {
            id: element.id,
            kind: element.kind(),
            x1: element.x1,
            y1: element.y1,
            x2: element.x2,
            y2: element.y2,
            points: None,
            text: None,
            font_size: None,
            font_family: None,
            font_style: None,
            font_weight: None,
        };
        match &element.shape {
            Shape::Pencil { points } => record.points = Some(points.clone()),
            Shape::Text(data) => {
                record.text = Some(data.text().to_string());
                record.font_size = Some(data.font_size);
                record.font_family = Some(data.font_family.clone());
                record.font_style = Some(data.font_style.clone());
                record.font_weight = Some(data.font_weight.clone());
            }
            _ => {}
        }
        record
    }
}

impl ElementRecord {
    /// Rebuild the element through the factory.
    ///
    /// # Errors
    ///
    /// Propagates [`ContractError`] from the factory.
    pub fn into_element(self) -> Result<Element, ContractError> {
        let mut element =
            factory::create_element(self.kind.into(), self.id, self.x1, self.y1, self.x2, self.y2, self.text.as_deref())?;

        if let Some(points) = self.points.filter(|p| !p.is_empty()) {
            element.set_points(points);
        }
        if let Some(data) = element.text_data_mut() {
            if let Some(size) = self.font_size {
                data.font_size = size;
            }
            if let Some(family) = self.font_family {
                data.font_family = family;
            }
            if let Some(style) = self.font_style {
                data.font_style = style;
            }
            if let Some(weight) = self.font_weight {
                data.font_weight = weight;
            }
        }
        Ok(element)
    }
}

/// The whole undo stack plus its cursor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedHistory {
    pub history: Vec<Vec<ElementRecord>>,
    pub history_index: usize,
}

impl From<&History> for PersistedHistory {
    fn from(history: &History) -> Self {
        Self {
            history: history
                .snapshots()
                .iter()
                .map(|snapshot| snapshot.iter().map(ElementRecord::from).collect())
                .collect(),
            history_index: history.index(),
        }
    }
}

impl PersistedHistory {
    /// Rebuild a [`History`], re-deriving every element.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError::Element`] for a record the factory rejects and
    /// [`PersistError::IndexOutOfRange`] for a cursor outside the stack.
    pub fn into_history(self) -> Result<History, PersistError> {
        let snapshots = self
            .history
            .into_iter()
            .map(|snapshot| snapshot.into_iter().map(ElementRecord::into_element).collect())
            .collect::<Result<Vec<ElementCollection>, ContractError>>()?;
        History::from_parts(snapshots, self.history_index)
    }

    /// # Errors
    ///
    /// Returns [`PersistError::Decode`] if serialization fails.
    pub fn to_json(&self) -> Result<String, PersistError> {
        Ok(serde_json::to_string(self)?)
    }

    /// # Errors
    ///
    /// Returns [`PersistError::Decode`] for malformed JSON or an unknown element type.
    pub fn from_json(json: &str) -> Result<Self, PersistError> {
        Ok(serde_json::from_str(json)?)
    }
}
