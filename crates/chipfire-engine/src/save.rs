//! Save data for a session.

use chipfire_graph::GraphData;
use serde::{Deserialize, Serialize};

use crate::Result;

/// Everything needed to resume play.
///
/// `graph` is `None` when the saved puzzle was already won, so the next
/// puzzle is built fresh on restore.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SaveState {
    pub current_level: usize,
    pub difficulty: f64,
    pub moves: u32,
    #[serde(default)]
    pub graph: Option<GraphData>,
}

impl SaveState {
    /// Parse save data.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Encode save data.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
