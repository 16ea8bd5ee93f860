//! Serialization support for learned value tables.
//!
//! The persisted artifact is a versioned keyed-mapping document:
//! composite `"speed,distance,deviation:action"` keys to numeric
//! estimates. The document is parsed strictly as data; nothing in a
//! remote or on-disk payload is ever executed.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    agent::q_table::QTable,
    types::{Action, GameState},
};

/// Metadata about the training run that produced a model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrainingMetadata {
    /// Number of episodes trained
    pub episodes_trained: Option<usize>,
    /// Random seed used (if any)
    pub seed: Option<u64>,
    /// Timestamp when saved
    pub saved_at: Option<String>,
}

/// Serializable representation of a learned value table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedModel {
    /// Version of the save format (for future compatibility)
    pub version: u32,
    /// Training metadata
    #[serde(default)]
    pub metadata: TrainingMetadata,
    /// Composite state-action keys to estimates
    entries: BTreeMap<String, f64>,
}

impl SavedModel {
    /// Current save format version
    pub const VERSION: u32 = 1;

    /// Capture a value table into a document.
    pub fn from_table(table: &QTable, metadata: TrainingMetadata) -> Self {
        let entries = table
            .iter()
            .map(|((state, action), estimate)| {
                (format!("{state}:{}", action.label()), *estimate)
            })
            .collect();
        Self {
            version: Self::VERSION,
            metadata,
            entries,
        }
    }

    /// Rebuild a value table from the document.
    ///
    /// Fails with [`Error::Format`] on an unsupported version or a
    /// malformed key. Nothing is partially built: the caller receives
    /// either a complete table or an error.
    pub fn to_table(&self) -> Result<QTable> {
        if self.version != Self::VERSION {
            return Err(Error::Format {
                message: format!(
                    "unsupported model version {} (expected {})",
                    self.version,
                    Self::VERSION
                ),
            });
        }

        let mut table = QTable::new();
        for (key, estimate) in &self.entries {
            let (state, action) = parse_key(key)?;
            if !estimate.is_finite() {
                return Err(Error::Format {
                    message: format!("non-finite estimate for key '{key}'"),
                });
            }
            table.add(state, action, *estimate);
        }
        Ok(table)
    }

    /// Parse a document from JSON text, strictly as data.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::Format {
            message: e.to_string(),
        })
    }

    /// Render the document as pretty-printed JSON.
    ///
    /// serde_json prints floats in their shortest round-trippable form,
    /// so every estimate survives a save/load cycle bit-exactly.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Number of persisted estimates.
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Iterate over persisted key → estimate pairs.
    pub fn entries(&self) -> impl Iterator<Item = (&String, &f64)> {
        self.entries.iter()
    }
}

fn parse_key(key: &str) -> Result<(GameState, Action)> {
    let malformed = || Error::Format {
        message: format!("malformed state-action key '{key}'"),
    };

    let (state_part, action_part) = key.split_once(':').ok_or_else(malformed)?;
    let action = Action::from_label(action_part).ok_or_else(malformed)?;

    let mut fields = state_part.split(',');
    let mut next_int = || -> Result<i32> {
        fields
            .next()
            .and_then(|f| f.parse::<i32>().ok())
            .ok_or_else(malformed)
    };
    let speed = next_int()?;
    let tube_distance = next_int()?;
    let deviation = next_int()?;
    if fields.next().is_some() {
        return Err(malformed());
    }

    Ok((GameState::new(speed, tube_distance, deviation), action))
}
