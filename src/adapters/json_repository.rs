//! JSON file implementation of the model repository.
//!
//! The on-disk artifact is the same keyed-mapping document the remote
//! preset loader consumes: a plain JSON object, readable by anything
//! that can parse JSON, never executed.

use std::{fs, io::ErrorKind, path::Path};

use crate::{Error, Result, agent::SavedModel, ports::ModelRepository};

/// JSON-backed model repository.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
///
/// use flap32::{
///     adapters::JsonModelRepository,
///     agent::{QTable, SavedModel, TrainingMetadata},
///     ports::ModelRepository,
/// };
///
/// let repo = JsonModelRepository;
/// let model = SavedModel::from_table(&QTable::new(), TrainingMetadata::default());
/// repo.save(&model, Path::new("trained.json"))?;
/// let loaded = repo.load(Path::new("trained.json"))?;
/// # Ok::<(), flap32::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonModelRepository;

impl JsonModelRepository {
    /// Create a new JSON repository.
    pub fn new() -> Self {
        Self
    }
}

impl ModelRepository for JsonModelRepository {
    fn save(&self, model: &SavedModel, path: &Path) -> Result<()> {
        let json = model.to_json()?;
        fs::write(path, json).map_err(|source| Error::Io {
            operation: format!("write model to {path:?}"),
            source,
        })?;
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<SavedModel> {
        let text = fs::read_to_string(path).map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                Error::NotFound {
                    path: path.display().to_string(),
                }
            } else {
                Error::Io {
                    operation: format!("read model from {path:?}"),
                    source,
                }
            }
        })?;

        SavedModel::from_json(&text)
    }
}
