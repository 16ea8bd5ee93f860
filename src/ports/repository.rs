//! Repository port for model persistence.
//!
//! This trait abstracts the storage mechanism for learned models,
//! decoupling the training and CLI layers from any specific format.

use std::path::Path;

use crate::{Result, agent::SavedModel};

/// Port for persisting and loading learned models.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
///
/// use flap32::{agent::SavedModel, ports::ModelRepository};
///
/// fn store<R: ModelRepository>(repo: &R, model: &SavedModel) -> flap32::Result<()> {
///     repo.save(model, Path::new("trained.json"))
/// }
/// ```
pub trait ModelRepository {
    /// Save a model to persistent storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be written or serialization
    /// fails.
    fn save(&self, model: &SavedModel, path: &Path) -> Result<()>;

    /// Load a model from persistent storage.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NotFound`] when nothing exists at `path`
    /// and [`crate::Error::Format`] when the document is malformed. A
    /// failed load must leave whatever table the caller currently holds
    /// untouched.
    fn load(&self, path: &Path) -> Result<SavedModel>;
}
