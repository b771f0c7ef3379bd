use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::{CodecError, RecordCodec, Scene, SceneCodec};

pub const DEFAULT_SAVE_FILE: &str = "cobbles.rects";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("save file I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("save file is corrupt: {0}")]
    Codec(#[from] CodecError),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::Io(e) if e.kind() == io::ErrorKind::NotFound)
    }
}

/// Reads and writes the scene as a whole file. Persistence is best effort:
/// nothing is written until [`SceneStore::save`] is called at shutdown.
#[derive(Debug, Clone)]
pub struct SceneStore<C = RecordCodec> {
    path: PathBuf,
    codec: C,
}

impl SceneStore<RecordCodec> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_codec(path, RecordCodec)
    }
}

impl Default for SceneStore<RecordCodec> {
    fn default() -> Self {
        Self::new(DEFAULT_SAVE_FILE)
    }
}

impl<C: SceneCodec> SceneStore<C> {
    pub fn with_codec(path: impl Into<PathBuf>, codec: C) -> Self {
        Self {
            path: path.into(),
            codec,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Scene, StoreError> {
        let bytes = std::fs::read(&self.path)?;
        let rects = self.codec.decode(&bytes)?;
        Ok(Scene::new(rects))
    }

    /// Loads the saved scene, or the default layout if there is none or it
    /// can't be used.
    pub fn load_or_default(&self) -> Scene {
        match self.load() {
            Ok(scene) if scene.is_empty() => {
                tracing::warn!(path = %self.path.display(), "save file holds no rects, using default layout");
                Scene::default_layout()
            }
            Ok(scene) => {
                tracing::info!(path = %self.path.display(), rects = scene.len(), "loaded scene");
                scene
            }
            Err(e) if e.is_not_found() => {
                tracing::debug!(path = %self.path.display(), "no save file, using default layout");
                Scene::default_layout()
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "ignoring save file, using default layout");
                Scene::default_layout()
            }
        }
    }

    /// Overwrites the save file with the current scene.
    pub fn save(&self, scene: &Scene) -> Result<(), StoreError> {
        let bytes = self.codec.encode(scene.rects());
        std::fs::write(&self.path, bytes)?;
        tracing::info!(path = %self.path.display(), rects = scene.len(), "saved scene");
        Ok(())
    }
}
