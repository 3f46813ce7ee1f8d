use formats::{SceneConfigError, VectorChunkError};
use layers::TerrainError;

/// Anything that stops the scene from being built.
#[derive(Debug)]
pub enum StartupError {
    Config(SceneConfigError),
    Route(VectorChunkError),
    Terrain(TerrainError),
}

impl std::fmt::Display for StartupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StartupError::Config(err) => write!(f, "{err}"),
            StartupError::Route(err) => write!(f, "route load failed: {err}"),
            StartupError::Terrain(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for StartupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StartupError::Config(err) => Some(err),
            StartupError::Route(err) => Some(err),
            StartupError::Terrain(err) => Some(err),
        }
    }
}

impl From<SceneConfigError> for StartupError {
    fn from(err: SceneConfigError) -> Self {
        StartupError::Config(err)
    }
}

impl From<VectorChunkError> for StartupError {
    fn from(err: VectorChunkError) -> Self {
        StartupError::Route(err)
    }
}

impl From<TerrainError> for StartupError {
    fn from(err: TerrainError) -> Self {
        StartupError::Terrain(err)
    }
}
