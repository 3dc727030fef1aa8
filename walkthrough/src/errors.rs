use thiserror::Error;

#[derive(Debug, Error)]
pub enum LocomotionError {
    #[error("controller {index} reported a non-finite pose")]
    InvalidPose { index: usize },
}

#[derive(Debug, Error)]
pub enum NavigationError {
    #[error("navigable surface '{0}' has no triangles")]
    EmptySurface(String),
    #[error("navigable surface '{name}' references vertex {index} but only has {vertex_count}")]
    IndexOutOfRange {
        name: String,
        index: u32,
        vertex_count: usize,
    },
}

#[derive(Debug, Error)]
pub enum EnvironmentError {
    #[error("failed to parse glTF: {0}")]
    Parse(#[from] gltf::Error),
    #[error("GLB has no binary chunk")]
    MissingBlob,
    #[error("external buffer references are not supported: {0}")]
    ExternalBuffer(String),
    #[error("buffer {index} holds {actual} bytes, expected {expected}")]
    BufferTooShort {
        index: usize,
        expected: usize,
        actual: usize,
    },
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum VisualError {
    #[error("no controller model available for controller {index}: {reason}")]
    ModelUnavailable { index: usize, reason: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}
