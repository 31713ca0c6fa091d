// ==========================================
// 农情智能查询核心 - 模型层错误类型
// ==========================================

use thiserror::Error;

/// 模型产物加载 / 推理错误
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("model artifact not found: {0}")]
    ArtifactNotFound(String),

    #[error("failed to read model artifact: {0}")]
    ArtifactReadError(String),

    #[error("failed to decode model artifact: {0}")]
    ArtifactDecodeError(String),

    #[error("invalid model artifact: {0}")]
    InvalidArtifact(String),

    #[error("model inference failed: {0}")]
    InferenceError(String),
}

impl From<std::io::Error> for ModelError {
    fn from(err: std::io::Error) -> Self {
        ModelError::ArtifactReadError(err.to_string())
    }
}

impl From<serde_json::Error> for ModelError {
    fn from(err: serde_json::Error) -> Self {
        ModelError::ArtifactDecodeError(err.to_string())
    }
}

pub type ModelResult<T> = Result<T, ModelError>;
