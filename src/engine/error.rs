// ==========================================
// 农情智能查询核心 - 预测错误类型
// ==========================================
// 红线: 三类失败必须可区分（模型缺失 / 输入结构不符 / 其他运行时失败）
// ==========================================

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PredictionError {
    /// 启动时未加载到模型产物
    #[error("yield model is unavailable: {0}")]
    ModelUnavailable(String),

    /// 模型声明的输入结构与请求结构不一致
    #[error("model input schema mismatch: expected {expected}, model declares {actual}")]
    FeatureMismatch {
        expected: String,
        actual: String,
        differences: Vec<String>,
    },

    /// 请求字段不满足约束
    #[error("invalid prediction input: {0}")]
    InvalidInput(String),

    /// 模型调用的其他运行时失败
    #[error("prediction failed: {0}")]
    PredictionFailed(String),
}

impl PredictionError {
    /// 错误标签（界面 / 日志使用）
    pub fn kind(&self) -> &'static str {
        match self {
            PredictionError::ModelUnavailable(_) => "MODEL_UNAVAILABLE",
            PredictionError::FeatureMismatch { .. } => "FEATURE_MISMATCH",
            PredictionError::InvalidInput(_) => "INVALID_INPUT",
            PredictionError::PredictionFailed(_) => "PREDICTION_ERROR",
        }
    }
}

pub type PredictionResult<T> = Result<T, PredictionError>;
