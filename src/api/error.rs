// ==========================================
// 农情智能查询核心 - API层错误类型
// ==========================================
// 职责: 请求面错误；把引擎层错误转换为界面可展示的错误
// 红线: 单个请求失败只影响该请求，不终止进程
// ==========================================

use crate::engine::error::PredictionError;
use serde::Serialize;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 请求错误
    // ==========================================
    #[error("invalid input: {0}")]
    InvalidInput(String),

    // ==========================================
    // 预测错误（保留引擎层的错误种类）
    // ==========================================
    #[error(transparent)]
    Prediction(#[from] PredictionError),

    // ==========================================
    // 功能降级（启动时对应数据未能加载）
    // ==========================================
    #[error("{feature} is unavailable: {reason}")]
    FeatureUnavailable { feature: Feature, reason: String },

    // ==========================================
    // 通用错误
    // ==========================================
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ApiError {
    /// 错误标签（界面 / 日志使用）
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::InvalidInput(_) => "INVALID_INPUT",
            ApiError::Prediction(e) => e.kind(),
            ApiError::FeatureUnavailable { .. } => "FEATURE_UNAVAILABLE",
            ApiError::Other(_) => "INTERNAL_ERROR",
        }
    }
}

/// 仪表盘的三个功能页
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Feature {
    YieldPrediction,
    VarietyLookup,
    DiseaseLookup,
}

impl Feature {
    pub const ALL: [Feature; 3] = [
        Feature::YieldPrediction,
        Feature::VarietyLookup,
        Feature::DiseaseLookup,
    ];

    /// 界面文案键
    pub fn i18n_key(&self) -> &'static str {
        match self {
            Feature::YieldPrediction => "feature.yield",
            Feature::VarietyLookup => "feature.variety",
            Feature::DiseaseLookup => "feature.disease",
        }
    }
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Feature::YieldPrediction => "yield prediction",
            Feature::VarietyLookup => "variety lookup",
            Feature::DiseaseLookup => "disease lookup",
        };
        write!(f, "{}", name)
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
