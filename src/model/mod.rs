// ==========================================
// 农情智能查询核心 - 模型层
// ==========================================
// 职责: 产量回归模型的接口、输入结构与 JSON 产物实现
// 红线: 模型只读；启动时加载一次，之后在所有请求间共享
// ==========================================

pub mod error;
pub mod linear_model;
pub mod schema;
pub mod yield_model;

pub use error::{ModelError, ModelResult};
pub use linear_model::LinearPipelineModel;
pub use schema::{FeatureEncoding, FeatureRow, FeatureSpec, FeatureValue, ModelInputSchema};
pub use yield_model::YieldModel;
