// ==========================================
// 农情智能查询核心 - 引擎层
// ==========================================
// 职责: 三个互相独立的请求处理器（产量预测 / 品种推荐 / 病害风险）
// 红线: 引擎不持有可变状态，同一输入得到同一输出
// ==========================================

pub mod disease_lookup;
pub mod error;
pub mod variety_lookup;
pub mod yield_predictor;

// 重导出核心引擎
pub use disease_lookup::DiseaseLookup;
pub use error::{PredictionError, PredictionResult};
pub use variety_lookup::VarietyLookup;
pub use yield_predictor::YieldPredictor;
