// ==========================================
// 农情智能查询核心 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含文件读取逻辑，不含查询逻辑
// ==========================================

pub mod disease;
pub mod lookup;
pub mod request;
pub mod types;
pub mod variety;

// 重导出核心类型
pub use disease::DiseaseRecord;
pub use lookup::LookupOutcome;
pub use request::{PredictionRequest, YieldEstimate};
pub use types::{
    normalize_key, Crop, District, DomainParseError, RiskLevel, Season, VarietyCategory,
};
pub use variety::{VarietyPick, VarietyRecommendation, VarietyRecord};
