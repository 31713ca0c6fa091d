// ==========================================
// 农情智能查询核心 - 核心库
// ==========================================
// 功能: 产量预测 / 种子品种推荐 / 病害风险查询
// 覆盖: 普凡查尔 27 个地区，水稻 / 小麦 / 大麦 / 芥菜
// 系统定位: 仪表盘后端（界面层只负责展示）
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "en");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 导入层 - 外部查找表
pub mod importer;

// 模型层 - 产量回归模型
pub mod model;

// 引擎层 - 请求处理
pub mod engine;

// 配置层 - 系统配置
pub mod config;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 仪表盘接口
pub mod api;

// 应用层 - 启动加载与共享状态
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    Crop, DiseaseRecord, District, LookupOutcome, PredictionRequest, RiskLevel, Season,
    VarietyCategory, VarietyPick, VarietyRecommendation, VarietyRecord, YieldEstimate,
};

// 引擎
pub use engine::{DiseaseLookup, PredictionError, VarietyLookup, YieldPredictor};

// 模型
pub use model::{LinearPipelineModel, ModelInputSchema, YieldModel};

// API
pub use api::{ApiError, DashboardApi, DashboardQuery, DashboardReport};

// 应用状态
pub use app::AppState;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "Annapurna Agri-Intelligence";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
        assert_eq!(APP_NAME, "Annapurna Agri-Intelligence");
    }
}
