// ==========================================
// 农情智能查询核心 - API 层
// ==========================================
// 职责: 提供仪表盘请求接口，供界面层调用
// ==========================================

pub mod dashboard_api;
pub mod dto;
pub mod error;
pub mod validator;

// 重导出核心类型
pub use dashboard_api::DashboardApi;
pub use dto::{
    Catalog, DashboardQuery, DashboardReport, DiseaseLine, DiseaseView, FeatureStatus,
    StatusReport, TabOutcome, VarietyLine, VarietyView, YieldView,
};
pub use error::{ApiError, ApiResult, Feature};
pub use validator::RequestValidator;
