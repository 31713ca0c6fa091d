// ==========================================
// 农情智能查询核心 - API 数据传输对象
// ==========================================
// 职责: 仪表盘请求 / 响应结构（全部可 serde 序列化）
// 约定: 展示用数值保留两位小数；文案已按请求语言渲染
// ==========================================

use crate::api::error::Feature;
use crate::domain::disease::DiseaseRecord;
use crate::domain::request::YieldEstimate;
use crate::domain::types::{Crop, District, RiskLevel, Season, VarietyCategory};
use crate::domain::variety::VarietyRecommendation;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 默认种植面积（公顷）
pub const DEFAULT_AREA_HECTARES: f64 = 1.0;

fn default_area() -> f64 {
    DEFAULT_AREA_HECTARES
}

// ==========================================
// 请求
// ==========================================

/// 仪表盘一次查询的原始输入
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardQuery {
    pub district: String,
    pub crop: String,
    pub year: i32,
    pub season: String,
    #[serde(default = "default_area")]
    pub area_hectares: f64,
    /// 界面语言；为空时使用配置语言
    #[serde(default)]
    pub locale: Option<String>,
}

// ==========================================
// 响应
// ==========================================

/// 单个功能页的结果
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TabOutcome<T> {
    /// 有结果
    Found { data: T },
    /// 合法的空结果（提示信息，不是错误）
    NoData { message: String },
    /// 该页失败（其他页不受影响）
    Error { kind: String, message: String },
}

impl<T> TabOutcome<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, TabOutcome::Found { .. })
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            TabOutcome::Found { data } => Some(data),
            _ => None,
        }
    }

    pub fn error_kind(&self) -> Option<&str> {
        match self {
            TabOutcome::Error { kind, .. } => Some(kind),
            _ => None,
        }
    }
}

/// 产量页
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YieldView {
    pub estimate: YieldEstimate,
    pub header: String,
    pub efficiency_label: String,
    /// 例: "3.50 Tons/Hectare"
    pub efficiency_value: String,
    pub efficiency_help: String,
    pub total_label: String,
    pub total_value: String,
    pub total_help: String,
    pub success_message: String,
    /// 年份外推提示
    pub extrapolation_note: Option<String>,
}

/// 品种页中的一行
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VarietyLine {
    pub category: VarietyCategory,
    pub label: String,
    /// 缺失类别显示 "Not listed"
    pub seed_name: String,
    pub justification: Option<String>,
}

/// 品种页
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VarietyView {
    pub header: String,
    pub recommendation: VarietyRecommendation,
    pub lines: Vec<VarietyLine>,
}

/// 病害页中的一条
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiseaseLine {
    pub title: String,
    pub risk_level: Option<RiskLevel>,
    pub risk_label: String,
    pub prevention_label: String,
    pub record: DiseaseRecord,
}

/// 病害页
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiseaseView {
    pub header: String,
    pub entries: Vec<DiseaseLine>,
}

/// 仪表盘整体响应（三页互相独立）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    pub request_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub locale: String,
    pub yield_tab: TabOutcome<YieldView>,
    pub variety_tab: TabOutcome<VarietyView>,
    pub disease_tab: TabOutcome<DiseaseView>,
}

// ==========================================
// 下拉选项与状态
// ==========================================

/// 仪表盘可选项
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Catalog {
    pub districts: Vec<District>,
    pub crops: Vec<Crop>,
    pub seasons: Vec<Season>,
    pub year_min: i32,
    pub year_max: i32,
    pub default_area_hectares: f64,
}

/// 单个功能的可用状态
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureStatus {
    pub feature: Feature,
    pub ready: bool,
    /// 降级原因标签（MODEL_UNAVAILABLE / FEATURE_MISMATCH / FEATURE_UNAVAILABLE）
    pub kind: Option<String>,
    pub reason: Option<String>,
}

/// 整体状态
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusReport {
    pub version: String,
    pub features: Vec<FeatureStatus>,
    pub model: Option<String>,
    pub variety_records: usize,
    pub disease_records: usize,
}

impl StatusReport {
    pub fn feature(&self, feature: Feature) -> Option<&FeatureStatus> {
        self.features.iter().find(|s| s.feature == feature)
    }

    pub fn all_ready(&self) -> bool {
        self.features.iter().all(|s| s.ready)
    }
}
