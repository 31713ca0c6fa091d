// ==========================================
// 农情智能查询核心 - 应用状态
// ==========================================
// 职责: 启动时一次性加载品种表 / 病害表 / 产量模型，之后只读共享
// 红线:
//   1. 任一数据加载失败只降级对应功能，其余功能照常可用
//   2. 进程级初始化只执行一次（OnceLock），并发首调不会重复加载
// ==========================================

use std::path::Path;
use std::sync::{Arc, OnceLock};

use crate::api::error::Feature;
use crate::config::config_manager::{AppConfig, ConfigManager, ConfigResult};
use crate::engine::error::PredictionError;
use crate::engine::{DiseaseLookup, VarietyLookup, YieldPredictor};
use crate::importer::{
    DiseaseTable, DiseaseTableImporter, UniversalFileParser, VarietyTable, VarietyTableImporter,
};
use crate::model::error::ModelError;
use crate::model::linear_model::LinearPipelineModel;
use crate::model::yield_model::YieldModel;

// ==========================================
// FeatureSlot - 单个功能的加载结果
// ==========================================

/// 功能槽: 就绪 / 不可用（附原因）
#[derive(Debug, Clone)]
pub enum FeatureSlot<T, E = String> {
    Ready(T),
    Unavailable(E),
}

impl<T, E> FeatureSlot<T, E> {
    pub fn is_ready(&self) -> bool {
        matches!(self, FeatureSlot::Ready(_))
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            FeatureSlot::Ready(value) => Some(value),
            FeatureSlot::Unavailable(_) => None,
        }
    }

    pub fn unavailable_reason(&self) -> Option<&E> {
        match self {
            FeatureSlot::Ready(_) => None,
            FeatureSlot::Unavailable(reason) => Some(reason),
        }
    }
}

impl<T, E: std::fmt::Display> From<Result<T, E>> for FeatureSlot<T, String> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => FeatureSlot::Ready(value),
            Err(e) => FeatureSlot::Unavailable(e.to_string()),
        }
    }
}

// ==========================================
// AppState - 只读句柄集合
// ==========================================

/// 应用状态
///
/// 启动后不可变；所有请求处理器通过引用共享
#[derive(Debug)]
pub struct AppState {
    pub config: AppConfig,
    pub variety_lookup: FeatureSlot<VarietyLookup>,
    pub disease_lookup: FeatureSlot<DiseaseLookup>,
    pub yield_predictor: FeatureSlot<YieldPredictor, PredictionError>,
}

impl AppState {
    /// 按配置加载全部数据
    ///
    /// 不返回错误: 每个功能独立降级，原因记录在对应槽位并输出 warn 日志
    pub fn load(config: &AppConfig) -> Self {
        tracing::info!(
            variety = %config.variety_table_path.display(),
            disease = %config.disease_table_path.display(),
            model = %config.model_path.display(),
            "初始化AppState"
        );

        let variety_lookup = load_variety_lookup(&config.variety_table_path);
        let disease_lookup = load_disease_lookup(&config.disease_table_path);
        let model = load_model(&config.model_path);
        let yield_predictor = build_predictor(model, config);

        let state = Self {
            config: config.clone(),
            variety_lookup,
            disease_lookup,
            yield_predictor,
        };
        state.log_readiness();
        state
    }

    /// 由已构造的部件组装（测试替换表 / 模型时使用）
    ///
    /// 传 None 的部件视为未加载
    pub fn from_parts(
        config: AppConfig,
        variety_table: Option<VarietyTable>,
        disease_table: Option<DiseaseTable>,
        model: Option<Arc<dyn YieldModel>>,
    ) -> Self {
        let variety_lookup = match variety_table {
            Some(table) => FeatureSlot::Ready(VarietyLookup::new(Arc::new(table))),
            None => FeatureSlot::Unavailable("variety table not loaded".to_string()),
        };
        let disease_lookup = match disease_table {
            Some(table) => FeatureSlot::Ready(DiseaseLookup::new(Arc::new(table))),
            None => FeatureSlot::Unavailable("disease table not loaded".to_string()),
        };
        let model = model.ok_or_else(|| PredictionError::ModelUnavailable("model not loaded".to_string()));
        let yield_predictor = build_predictor(model, &config);

        Self {
            config,
            variety_lookup,
            disease_lookup,
            yield_predictor,
        }
    }

    pub fn is_ready(&self, feature: Feature) -> bool {
        match feature {
            Feature::YieldPrediction => self.yield_predictor.is_ready(),
            Feature::VarietyLookup => self.variety_lookup.is_ready(),
            Feature::DiseaseLookup => self.disease_lookup.is_ready(),
        }
    }

    fn log_readiness(&self) {
        for feature in Feature::ALL {
            if self.is_ready(feature) {
                tracing::info!(%feature, "功能就绪");
            }
        }
        if let Some(reason) = self.variety_lookup.unavailable_reason() {
            tracing::warn!(%reason, "品种推荐功能降级");
        }
        if let Some(reason) = self.disease_lookup.unavailable_reason() {
            tracing::warn!(%reason, "病害风险功能降级");
        }
        if let Some(err) = self.yield_predictor.unavailable_reason() {
            tracing::warn!(kind = err.kind(), error = %err, "产量预测功能降级");
        }
    }
}

fn load_variety_lookup(path: &Path) -> FeatureSlot<VarietyLookup> {
    VarietyTableImporter::new(Box::new(UniversalFileParser))
        .import(path)
        .map(|table| VarietyLookup::new(Arc::new(table)))
        .into()
}

fn load_disease_lookup(path: &Path) -> FeatureSlot<DiseaseLookup> {
    DiseaseTableImporter::new(Box::new(UniversalFileParser))
        .import(path)
        .map(|table| DiseaseLookup::new(Arc::new(table)))
        .into()
}

/// 模型产物缺失或无法解析时，预测功能均视为不可用
fn load_model(path: &Path) -> Result<Arc<dyn YieldModel>, PredictionError> {
    match LinearPipelineModel::from_path(path) {
        Ok(model) => {
            tracing::info!(path = %path.display(), model = %model.describe(), "产量模型加载完成");
            Ok(Arc::new(model))
        }
        Err(ModelError::ArtifactNotFound(p)) => Err(PredictionError::ModelUnavailable(format!(
            "model artifact not found: {}",
            p
        ))),
        Err(e) => Err(PredictionError::ModelUnavailable(e.to_string())),
    }
}

fn build_predictor(
    model: Result<Arc<dyn YieldModel>, PredictionError>,
    config: &AppConfig,
) -> FeatureSlot<YieldPredictor, PredictionError> {
    match model.and_then(|m| YieldPredictor::new(m, config.year_range())) {
        Ok(predictor) => FeatureSlot::Ready(predictor),
        Err(e) => FeatureSlot::Unavailable(e),
    }
}

// ==========================================
// 进程级单例
// ==========================================

static GLOBAL_STATE: OnceLock<Arc<AppState>> = OnceLock::new();

/// 初始化进程级状态（只加载一次；后续调用返回同一实例，忽略新配置）
pub fn init_global(config: &AppConfig) -> Arc<AppState> {
    GLOBAL_STATE
        .get_or_init(|| Arc::new(AppState::load(config)))
        .clone()
}

/// 从环境变量 / 默认值解析配置并初始化
pub fn bootstrap() -> ConfigResult<Arc<AppState>> {
    let config = ConfigManager::new().with_env_overrides().to_app_config()?;
    Ok(init_global(&config))
}

/// 获取已初始化的进程级状态
pub fn global() -> Option<Arc<AppState>> {
    GLOBAL_STATE.get().cloned()
}
