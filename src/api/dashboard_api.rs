// ==========================================
// 农情智能查询核心 - 仪表盘 API
// ==========================================
// 职责: 三个功能页的请求入口 + 整体聚合查询
// 架构: API 层 → AppState（只读句柄）→ 引擎层
// 红线:
//   1. 三个功能页互相独立，一页失败不影响其他页
//   2. "无数据" 渲染为提示信息，不是错误
// ==========================================

use std::sync::Arc;

use chrono::Utc;
use tracing::instrument;
use uuid::Uuid;

use crate::api::dto::{
    Catalog, DashboardQuery, DashboardReport, DiseaseLine, DiseaseView, FeatureStatus,
    StatusReport, TabOutcome, VarietyLine, VarietyView, YieldView, DEFAULT_AREA_HECTARES,
};
use crate::api::error::{ApiError, ApiResult, Feature};
use crate::api::validator::RequestValidator;
use crate::app::state::{AppState, FeatureSlot};
use crate::domain::disease::DiseaseRecord;
use crate::domain::lookup::LookupOutcome;
use crate::domain::request::{PredictionRequest, YieldEstimate};
use crate::domain::types::{normalize_key, Crop, District, Season, VarietyCategory};
use crate::domain::variety::VarietyRecommendation;
use crate::engine::error::PredictionError;
use crate::i18n::{is_supported_locale, t_in};

fn unavailable(feature: Feature, reason: Option<&String>) -> ApiError {
    ApiError::FeatureUnavailable {
        feature,
        reason: reason.cloned().unwrap_or_default(),
    }
}

fn two_decimals(value: f64) -> String {
    format!("{:.2}", value)
}

// ==========================================
// DashboardApi - 仪表盘 API
// ==========================================

/// 仪表盘API
///
/// 职责：
/// 1. 产量预测 / 品种推荐 / 病害风险 三个单项查询
/// 2. 聚合查询（evaluate），按请求语言渲染文案
/// 3. 下拉选项与功能状态
pub struct DashboardApi {
    state: Arc<AppState>,
}

impl DashboardApi {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    // ==========================================
    // 单项查询
    // ==========================================

    /// 产量预测
    ///
    /// # 返回
    /// - Ok(YieldEstimate): 单产 / 总产
    /// - Err(ApiError::Prediction): 模型不可用 / 结构不符 / 输入不合法 / 预测失败
    pub fn predict_yield(&self, request: &PredictionRequest) -> ApiResult<YieldEstimate> {
        match &self.state.yield_predictor {
            FeatureSlot::Ready(predictor) => Ok(predictor.predict(request)?),
            FeatureSlot::Unavailable(err) => Err(ApiError::Prediction(err.clone())),
        }
    }

    /// 品种推荐
    pub fn lookup_varieties(
        &self,
        crop: &str,
        district: &str,
    ) -> ApiResult<LookupOutcome<VarietyRecommendation>> {
        let lookup = self.state.variety_lookup.ready().ok_or_else(|| {
            unavailable(
                Feature::VarietyLookup,
                self.state.variety_lookup.unavailable_reason(),
            )
        })?;
        Ok(lookup.lookup(crop, district))
    }

    /// 病害风险
    pub fn lookup_disease_risks(&self, crop: &str) -> ApiResult<LookupOutcome<Vec<DiseaseRecord>>> {
        let lookup = self.state.disease_lookup.ready().ok_or_else(|| {
            unavailable(
                Feature::DiseaseLookup,
                self.state.disease_lookup.unavailable_reason(),
            )
        })?;
        Ok(lookup.lookup(crop))
    }

    // ==========================================
    // 聚合查询
    // ==========================================

    /// 一次执行三个功能页（互相独立），返回已渲染的报告
    ///
    /// 不返回错误: 每页的失败都体现在对应的 TabOutcome::Error 中
    pub fn evaluate(&self, query: &DashboardQuery) -> DashboardReport {
        let request_id = Uuid::new_v4();
        let span = tracing::info_span!("dashboard_evaluate", %request_id);
        let _guard = span.enter();

        let locale = self.resolve_locale(query.locale.as_deref());
        tracing::debug!(
            district = %query.district,
            crop = %query.crop,
            year = query.year,
            season = %query.season,
            area = query.area_hectares,
            %locale,
            "仪表盘查询"
        );

        let report = DashboardReport {
            request_id,
            generated_at: Utc::now(),
            yield_tab: self.yield_tab(query, &locale),
            variety_tab: self.variety_tab(query, &locale),
            disease_tab: self.disease_tab(query, &locale),
            locale,
        };

        tracing::info!(
            yield_found = report.yield_tab.is_found(),
            variety_found = report.variety_tab.is_found(),
            disease_found = report.disease_tab.is_found(),
            "仪表盘查询完成"
        );
        report
    }

    /// 请求语言优先，其次配置语言
    fn resolve_locale(&self, requested: Option<&str>) -> String {
        match requested.map(str::trim) {
            Some(locale) if is_supported_locale(locale) => locale.to_string(),
            Some(locale) if !locale.is_empty() => {
                tracing::warn!(%locale, "不支持的界面语言，使用配置语言");
                self.state.config.locale.clone()
            }
            _ => self.state.config.locale.clone(),
        }
    }

    fn yield_tab(&self, query: &DashboardQuery, locale: &str) -> TabOutcome<YieldView> {
        let result = RequestValidator::validate_prediction(query)
            .and_then(|request| self.predict_yield(&request).map(|estimate| (request, estimate)));

        match result {
            Ok((request, estimate)) => TabOutcome::Found {
                data: self.render_yield(&request, estimate, locale),
            },
            Err(err) => {
                tracing::warn!(kind = err.kind(), error = %err, "产量预测失败");
                error_tab(&err, locale)
            }
        }
    }

    fn variety_tab(&self, query: &DashboardQuery, locale: &str) -> TabOutcome<VarietyView> {
        let crop = normalize_key(&query.crop);
        match self.lookup_varieties(&query.crop, &query.district) {
            Ok(LookupOutcome::Found(recommendation)) => TabOutcome::Found {
                data: render_varieties(&crop, recommendation, locale),
            },
            Ok(LookupOutcome::NoDataFound) => TabOutcome::NoData {
                message: t_in(locale, "variety.none_found", &[]),
            },
            Err(err) => error_tab(&err, locale),
        }
    }

    fn disease_tab(&self, query: &DashboardQuery, locale: &str) -> TabOutcome<DiseaseView> {
        let crop = normalize_key(&query.crop);
        match self.lookup_disease_risks(&query.crop) {
            Ok(LookupOutcome::Found(records)) => TabOutcome::Found {
                data: render_diseases(&crop, records, locale),
            },
            Ok(LookupOutcome::NoDataFound) => TabOutcome::NoData {
                message: t_in(locale, "disease.none_found", &[("crop", crop.as_str())]),
            },
            Err(err) => error_tab(&err, locale),
        }
    }

    fn render_yield(
        &self,
        request: &PredictionRequest,
        estimate: YieldEstimate,
        locale: &str,
    ) -> YieldView {
        let crop = request.crop.as_str();
        let district = request.district.as_str();
        let year = request.year.to_string();
        let min = self.state.config.year_min.to_string();
        let max = self.state.config.year_max.to_string();

        let extrapolation_note = estimate.extrapolated.then(|| {
            t_in(
                locale,
                "yield.extrapolated",
                &[("year", year.as_str()), ("min", min.as_str()), ("max", max.as_str())],
            )
        });

        YieldView {
            header: t_in(locale, "yield.header", &[("crop", crop)]),
            efficiency_label: t_in(locale, "yield.efficiency_label", &[]),
            efficiency_value: t_in(
                locale,
                "yield.efficiency_value",
                &[("value", two_decimals(estimate.per_hectare).as_str())],
            ),
            efficiency_help: t_in(locale, "yield.efficiency_help", &[]),
            total_label: t_in(locale, "yield.total_label", &[]),
            total_value: t_in(
                locale,
                "yield.total_value",
                &[("value", two_decimals(estimate.total).as_str())],
            ),
            total_help: t_in(
                locale,
                "yield.total_help",
                &[("area", two_decimals(estimate.area_hectares).as_str())],
            ),
            success_message: t_in(
                locale,
                "yield.success",
                &[("crop", crop), ("district", district)],
            ),
            extrapolation_note,
            estimate,
        }
    }

    // ==========================================
    // 下拉选项与状态
    // ==========================================

    /// 仪表盘可选项
    pub fn catalog(&self) -> Catalog {
        Catalog {
            districts: District::ALL.to_vec(),
            crops: Crop::ALL.to_vec(),
            seasons: Season::ALL.to_vec(),
            year_min: self.state.config.year_min,
            year_max: self.state.config.year_max,
            default_area_hectares: DEFAULT_AREA_HECTARES,
        }
    }

    /// 各功能可用状态
    #[instrument(skip(self))]
    pub fn status(&self) -> StatusReport {
        let state = &self.state;

        let yield_status = match &state.yield_predictor {
            FeatureSlot::Ready(_) => ready_status(Feature::YieldPrediction),
            FeatureSlot::Unavailable(err) => FeatureStatus {
                feature: Feature::YieldPrediction,
                ready: false,
                kind: Some(err.kind().to_string()),
                reason: Some(err.to_string()),
            },
        };

        StatusReport {
            version: crate::VERSION.to_string(),
            features: vec![
                yield_status,
                slot_status(Feature::VarietyLookup, &state.variety_lookup),
                slot_status(Feature::DiseaseLookup, &state.disease_lookup),
            ],
            model: state.yield_predictor.ready().map(|p| p.model_description()),
            variety_records: state.variety_lookup.ready().map_or(0, |l| l.table().len()),
            disease_records: state.disease_lookup.ready().map_or(0, |l| l.table().len()),
        }
    }
}

fn ready_status(feature: Feature) -> FeatureStatus {
    FeatureStatus {
        feature,
        ready: true,
        kind: None,
        reason: None,
    }
}

fn slot_status<T>(feature: Feature, slot: &FeatureSlot<T>) -> FeatureStatus {
    match slot.unavailable_reason() {
        None => ready_status(feature),
        Some(reason) => FeatureStatus {
            feature,
            ready: false,
            kind: Some("FEATURE_UNAVAILABLE".to_string()),
            reason: Some(reason.clone()),
        },
    }
}

fn render_varieties(
    crop: &str,
    recommendation: VarietyRecommendation,
    locale: &str,
) -> VarietyView {
    let not_listed = t_in(locale, "variety.not_listed", &[]);
    let lines = VarietyCategory::ALL
        .iter()
        .map(|category| {
            let label_key = match category {
                VarietyCategory::Stable => "variety.stable",
                VarietyCategory::HighYield => "variety.high_yield",
                VarietyCategory::ShortDuration => "variety.short_duration",
            };
            let pick = recommendation.get(*category);
            VarietyLine {
                category: *category,
                label: t_in(locale, label_key, &[]),
                seed_name: pick
                    .map(|p| p.seed_name.clone())
                    .unwrap_or_else(|| not_listed.clone()),
                justification: pick.and_then(|p| p.justification.clone()),
            }
        })
        .collect();

    VarietyView {
        header: t_in(locale, "variety.header", &[("crop", crop)]),
        recommendation,
        lines,
    }
}

fn render_diseases(crop: &str, records: Vec<DiseaseRecord>, locale: &str) -> DiseaseView {
    let entries = records
        .into_iter()
        .map(|record| {
            let level = match record.risk_display() {
                text if text.is_empty() => t_in(locale, "disease.level_unstated", &[]),
                text => text,
            };
            DiseaseLine {
                title: t_in(locale, "disease.threat", &[("disease", record.disease_name.as_str())]),
                risk_level: record.risk_level,
                risk_label: t_in(locale, "disease.risk_level", &[("level", level.as_str())]),
                prevention_label: t_in(
                    locale,
                    "disease.prevention",
                    &[("advice", record.prevention_advice.as_str())],
                ),
                record,
            }
        })
        .collect();

    DiseaseView {
        header: t_in(locale, "disease.header", &[("crop", crop)]),
        entries,
    }
}

/// 错误 → 已渲染的错误页
fn error_tab<T>(err: &ApiError, locale: &str) -> TabOutcome<T> {
    TabOutcome::Error {
        kind: err.kind().to_string(),
        message: render_error(err, locale),
    }
}

fn render_error(err: &ApiError, locale: &str) -> String {
    match err {
        ApiError::Prediction(PredictionError::ModelUnavailable(_)) => {
            t_in(locale, "error.model_unavailable", &[])
        }
        ApiError::Prediction(PredictionError::FeatureMismatch { differences, .. }) => t_in(
            locale,
            "error.feature_mismatch",
            &[("details", differences.join("; ").as_str())],
        ),
        ApiError::Prediction(PredictionError::InvalidInput(message))
        | ApiError::InvalidInput(message) => {
            t_in(locale, "error.invalid_input", &[("message", message.as_str())])
        }
        ApiError::Prediction(PredictionError::PredictionFailed(message)) => {
            t_in(locale, "error.prediction", &[("message", message.as_str())])
        }
        ApiError::FeatureUnavailable { feature, reason } => {
            let feature_name = t_in(locale, feature.i18n_key(), &[]);
            t_in(
                locale,
                "error.feature_unavailable",
                &[("feature", feature_name.as_str()), ("reason", reason.as_str())],
            )
        }
        ApiError::Other(_) => {
            t_in(locale, "error.internal", &[("message", err.to_string().as_str())])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::config_manager::AppConfig;
    use std::path::Path;

    fn empty_api() -> DashboardApi {
        let config = AppConfig::from_data_dir(Path::new("/nonexistent/annapurna"));
        DashboardApi::new(Arc::new(AppState::from_parts(config, None, None, None)))
    }

    fn query() -> DashboardQuery {
        DashboardQuery {
            district: "VARANASI".to_string(),
            crop: "Rice".to_string(),
            year: 2025,
            season: "Kharif".to_string(),
            area_hectares: 2.0,
            locale: Some("en".to_string()),
        }
    }

    #[test]
    fn test_render_error_model_unavailable() {
        let err = ApiError::Prediction(PredictionError::ModelUnavailable("gone".to_string()));
        assert_eq!(
            render_error(&err, "en"),
            "The yield model is not available, so predictions are disabled."
        );
    }

    #[test]
    fn test_render_error_internal() {
        let err = ApiError::Other(anyhow::anyhow!("disk vanished"));
        assert_eq!(render_error(&err, "en"), "Something went wrong: disk vanished");
    }

    #[test]
    fn test_render_error_prediction_failed() {
        let err = ApiError::Prediction(PredictionError::PredictionFailed("NaN".to_string()));
        assert_eq!(render_error(&err, "en"), "Prediction Error: NaN");
    }

    #[test]
    fn test_render_diseases_keeps_raw_and_blank_risk_text() {
        let record = |risk_text: &str| DiseaseRecord {
            crop_name: "Barley".to_string(),
            disease_name: "Stripe Disease".to_string(),
            risk_level: None,
            risk_text: risk_text.to_string(),
            prevention_advice: "Seed treatment".to_string(),
        };
        let view = render_diseases("Barley", vec![record("Severe"), record("")], "en");
        assert_eq!(view.entries[0].risk_label, "Risk Level: Severe");
        assert_eq!(view.entries[1].risk_label, "Risk Level: Not stated");
        assert_eq!(view.entries[1].prevention_label, "Prevention Strategy: Seed treatment");
    }

    #[test]
    fn test_evaluate_with_nothing_loaded_reports_every_tab_as_error() {
        let report = empty_api().evaluate(&query());
        assert_eq!(report.locale, "en");
        assert_eq!(report.yield_tab.error_kind(), Some("MODEL_UNAVAILABLE"));
        assert_eq!(report.variety_tab.error_kind(), Some("FEATURE_UNAVAILABLE"));
        assert_eq!(report.disease_tab.error_kind(), Some("FEATURE_UNAVAILABLE"));
    }

    #[test]
    fn test_evaluate_invalid_area_is_invalid_input() {
        let mut q = query();
        q.area_hectares = 0.0;
        let report = empty_api().evaluate(&q);
        assert_eq!(report.yield_tab.error_kind(), Some("INVALID_INPUT"));
    }

    #[test]
    fn test_unsupported_locale_falls_back_to_config() {
        let mut q = query();
        q.locale = Some("fr".to_string());
        assert_eq!(empty_api().evaluate(&q).locale, "en");
    }

    #[test]
    fn test_catalog_lists_select_options() {
        let catalog = empty_api().catalog();
        assert_eq!(catalog.districts.len(), 27);
        assert_eq!(catalog.crops.len(), 4);
        assert_eq!(catalog.seasons, vec![Season::Kharif, Season::Rabi]);
        assert_eq!((catalog.year_min, catalog.year_max), (2020, 2030));
        assert_eq!(catalog.default_area_hectares, 1.0);
    }

    #[test]
    fn test_status_reports_degraded_features() {
        let status = empty_api().status();
        assert!(!status.all_ready());
        let yield_status = status.feature(Feature::YieldPrediction).unwrap();
        assert_eq!(yield_status.kind.as_deref(), Some("MODEL_UNAVAILABLE"));
        assert_eq!(status.model, None);
        assert_eq!(status.variety_records, 0);
    }
}
