// ==========================================
// 农情智能查询核心 - 产量预测引擎
// ==========================================
// 职责: 请求 → 单行特征 → 模型 → 单产 / 总产
// 输入: PredictionRequest
// 输出: YieldEstimate 或 PredictionError
// 红线: 模型输入结构在构造时校验一次（不一致即 FeatureMismatch，绝不带病预测）
// ==========================================

use crate::domain::request::{PredictionRequest, YieldEstimate};
use crate::engine::error::{PredictionError, PredictionResult};
use crate::model::schema::{FeatureRow, ModelInputSchema};
use crate::model::yield_model::YieldModel;
use std::ops::RangeInclusive;
use std::sync::Arc;
use tracing::instrument;

// ==========================================
// YieldPredictor - 产量预测引擎
// ==========================================
#[derive(Clone)]
pub struct YieldPredictor {
    model: Arc<dyn YieldModel>,
    /// 支持的年份范围（超出时照常预测，但标记为外推）
    supported_years: RangeInclusive<i32>,
}

impl std::fmt::Debug for YieldPredictor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YieldPredictor")
            .field("model", &self.model.describe())
            .field("supported_years", &self.supported_years)
            .finish()
    }
}

impl YieldPredictor {
    /// 绑定模型并校验输入结构
    ///
    /// # 返回
    /// - Ok(YieldPredictor): 模型输入结构与 `[District, Crop, Year, Season, Area]` 一致
    /// - Err(PredictionError::FeatureMismatch): 结构不一致（列数 / 列名 / 顺序 / 编码）
    pub fn new(
        model: Arc<dyn YieldModel>,
        supported_years: RangeInclusive<i32>,
    ) -> PredictionResult<Self> {
        let expected = ModelInputSchema::request_schema();
        let declared = model.input_schema();
        let differences = declared.differences(&expected);

        if !differences.is_empty() {
            tracing::warn!(
                expected = %expected,
                declared = %declared,
                ?differences,
                "模型输入结构与请求结构不一致"
            );
            return Err(PredictionError::FeatureMismatch {
                expected: expected.to_string(),
                actual: declared.to_string(),
                differences,
            });
        }

        Ok(Self {
            model,
            supported_years,
        })
    }

    pub fn supported_years(&self) -> &RangeInclusive<i32> {
        &self.supported_years
    }

    pub fn model_description(&self) -> String {
        self.model.describe()
    }

    /// 预测单产与总产
    ///
    /// # 规则
    /// 1. area_hectares 必须为正的有限数
    /// 2. 年份超出支持范围 → 照常预测，extrapolated = true
    /// 3. 取模型输出第 0 个元素为单产；空输出 / 非有限值 → PredictionFailed
    /// 4. 负单产按 0 处理
    /// 5. total = per_hectare × area_hectares；总产溢出为非有限值 → PredictionFailed
    #[instrument(skip(self), fields(district = %request.district, crop = %request.crop))]
    pub fn predict(&self, request: &PredictionRequest) -> PredictionResult<YieldEstimate> {
        if !request.area_hectares.is_finite() || request.area_hectares <= 0.0 {
            return Err(PredictionError::InvalidInput(format!(
                "area must be a positive number of hectares, got {}",
                request.area_hectares
            )));
        }

        let extrapolated = !self.supported_years.contains(&request.year);
        if extrapolated {
            tracing::warn!(
                year = request.year,
                min = self.supported_years.start(),
                max = self.supported_years.end(),
                "年份超出支持范围，预测为外推结果"
            );
        }

        let row = FeatureRow::from_request(request);
        let output = self
            .model
            .predict(std::slice::from_ref(&row))
            .map_err(|e| PredictionError::PredictionFailed(e.to_string()))?;

        let raw = output
            .first()
            .copied()
            .ok_or_else(|| PredictionError::PredictionFailed("model returned no output".to_string()))?;

        if !raw.is_finite() {
            return Err(PredictionError::PredictionFailed(format!(
                "model returned a non-finite value: {}",
                raw
            )));
        }

        let per_hectare = if raw < 0.0 {
            tracing::warn!(raw, "模型输出负单产，按 0 处理");
            0.0
        } else {
            raw
        };

        let estimate = YieldEstimate::from_per_hectare(per_hectare, request.area_hectares, extrapolated);
        if !estimate.total.is_finite() {
            return Err(PredictionError::PredictionFailed(format!(
                "total harvest overflows for {} hectares",
                request.area_hectares
            )));
        }
        tracing::debug!(
            per_hectare = estimate.per_hectare,
            total = estimate.total,
            "产量预测完成"
        );
        Ok(estimate)
    }
}
