// ==========================================
// 农情智能查询核心 - 请求校验器
// ==========================================
// 职责: 界面原始输入（字符串）→ 强类型 PredictionRequest
// 规则: trim + 大小写不敏感；面积必须为正的有限数
// ==========================================

use crate::api::dto::DashboardQuery;
use crate::api::error::{ApiError, ApiResult};
use crate::domain::request::PredictionRequest;
use crate::domain::types::{Crop, District, Season};

// ==========================================
// RequestValidator - 请求校验器
// ==========================================
pub struct RequestValidator;

impl RequestValidator {
    /// 校验并构造预测请求
    ///
    /// # 返回
    /// - Ok(PredictionRequest)
    /// - Err(ApiError::InvalidInput): 地区 / 作物 / 季节无法识别，或面积不合法
    pub fn validate_prediction(query: &DashboardQuery) -> ApiResult<PredictionRequest> {
        let district: District = query
            .district
            .parse()
            .map_err(|e| ApiError::InvalidInput(format!("{}", e)))?;
        let crop: Crop = query
            .crop
            .parse()
            .map_err(|e| ApiError::InvalidInput(format!("{}", e)))?;
        let season: Season = query
            .season
            .parse()
            .map_err(|e| ApiError::InvalidInput(format!("{}", e)))?;

        Self::validate_area(query.area_hectares)?;

        Ok(PredictionRequest::new(
            district,
            crop,
            query.year,
            season,
            query.area_hectares,
        ))
    }

    /// 面积校验: 正的有限数
    pub fn validate_area(area_hectares: f64) -> ApiResult<()> {
        if !area_hectares.is_finite() || area_hectares <= 0.0 {
            return Err(ApiError::InvalidInput(format!(
                "area must be a positive number of hectares, got {}",
                area_hectares
            )));
        }
        Ok(())
    }
}
