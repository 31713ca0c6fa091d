// ==========================================
// 农情智能查询核心 - 预测请求与结果
// ==========================================
// 职责: 产量预测的输入 (PredictionRequest) 与输出 (YieldEstimate)
// ==========================================

use crate::domain::types::{Crop, District, Season};
use serde::{Deserialize, Serialize};

/// 产量预测请求
///
/// 五个字段全部必填；由 `RequestValidator` 从界面原始输入构造
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub district: District,
    pub crop: Crop,
    pub year: i32,
    pub season: Season,
    pub area_hectares: f64,
}

impl PredictionRequest {
    pub fn new(district: District, crop: Crop, year: i32, season: Season, area_hectares: f64) -> Self {
        Self {
            district,
            crop,
            year,
            season,
            area_hectares,
        }
    }
}

/// 产量预测结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YieldEstimate {
    /// 单产（吨/公顷），模型原始输出
    pub per_hectare: f64,
    /// 总产（吨）= 单产 × 面积
    pub total: f64,
    pub area_hectares: f64,
    /// 年份超出支持范围（模型外推，精度不保证）
    pub extrapolated: bool,
}

impl YieldEstimate {
    pub fn from_per_hectare(per_hectare: f64, area_hectares: f64, extrapolated: bool) -> Self {
        Self {
            per_hectare,
            total: per_hectare * area_hectares,
            area_hectares,
            extrapolated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_is_per_hectare_times_area() {
        let estimate = YieldEstimate::from_per_hectare(3.5, 2.0, false);
        assert_eq!(estimate.total, 7.0);
        assert_eq!(estimate.area_hectares, 2.0);
    }
}
