// ==========================================
// 农情智能查询核心 - 模型输入结构
// ==========================================
// 请求侧固定结构: [District, Crop, Year, Season, Area]
// 编码:           [category, category, integer, binary, float]
// 红线: 模型声明的输入结构必须与请求结构逐列一致（名称、顺序、编码）
// ==========================================

use crate::domain::request::PredictionRequest;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureEncoding {
    Category,
    Integer,
    Binary,
    Float,
}

impl FeatureEncoding {
    pub fn is_numeric(&self) -> bool {
        !matches!(self, FeatureEncoding::Category)
    }
}

impl fmt::Display for FeatureEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureEncoding::Category => write!(f, "category"),
            FeatureEncoding::Integer => write!(f, "integer"),
            FeatureEncoding::Binary => write!(f, "binary"),
            FeatureEncoding::Float => write!(f, "float"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSpec {
    pub name: String,
    pub encoding: FeatureEncoding,
}

impl FeatureSpec {
    pub fn new(name: &str, encoding: FeatureEncoding) -> Self {
        Self {
            name: name.to_string(),
            encoding,
        }
    }
}

impl fmt::Display for FeatureSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.encoding)
    }
}

/// 模型声明的输入结构（有序）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInputSchema {
    pub features: Vec<FeatureSpec>,
}

impl ModelInputSchema {
    /// 请求构造器产出的结构
    pub fn request_schema() -> Self {
        Self {
            features: vec![
                FeatureSpec::new("District", FeatureEncoding::Category),
                FeatureSpec::new("Crop", FeatureEncoding::Category),
                FeatureSpec::new("Year", FeatureEncoding::Integer),
                FeatureSpec::new("Season", FeatureEncoding::Binary),
                FeatureSpec::new("Area", FeatureEncoding::Float),
            ],
        }
    }

    pub fn n_features(&self) -> usize {
        self.features.len()
    }

    pub fn feature_names(&self) -> Vec<&str> {
        self.features.iter().map(|f| f.name.as_str()).collect()
    }

    /// 与期望结构逐列比较，返回差异描述（空 = 一致）
    pub fn differences(&self, expected: &ModelInputSchema) -> Vec<String> {
        let mut diffs = Vec::new();

        if self.n_features() != expected.n_features() {
            diffs.push(format!(
                "feature count: model expects {}, request provides {}",
                self.n_features(),
                expected.n_features()
            ));
        }

        for (idx, (actual, wanted)) in self.features.iter().zip(&expected.features).enumerate() {
            if !actual.name.eq_ignore_ascii_case(&wanted.name) {
                diffs.push(format!(
                    "column {}: model expects '{}', request provides '{}'",
                    idx, actual.name, wanted.name
                ));
            } else if actual.encoding != wanted.encoding {
                diffs.push(format!(
                    "column {} ({}): model expects {} encoding, request provides {}",
                    idx, actual.name, actual.encoding, wanted.encoding
                ));
            }
        }

        diffs
    }
}

impl fmt::Display for ModelInputSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cols: Vec<String> = self.features.iter().map(|c| c.to_string()).collect();
        write!(f, "[{}]", cols.join(", "))
    }
}

/// 单元格取值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Category(String),
    Integer(i64),
    Float(f64),
}

impl FeatureValue {
    pub fn category(value: &str) -> Self {
        FeatureValue::Category(value.to_string())
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FeatureValue::Category(_) => None,
            FeatureValue::Integer(v) => Some(*v as f64),
            FeatureValue::Float(v) => Some(*v),
        }
    }

    pub fn as_category(&self) -> Option<&str> {
        match self {
            FeatureValue::Category(v) => Some(v),
            _ => None,
        }
    }
}

/// 单行特征（顺序与 `ModelInputSchema::request_schema()` 一致）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
    pub values: Vec<FeatureValue>,
}

impl FeatureRow {
    pub fn from_request(request: &PredictionRequest) -> Self {
        Self {
            values: vec![
                FeatureValue::category(request.district.as_str()),
                FeatureValue::category(request.crop.as_str()),
                FeatureValue::Integer(i64::from(request.year)),
                FeatureValue::Integer(i64::from(request.season.model_code())),
                FeatureValue::Float(request.area_hectares),
            ],
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{Crop, District, Season};

    #[test]
    fn test_request_schema_matches_itself() {
        let schema = ModelInputSchema::request_schema();
        assert!(schema.differences(&ModelInputSchema::request_schema()).is_empty());
        assert_eq!(schema.feature_names(), vec!["District", "Crop", "Year", "Season", "Area"]);
    }

    #[test]
    fn test_differences_detect_count_and_encoding() {
        // 模拟 one-hot 展开后的模型（列数 / 编码均不一致）
        let model_schema = ModelInputSchema {
            features: vec![
                FeatureSpec::new("District", FeatureEncoding::Integer),
                FeatureSpec::new("Crop", FeatureEncoding::Category),
            ],
        };
        let diffs = model_schema.differences(&ModelInputSchema::request_schema());
        assert_eq!(diffs.len(), 2);
        assert!(diffs[0].contains("model expects 2, request provides 5"));
        assert!(diffs[1].contains("integer encoding"));
    }

    #[test]
    fn test_feature_row_encodes_season_as_binary() {
        let request = PredictionRequest::new(District::Varanasi, Crop::Wheat, 2024, Season::Rabi, 1.5);
        let row = FeatureRow::from_request(&request);
        assert_eq!(row.len(), 5);
        assert_eq!(row.values[0].as_category(), Some("VARANASI"));
        assert_eq!(row.values[3], FeatureValue::Integer(1));
        assert_eq!(row.values[4].as_f64(), Some(1.5));
    }
}
