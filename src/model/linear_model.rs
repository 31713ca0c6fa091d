// ==========================================
// 农情智能查询核心 - 线性管线模型产物
// ==========================================
// 产物格式: JSON（见 tests/fixtures/annapurna_model.json）
// 结构: 类别特征按 one-hot 系数表取值（未知类别贡献 0），
//       数值特征按系数线性叠加，再加截距
// ==========================================

use crate::model::error::{ModelError, ModelResult};
use crate::model::schema::{FeatureEncoding, FeatureRow, FeatureSpec, ModelInputSchema};
use crate::model::yield_model::YieldModel;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;

pub const MODEL_TYPE: &str = "linear_pipeline";

/// 线性管线模型
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearPipelineModel {
    pub model_type: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub target: Option<String>,
    pub features: Vec<FeatureSpec>,
    pub intercept: f64,
    #[serde(default)]
    pub numeric_coefficients: HashMap<String, f64>,
    /// 特征名 → (类别值 → 系数)
    #[serde(default)]
    pub category_coefficients: HashMap<String, HashMap<String, f64>>,
    /// 训练数据覆盖的年份区间（仅用于诊断）
    #[serde(default)]
    pub training_years: Option<[i32; 2]>,
}

impl LinearPipelineModel {
    /// 从 JSON 文本解析并校验
    pub fn from_json_str(raw: &str) -> ModelResult<Self> {
        let model: LinearPipelineModel = serde_json::from_str(raw)?;
        model.validate()?;
        Ok(model)
    }

    /// 从文件加载
    pub fn from_path(path: &Path) -> ModelResult<Self> {
        if !path.exists() {
            return Err(ModelError::ArtifactNotFound(path.display().to_string()));
        }
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// 产物自洽性校验（不涉及请求结构）
    pub fn validate(&self) -> ModelResult<()> {
        if self.model_type != MODEL_TYPE {
            return Err(ModelError::InvalidArtifact(format!(
                "unsupported model_type '{}', expected '{}'",
                self.model_type, MODEL_TYPE
            )));
        }

        if self.features.is_empty() {
            return Err(ModelError::InvalidArtifact("no input features declared".to_string()));
        }

        if !self.intercept.is_finite() {
            return Err(ModelError::InvalidArtifact("intercept is not finite".to_string()));
        }

        for feature in &self.features {
            match feature.encoding {
                FeatureEncoding::Category => {
                    let table = self.category_coefficients.get(&feature.name).ok_or_else(|| {
                        ModelError::InvalidArtifact(format!(
                            "category feature '{}' has no coefficient table",
                            feature.name
                        ))
                    })?;
                    if let Some((level, _)) = table.iter().find(|(_, c)| !c.is_finite()) {
                        return Err(ModelError::InvalidArtifact(format!(
                            "coefficient for {}={} is not finite",
                            feature.name, level
                        )));
                    }
                    // 大小写不敏感查找要求类别键唯一
                    let mut seen = HashSet::new();
                    if let Some(level) = table
                        .keys()
                        .find(|k| !seen.insert(k.trim().to_ascii_uppercase()))
                    {
                        return Err(ModelError::InvalidArtifact(format!(
                            "category feature '{}' has keys differing only by case: '{}'",
                            feature.name, level
                        )));
                    }
                }
                _ => match self.numeric_coefficients.get(&feature.name) {
                    Some(c) if c.is_finite() => {}
                    Some(_) => {
                        return Err(ModelError::InvalidArtifact(format!(
                            "coefficient for '{}' is not finite",
                            feature.name
                        )))
                    }
                    None => {
                        return Err(ModelError::InvalidArtifact(format!(
                            "numeric feature '{}' has no coefficient",
                            feature.name
                        )))
                    }
                },
            }
        }

        Ok(())
    }

    fn predict_row(&self, row: &FeatureRow) -> ModelResult<f64> {
        if row.len() != self.features.len() {
            return Err(ModelError::InferenceError(format!(
                "model expects {} inputs, got {}",
                self.features.len(),
                row.len()
            )));
        }

        let mut acc = self.intercept;
        for (feature, value) in self.features.iter().zip(&row.values) {
            match feature.encoding {
                FeatureEncoding::Category => {
                    let level = value.as_category().ok_or_else(|| {
                        ModelError::InferenceError(format!(
                            "feature '{}' expects a category value",
                            feature.name
                        ))
                    })?;
                    // 未知类别按 one-hot 全零处理
                    acc += self
                        .category_coefficients
                        .get(&feature.name)
                        .and_then(|table| lookup_level(table, level))
                        .unwrap_or(0.0);
                }
                _ => {
                    let x = value.as_f64().ok_or_else(|| {
                        ModelError::InferenceError(format!(
                            "feature '{}' expects a numeric value",
                            feature.name
                        ))
                    })?;
                    let coefficient = self
                        .numeric_coefficients
                        .get(&feature.name)
                        .copied()
                        .unwrap_or(0.0);
                    acc += coefficient * x;
                }
            }
        }

        Ok(acc)
    }
}

/// 类别值查找: 先精确匹配，再大小写不敏感匹配
fn lookup_level(table: &HashMap<String, f64>, level: &str) -> Option<f64> {
    table.get(level).copied().or_else(|| {
        table
            .iter()
            .find(|(k, _)| k.trim().eq_ignore_ascii_case(level))
            .map(|(_, v)| *v)
    })
}

impl YieldModel for LinearPipelineModel {
    fn input_schema(&self) -> ModelInputSchema {
        ModelInputSchema {
            features: self.features.clone(),
        }
    }

    fn predict(&self, rows: &[FeatureRow]) -> ModelResult<Vec<f64>> {
        rows.iter().map(|row| self.predict_row(row)).collect()
    }

    fn describe(&self) -> String {
        format!(
            "{} v{} {}",
            self.model_type,
            self.version,
            self.input_schema()
        )
    }
}
