// ==========================================
// 农情智能查询核心 - 种子品种实体
// ==========================================
// 职责: 品种表的统一内部记录形态（宽表 / 长表 导入后均归一为此结构）
// ==========================================

use crate::domain::types::VarietyCategory;
use serde::{Deserialize, Serialize};

/// 规范化后的品种记录（一行 = 一个类别的一个品种）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarietyRecord {
    pub crop: String,
    /// 旧版数据无地区列，此时为 None（全地区通用）
    pub district: Option<String>,
    pub category: VarietyCategory,
    pub seed_name: String,
    pub justification: Option<String>,
    /// 源文件行号（从 1 开始，不含表头）
    pub row_number: usize,
}

/// 单个类别的推荐品种
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarietyPick {
    pub seed_name: String,
    pub justification: Option<String>,
}

impl From<&VarietyRecord> for VarietyPick {
    fn from(record: &VarietyRecord) -> Self {
        Self {
            seed_name: record.seed_name.clone(),
            justification: record.justification.clone(),
        }
    }
}

/// 三类品种推荐
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VarietyRecommendation {
    pub stable: Option<VarietyPick>,
    pub high_yield: Option<VarietyPick>,
    pub short_duration: Option<VarietyPick>,
}

impl VarietyRecommendation {
    pub fn get(&self, category: VarietyCategory) -> Option<&VarietyPick> {
        match category {
            VarietyCategory::Stable => self.stable.as_ref(),
            VarietyCategory::HighYield => self.high_yield.as_ref(),
            VarietyCategory::ShortDuration => self.short_duration.as_ref(),
        }
    }

    pub(crate) fn slot_mut(&mut self, category: VarietyCategory) -> &mut Option<VarietyPick> {
        match category {
            VarietyCategory::Stable => &mut self.stable,
            VarietyCategory::HighYield => &mut self.high_yield,
            VarietyCategory::ShortDuration => &mut self.short_duration,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.stable.is_none() && self.high_yield.is_none() && self.short_duration.is_none()
    }

    pub fn is_complete(&self) -> bool {
        self.stable.is_some() && self.high_yield.is_some() && self.short_duration.is_some()
    }
}
