// ==========================================
// 农情智能查询核心 - 品种推荐查询
// ==========================================
// 匹配规则:
//   1. 作物: trim + 大小写不敏感 等值匹配
//   2. 地区: 同规则等值匹配；无地区的行视为全地区通用行
//   3. 每个类别优先取本地区行，其次取通用行；同级多行取表中第一行
// 红线: 零命中返回 NoDataFound，不是错误
// ==========================================

use crate::domain::lookup::LookupOutcome;
use crate::domain::types::{normalize_key, VarietyCategory};
use crate::domain::variety::{VarietyPick, VarietyRecommendation, VarietyRecord};
use crate::importer::variety_importer::VarietyTable;
use std::sync::Arc;
use tracing::instrument;

fn match_key(raw: &str) -> String {
    normalize_key(raw).to_lowercase()
}

/// 按表中顺序取类别内第一条满足条件的记录
fn first_in<'a>(
    candidates: &[&'a VarietyRecord],
    category: VarietyCategory,
    pred: impl Fn(&VarietyRecord) -> bool,
) -> Option<&'a VarietyRecord> {
    candidates
        .iter()
        .copied()
        .find(|r| r.category == category && pred(*r))
}

#[derive(Debug, Clone)]
pub struct VarietyLookup {
    table: Arc<VarietyTable>,
}

impl VarietyLookup {
    pub fn new(table: Arc<VarietyTable>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &VarietyTable {
        &self.table
    }

    /// 查询三类推荐品种
    #[instrument(skip(self), fields(records = self.table.len()))]
    pub fn lookup(&self, crop: &str, district: &str) -> LookupOutcome<VarietyRecommendation> {
        let crop_key = match_key(crop);
        let district_key = match_key(district);
        if crop_key.is_empty() {
            return LookupOutcome::NoDataFound;
        }

        let candidates: Vec<&VarietyRecord> = self
            .table
            .records
            .iter()
            .filter(|r| match_key(&r.crop) == crop_key)
            .collect();

        let mut recommendation = VarietyRecommendation::default();
        for category in VarietyCategory::ALL {
            let is_local = |r: &VarietyRecord| {
                r.district
                    .as_deref()
                    .map(|d| !district_key.is_empty() && match_key(d) == district_key)
                    .unwrap_or(false)
            };

            let picked = first_in(&candidates, category, is_local)
                .or_else(|| first_in(&candidates, category, |r| r.district.is_none()));

            if let Some(record) = picked {
                *recommendation.slot_mut(category) = Some(VarietyPick::from(record));
            }
        }

        if recommendation.is_empty() {
            tracing::debug!(crop, district, "未找到品种数据");
            LookupOutcome::NoDataFound
        } else {
            LookupOutcome::Found(recommendation)
        }
    }
}
