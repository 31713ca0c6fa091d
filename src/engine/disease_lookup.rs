// ==========================================
// 农情智能查询核心 - 病害风险查询
// ==========================================
// 匹配规则: 查询作物名（trim + 小写）作为子串包含于记录作物名
//           （宽松匹配，兼容 "Rice" / "Paddy Rice" 等写法）
// 输出顺序: 表中原始行序
// ==========================================

use crate::domain::disease::DiseaseRecord;
use crate::domain::lookup::LookupOutcome;
use crate::domain::types::normalize_key;
use crate::importer::disease_importer::DiseaseTable;
use std::sync::Arc;
use tracing::instrument;

#[derive(Debug, Clone)]
pub struct DiseaseLookup {
    table: Arc<DiseaseTable>,
}

impl DiseaseLookup {
    pub fn new(table: Arc<DiseaseTable>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &DiseaseTable {
        &self.table
    }

    #[instrument(skip(self), fields(records = self.table.len()))]
    pub fn lookup(&self, crop: &str) -> LookupOutcome<Vec<DiseaseRecord>> {
        let needle = normalize_key(crop).to_lowercase();
        // 空查询会匹配全部行，视为无数据
        if needle.is_empty() {
            return LookupOutcome::NoDataFound;
        }

        let matches: Vec<DiseaseRecord> = self
            .table
            .records
            .iter()
            .filter(|r| normalize_key(&r.crop_name).to_lowercase().contains(&needle))
            .cloned()
            .collect();

        if matches.is_empty() {
            LookupOutcome::NoDataFound
        } else {
            LookupOutcome::Found(matches)
        }
    }
}
