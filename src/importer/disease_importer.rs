// ==========================================
// 农情智能查询核心 - 病害表导入器
// ==========================================
// 必需列: Crop_Name, Disease_Name, Risk_Level, Prevention_Advice
// ==========================================

use crate::domain::disease::DiseaseRecord;
use crate::domain::types::{normalize_key, RiskLevel};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::table_trait::{FileParser, RawTable};
use serde::Serialize;
use std::path::Path;

const TABLE_NAME: &str = "disease";

const CROP_NAME: &[&str] = &["Crop_Name", "Crop"];
const DISEASE_NAME: &[&str] = &["Disease_Name", "Disease"];
const RISK_LEVEL: &[&str] = &["Risk_Level", "Risk"];
const PREVENTION_ADVICE: &[&str] = &["Prevention_Advice", "Prevention", "Advice"];

/// 归一化后的病害表（保持文件行序）
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DiseaseTable {
    pub records: Vec<DiseaseRecord>,
    pub skipped_rows: usize,
}

impl DiseaseTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

pub struct DiseaseTableImporter {
    file_parser: Box<dyn FileParser>,
}

impl DiseaseTableImporter {
    pub fn new(file_parser: Box<dyn FileParser>) -> Self {
        Self { file_parser }
    }

    pub fn import(&self, file_path: &Path) -> ImportResult<DiseaseTable> {
        let raw = self.file_parser.parse_to_raw_table(file_path)?;
        let table = Self::normalize(raw)?;

        tracing::info!(
            path = %file_path.display(),
            records = table.len(),
            skipped = table.skipped_rows,
            "病害表加载完成"
        );
        Ok(table)
    }

    pub fn normalize(raw: RawTable) -> ImportResult<DiseaseTable> {
        let mut missing = Vec::new();
        let mut resolve = |aliases: &[&str]| {
            let column = raw.resolve_column(aliases);
            if column.is_none() {
                missing.push(aliases[0].to_string());
            }
            column
        };

        let crop_col = resolve(CROP_NAME);
        let disease_col = resolve(DISEASE_NAME);
        let risk_col = resolve(RISK_LEVEL);
        let advice_col = resolve(PREVENTION_ADVICE);

        let (Some(crop_col), Some(disease_col), Some(risk_col), Some(advice_col)) =
            (crop_col, disease_col, risk_col, advice_col)
        else {
            return Err(ImportError::schema_mismatch(TABLE_NAME, missing));
        };

        let mut table = DiseaseTable::default();
        for row in &raw.rows {
            let (Some(crop_name), Some(disease_name)) = (row.get(&crop_col), row.get(&disease_col))
            else {
                tracing::warn!(row = row.row_number, "病害表行缺少作物或病害名，已跳过");
                table.skipped_rows += 1;
                continue;
            };

            // 无法识别的风险等级保留原文，不丢弃该病害
            let risk_text = row.get(&risk_col).map(normalize_key).unwrap_or_default();
            let risk_level = match risk_text.parse::<RiskLevel>() {
                Ok(level) => Some(level),
                Err(e) => {
                    tracing::warn!(row = row.row_number, error = %e, "病害风险等级无法识别，保留原文");
                    None
                }
            };

            table.records.push(DiseaseRecord {
                crop_name: crop_name.to_string(),
                disease_name: disease_name.to_string(),
                risk_level,
                risk_text,
                prevention_advice: row.get(&advice_col).unwrap_or_default().to_string(),
            });
        }

        Ok(table)
    }
}
