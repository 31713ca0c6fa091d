// ==========================================
// 农情智能查询核心 - 品种表导入器
// ==========================================
// 职责: 表结构识别 + 归一化为 VarietyRecord（启动时执行一次）
// 支持结构:
//   - 宽表: Crop, [District], Stable Variety, High Yield Variety, Short Duration Variety
//   - 长表: Crop, [District], Category, Seed_Name, Justification
// 红线: 缺列时立即失败并列出缺失列，不允许静默返回空结果
// ==========================================

use crate::domain::types::VarietyCategory;
use crate::domain::variety::VarietyRecord;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::table_trait::{FileParser, RawRow, RawTable};
use serde::Serialize;
use std::path::Path;

const TABLE_NAME: &str = "variety";

const CROP_ALIASES: &[&str] = &["Crop", "Crop_Name"];
const DISTRICT_ALIASES: &[&str] = &["District", "District_Name"];
const CATEGORY_ALIASES: &[&str] = &["Category", "Variety_Category"];
const SEED_NAME_ALIASES: &[&str] = &["Seed_Name", "Variety_Name", "Variety"];
const JUSTIFICATION_ALIASES: &[&str] = &["Justification", "Reason"];

// ==========================================
// VarietySchema - 识别出的表结构
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "layout", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VarietySchema {
    /// 每行一个作物，三列分别是三类品种
    Wide {
        crop: String,
        district: Option<String>,
        stable: String,
        high_yield: String,
        short_duration: String,
    },
    /// 每行一个 (作物, 类别)
    Long {
        crop: String,
        district: Option<String>,
        category: String,
        seed_name: String,
        justification: String,
    },
}

impl VarietySchema {
    /// 根据表头识别结构
    pub fn detect(table: &RawTable) -> ImportResult<Self> {
        let crop = table.resolve_column(CROP_ALIASES);
        let district = table.resolve_column(DISTRICT_ALIASES);

        let stable = table.resolve_column(&[VarietyCategory::Stable.wide_column()]);
        let high_yield = table.resolve_column(&[VarietyCategory::HighYield.wide_column()]);
        let short_duration = table.resolve_column(&[VarietyCategory::ShortDuration.wide_column()]);

        let category = table.resolve_column(CATEGORY_ALIASES);
        let seed_name = table.resolve_column(SEED_NAME_ALIASES);
        let justification = table.resolve_column(JUSTIFICATION_ALIASES);

        let wide_hits = [&stable, &high_yield, &short_duration]
            .iter()
            .filter(|c| c.is_some())
            .count();
        let long_hits = [&category, &seed_name, &justification]
            .iter()
            .filter(|c| c.is_some())
            .count();

        match (crop, stable, high_yield, short_duration, category, seed_name, justification) {
            (Some(crop), Some(stable), Some(high_yield), Some(short_duration), _, _, _) => {
                Ok(VarietySchema::Wide {
                    crop,
                    district,
                    stable,
                    high_yield,
                    short_duration,
                })
            }
            (Some(crop), _, _, _, Some(category), Some(seed_name), Some(justification)) => {
                Ok(VarietySchema::Long {
                    crop,
                    district,
                    category,
                    seed_name,
                    justification,
                })
            }
            (crop, stable, high_yield, short_duration, category, seed_name, justification) => {
                // 按更接近的结构报告缺失列
                let mut missing = Vec::new();
                if crop.is_none() {
                    missing.push(CROP_ALIASES[0].to_string());
                }
                if long_hits > wide_hits {
                    push_missing(&mut missing, &category, CATEGORY_ALIASES[0]);
                    push_missing(&mut missing, &seed_name, SEED_NAME_ALIASES[0]);
                    push_missing(&mut missing, &justification, JUSTIFICATION_ALIASES[0]);
                } else {
                    push_missing(&mut missing, &stable, VarietyCategory::Stable.wide_column());
                    push_missing(&mut missing, &high_yield, VarietyCategory::HighYield.wide_column());
                    push_missing(
                        &mut missing,
                        &short_duration,
                        VarietyCategory::ShortDuration.wide_column(),
                    );
                }
                Err(ImportError::schema_mismatch(TABLE_NAME, missing))
            }
        }
    }

    pub fn has_district(&self) -> bool {
        match self {
            VarietySchema::Wide { district, .. } | VarietySchema::Long { district, .. } => {
                district.is_some()
            }
        }
    }

    pub fn layout_name(&self) -> &'static str {
        match self {
            VarietySchema::Wide { .. } => "WIDE",
            VarietySchema::Long { .. } => "LONG",
        }
    }
}

fn push_missing(missing: &mut Vec<String>, column: &Option<String>, name: &str) {
    if column.is_none() {
        missing.push(name.to_string());
    }
}

// ==========================================
// VarietyTable - 归一化后的品种表
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VarietyTable {
    pub schema: VarietySchema,
    pub records: Vec<VarietyRecord>,
    /// 因缺少作物 / 类别无法识别 / 品种名为空而跳过的行数
    pub skipped_rows: usize,
}

impl VarietyTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ==========================================
// VarietyTableImporter
// ==========================================
pub struct VarietyTableImporter {
    file_parser: Box<dyn FileParser>,
}

impl VarietyTableImporter {
    pub fn new(file_parser: Box<dyn FileParser>) -> Self {
        Self { file_parser }
    }

    /// 读取文件并归一化
    pub fn import(&self, file_path: &Path) -> ImportResult<VarietyTable> {
        let raw = self.file_parser.parse_to_raw_table(file_path)?;
        let table = Self::normalize(raw)?;

        tracing::info!(
            path = %file_path.display(),
            layout = table.schema.layout_name(),
            has_district = table.schema.has_district(),
            records = table.len(),
            skipped = table.skipped_rows,
            "品种表加载完成"
        );
        Ok(table)
    }

    /// 结构识别 + 行归一化（纯函数，便于测试）
    pub fn normalize(raw: RawTable) -> ImportResult<VarietyTable> {
        let schema = VarietySchema::detect(&raw)?;

        let mut records = Vec::new();
        let mut skipped_rows = 0;

        for row in &raw.rows {
            let produced = match &schema {
                VarietySchema::Wide {
                    crop,
                    district,
                    stable,
                    high_yield,
                    short_duration,
                } => map_wide_row(row, crop, district.as_deref(), [stable, high_yield, short_duration]),
                VarietySchema::Long {
                    crop,
                    district,
                    category,
                    seed_name,
                    justification,
                } => map_long_row(row, crop, district.as_deref(), category, seed_name, justification)
                    .map(|r| vec![r]),
            };

            match produced {
                Some(mut rows) if !rows.is_empty() => records.append(&mut rows),
                _ => skipped_rows += 1,
            }
        }

        Ok(VarietyTable {
            schema,
            records,
            skipped_rows,
        })
    }
}

fn map_wide_row(
    row: &RawRow,
    crop_col: &str,
    district_col: Option<&str>,
    category_cols: [&String; 3],
) -> Option<Vec<VarietyRecord>> {
    let Some(crop) = row.get(crop_col) else {
        tracing::warn!(row = row.row_number, "品种表行缺少作物，已跳过");
        return None;
    };
    let district = district_col.and_then(|c| row.get(c)).map(str::to_string);

    let records = VarietyCategory::ALL
        .iter()
        .zip(category_cols)
        .filter_map(|(category, column)| {
            row.get(column).map(|seed_name| VarietyRecord {
                crop: crop.to_string(),
                district: district.clone(),
                category: *category,
                seed_name: seed_name.to_string(),
                justification: None,
                row_number: row.row_number,
            })
        })
        .collect();
    Some(records)
}

fn map_long_row(
    row: &RawRow,
    crop_col: &str,
    district_col: Option<&str>,
    category_col: &str,
    seed_name_col: &str,
    justification_col: &str,
) -> Option<VarietyRecord> {
    let crop = row.get(crop_col)?;
    let seed_name = row.get(seed_name_col)?;
    let raw_category = row.get(category_col)?;

    let category = match raw_category.parse::<VarietyCategory>() {
        Ok(category) => category,
        Err(e) => {
            tracing::warn!(row = row.row_number, error = %e, "品种表类别无法识别，已跳过");
            return None;
        }
    };

    Some(VarietyRecord {
        crop: crop.to_string(),
        district: district_col.and_then(|c| row.get(c)).map(str::to_string),
        category,
        seed_name: seed_name.to_string(),
        justification: row.get(justification_col).map(str::to_string),
        row_number: row.row_number,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importer::file_parser::CsvParser;

    fn parse(csv: &str) -> RawTable {
        CsvParser.parse_reader(csv.as_bytes()).unwrap()
    }

    #[test]
    fn test_detect_wide_schema_without_district() {
        let raw = parse("Crop,Stable Variety,High Yield Variety,Short Duration Variety\n");
        let schema = VarietySchema::detect(&raw).unwrap();
        assert_eq!(schema.layout_name(), "WIDE");
        assert!(!schema.has_district());
    }

    #[test]
    fn test_detect_long_schema_with_district() {
        let raw = parse("CROP,DISTRICT,Category,Seed_Name,Justification\n");
        let schema = VarietySchema::detect(&raw).unwrap();
        assert_eq!(schema.layout_name(), "LONG");
        assert!(schema.has_district());
    }

    #[test]
    fn test_detect_reports_missing_wide_columns() {
        let raw = parse("Crop,Stable Variety\n");
        let err = VarietySchema::detect(&raw).unwrap_err();
        match err {
            ImportError::SchemaMismatch { table, missing } => {
                assert_eq!(table, "variety");
                assert_eq!(
                    missing,
                    vec![
                        "High Yield Variety".to_string(),
                        "Short Duration Variety".to_string()
                    ]
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_detect_reports_missing_long_columns_and_crop() {
        let raw = parse("Category,Seed_Name\n");
        let err = VarietySchema::detect(&raw).unwrap_err();
        match err {
            ImportError::SchemaMismatch { missing, .. } => {
                assert_eq!(missing, vec!["Crop".to_string(), "Justification".to_string()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_detect_empty_header_is_schema_mismatch() {
        let raw = RawTable::default();
        assert!(matches!(
            VarietySchema::detect(&raw),
            Err(ImportError::SchemaMismatch { .. })
        ));
    }

    #[test]
    fn test_normalize_wide_expands_categories() {
        let raw = parse(
            "Crop,Stable Variety,High Yield Variety,Short Duration Variety\n\
             Rice,Sarjoo-52,NDR-359,\n",
        );
        let table = VarietyTableImporter::normalize(raw).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.records[0].category, VarietyCategory::Stable);
        assert_eq!(table.records[1].seed_name, "NDR-359");
        assert_eq!(table.records[1].district, None);
    }

    #[test]
    fn test_normalize_long_skips_unknown_category() {
        let raw = parse(
            "Crop,District,Category,Seed_Name,Justification\n\
             Rice,VARANASI,Stable,Sarjoo-52,Tolerates waterlogging\n\
             Rice,VARANASI,Hybrid,PHB-71,n/a\n\
             ,VARANASI,Stable,Orphan,n/a\n",
        );
        let table = VarietyTableImporter::normalize(raw).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.skipped_rows, 2);
        assert_eq!(table.records[0].district.as_deref(), Some("VARANASI"));
        assert_eq!(
            table.records[0].justification.as_deref(),
            Some("Tolerates waterlogging")
        );
    }
}
