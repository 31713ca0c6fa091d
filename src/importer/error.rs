// ==========================================
// 农情智能查询核心 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error("unsupported file format: {0} (expected .csv/.xlsx/.xls)")]
    UnsupportedFormat(String),

    #[error("failed to read file: {0}")]
    FileReadError(String),

    #[error("failed to parse Excel workbook: {0}")]
    ExcelParseError(String),

    #[error("failed to parse CSV: {0}")]
    CsvParseError(String),

    // ===== 表结构错误 =====
    #[error("{table} table schema mismatch: missing column(s) {}", .missing.join(", "))]
    SchemaMismatch { table: String, missing: Vec<String> },
}

impl ImportError {
    pub fn schema_mismatch(table: &str, missing: Vec<String>) -> Self {
        ImportError::SchemaMismatch {
            table: table.to_string(),
            missing,
        }
    }
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

// 实现 From<calamine::Error>
impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_mismatch_names_missing_columns() {
        let err = ImportError::schema_mismatch(
            "variety",
            vec!["Stable Variety".to_string(), "High Yield Variety".to_string()],
        );
        let msg = err.to_string();
        assert!(msg.contains("variety"));
        assert!(msg.contains("Stable Variety, High Yield Variety"));
    }
}
