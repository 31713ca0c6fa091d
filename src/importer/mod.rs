// ==========================================
// 农情智能查询核心 - 导入层
// ==========================================
// 职责: 启动时读取外部查找表，识别表结构并归一化
// 支持: CSV, Excel
// ==========================================

// 模块声明
pub mod disease_importer;
pub mod error;
pub mod file_parser;
pub mod table_trait;
pub mod variety_importer;

// 重导出核心类型
pub use disease_importer::{DiseaseTable, DiseaseTableImporter};
pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};
pub use table_trait::{FileParser, RawRow, RawTable};
pub use variety_importer::{VarietySchema, VarietyTable, VarietyTableImporter};
