// ==========================================
// 农情智能查询核心 - 表格解析 Trait 与原始表结构
// ==========================================
// 职责: 定义文件解析接口（不包含实现）与解析中间结果
// ==========================================

use crate::importer::error::ImportResult;
use std::collections::HashMap;
use std::path::Path;

/// 原始数据行（列名 → 已 trim 的单元格文本）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    /// 数据行号（从 1 开始，不含表头）
    pub row_number: usize,
    pub values: HashMap<String, String>,
}

impl RawRow {
    /// 读取单元格；空字符串视为缺失
    pub fn get(&self, column: &str) -> Option<&str> {
        self.values
            .get(column)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    pub fn is_blank(&self) -> bool {
        self.values.values().all(|v| v.trim().is_empty())
    }
}

/// 原始表格（表头 + 数据行，保持文件顺序）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl RawTable {
    /// 按别名解析实际列名
    ///
    /// 比较时忽略大小写、空白、下划线与连字符，
    /// 因此 "Crop_Name" / "Crop Name" / "CROP NAME" 视为同一列
    pub fn resolve_column(&self, aliases: &[&str]) -> Option<String> {
        aliases.iter().find_map(|alias| {
            let wanted = compact_header(alias);
            self.headers
                .iter()
                .find(|h| compact_header(h) == wanted)
                .cloned()
        })
    }
}

/// 表头比较键
pub fn compact_header(header: &str) -> String {
    header
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect::<String>()
        .to_lowercase()
}

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 将外部文件解析为 RawTable
// 实现者: CsvParser / ExcelParser / UniversalFileParser
pub trait FileParser: Send + Sync {
    /// 解析文件
    ///
    /// # 返回
    /// - Ok(RawTable): 表头与全部非空行
    /// - Err: 文件不存在、格式不支持或解析失败
    fn parse_to_raw_table(&self, file_path: &Path) -> ImportResult<RawTable>;
}
