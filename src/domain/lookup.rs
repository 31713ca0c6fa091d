// ==========================================
// 农情智能查询核心 - 查询结果包装
// ==========================================
// 红线: "无数据" 是合法结果，不是错误
// ==========================================

use serde::{Deserialize, Serialize};

/// 查表结果: 命中 / 无数据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "data", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LookupOutcome<T> {
    Found(T),
    NoDataFound,
}

impl<T> LookupOutcome<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, LookupOutcome::Found(_))
    }

    pub fn found(&self) -> Option<&T> {
        match self {
            LookupOutcome::Found(value) => Some(value),
            LookupOutcome::NoDataFound => None,
        }
    }

    pub fn into_found(self) -> Option<T> {
        match self {
            LookupOutcome::Found(value) => Some(value),
            LookupOutcome::NoDataFound => None,
        }
    }
}
