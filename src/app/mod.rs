// ==========================================
// 农情智能查询核心 - 应用层
// ==========================================
// 职责: 启动加载与进程级只读状态
// ==========================================

pub mod state;

// 重导出
pub use state::{bootstrap, global, init_global, AppState, FeatureSlot};
