// ==========================================
// 农情智能查询核心 - 配置层
// ==========================================
// 职责: 数据文件路径、年份范围、界面语言的多级覆写
// 来源: 内置默认值 / JSON 配置文件 / 环境变量
// ==========================================

pub mod config_manager;

// 重导出核心配置管理器
pub use config_manager::{
    config_keys, get_default_data_dir, AppConfig, ConfigError, ConfigManager, ConfigResult,
    DEFAULT_DISEASE_FILE, DEFAULT_LOCALE, DEFAULT_MODEL_FILE, DEFAULT_VARIETY_FILE,
    DEFAULT_YEAR_MAX, DEFAULT_YEAR_MIN, ENV_PREFIX,
};
