// ==========================================
// 农情智能查询核心 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 优先级: 内置默认值 < JSON 配置文件 < 环境变量 ANNAPURNA_<KEY>
// ==========================================

use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::{BTreeMap, HashMap};
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// 环境变量前缀
pub const ENV_PREFIX: &str = "ANNAPURNA_";

pub const DEFAULT_VARIETY_FILE: &str = "seeds.csv";
pub const DEFAULT_DISEASE_FILE: &str = "Disease_Advice.csv";
pub const DEFAULT_MODEL_FILE: &str = "annapurna_model.json";
pub const DEFAULT_YEAR_MIN: i32 = 2020;
pub const DEFAULT_YEAR_MAX: i32 = 2030;
pub const DEFAULT_LOCALE: &str = "en";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {message}")]
    ReadError { path: String, message: String },

    #[error("config file {path} is not a flat JSON object: {message}")]
    FormatError { path: String, message: String },

    #[error("invalid config value (key: {key}, value: {value}): {message}")]
    InvalidValue {
        key: String,
        value: String,
        message: String,
    },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 数据文件
    pub const DATA_DIR: &str = "data_dir";
    pub const VARIETY_TABLE_PATH: &str = "variety_table_path";
    pub const DISEASE_TABLE_PATH: &str = "disease_table_path";
    pub const MODEL_PATH: &str = "model_path";

    // 年份范围（模型训练区间之外为外推）
    pub const YEAR_MIN: &str = "year_min";
    pub const YEAR_MAX: &str = "year_max";

    // 界面语言
    pub const LOCALE: &str = "locale";

    pub const ALL: [&str; 7] = [
        DATA_DIR,
        VARIETY_TABLE_PATH,
        DISEASE_TABLE_PATH,
        MODEL_PATH,
        YEAR_MIN,
        YEAR_MAX,
        LOCALE,
    ];
}

// ==========================================
// AppConfig - 生效配置快照（强类型）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub variety_table_path: PathBuf,
    pub disease_table_path: PathBuf,
    pub model_path: PathBuf,
    pub year_min: i32,
    pub year_max: i32,
    pub locale: String,
}

impl AppConfig {
    /// 以某个数据目录下的默认文件名构造
    pub fn from_data_dir(data_dir: &Path) -> Self {
        Self {
            variety_table_path: data_dir.join(DEFAULT_VARIETY_FILE),
            disease_table_path: data_dir.join(DEFAULT_DISEASE_FILE),
            model_path: data_dir.join(DEFAULT_MODEL_FILE),
            year_min: DEFAULT_YEAR_MIN,
            year_max: DEFAULT_YEAR_MAX,
            locale: DEFAULT_LOCALE.to_string(),
        }
    }

    pub fn year_range(&self) -> RangeInclusive<i32> {
        self.year_min..=self.year_max
    }
}

/// 默认数据目录: <用户数据目录>/annapurna，取不到时回退到 ./data
pub fn get_default_data_dir() -> PathBuf {
    match dirs::data_dir() {
        Some(data_dir) => data_dir.join("annapurna"),
        None => PathBuf::from("./data"),
    }
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ConfigManager {
    /// 显式配置项（未出现的键使用默认值）
    values: HashMap<String, String>,
}

impl ConfigManager {
    /// 仅使用内置默认值
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(values: HashMap<String, String>) -> Self {
        Self { values }
    }

    /// 从 JSON 配置文件加载（扁平对象，值可为字符串或数字）
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let parsed: BTreeMap<String, serde_json::Value> =
            serde_json::from_str(&raw).map_err(|e| ConfigError::FormatError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        let mut values = HashMap::new();
        for (key, value) in parsed {
            let text = match value {
                serde_json::Value::String(s) => s,
                serde_json::Value::Number(n) => n.to_string(),
                serde_json::Value::Bool(b) => b.to_string(),
                serde_json::Value::Null => continue,
                other => {
                    return Err(ConfigError::FormatError {
                        path: path.display().to_string(),
                        message: format!("key '{}' has a nested value: {}", key, other),
                    })
                }
            };
            if !config_keys::ALL.contains(&key.as_str()) {
                tracing::warn!(config_key = %key, "未知配置项，已忽略");
                continue;
            }
            values.insert(key, text);
        }

        tracing::info!(path = %path.display(), count = values.len(), "配置文件加载完成");
        Ok(Self { values })
    }

    /// 叠加进程环境变量（ANNAPURNA_DATA_DIR / ANNAPURNA_MODEL_PATH ...）
    pub fn with_env_overrides(self) -> Self {
        let vars = config_keys::ALL.iter().filter_map(|key| {
            std::env::var(env_var_name(key))
                .ok()
                .map(|value| (env_var_name(key), value))
        });
        self.with_overrides_from(vars)
    }

    /// 叠加给定的环境变量集合（测试使用，避免修改进程环境）
    pub fn with_overrides_from<I>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (name, value) in vars {
            let Some(key) = name.strip_prefix(ENV_PREFIX).map(str::to_lowercase) else {
                continue;
            };
            let trimmed = value.trim();
            if trimmed.is_empty() || !config_keys::ALL.contains(&key.as_str()) {
                continue;
            }
            tracing::debug!(config_key = %key, "环境变量覆写配置");
            self.values.insert(key, trimmed.to_string());
        }
        self
    }

    pub fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    /// 读取配置值
    ///
    /// # 返回
    /// - Some(String): 显式配置值
    /// - None: 未配置
    fn get_config_value(&self, key: &str) -> Option<String> {
        self.values
            .get(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    /// 读取配置值，带默认值
    fn get_config_or_default(&self, key: &str, default: &str) -> String {
        self.get_config_value(key).unwrap_or_else(|| default.to_string())
    }

    fn get_i32(&self, key: &str, default: i32) -> ConfigResult<i32> {
        match self.get_config_value(key) {
            None => Ok(default),
            Some(value) => value.parse::<i32>().map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                value: value.clone(),
                message: e.to_string(),
            }),
        }
    }

    // ===== 数据文件 =====

    pub fn data_dir(&self) -> PathBuf {
        self.get_config_value(config_keys::DATA_DIR)
            .map(PathBuf::from)
            .unwrap_or_else(get_default_data_dir)
    }

    fn data_file(&self, key: &str, default_name: &str) -> PathBuf {
        self.get_config_value(key)
            .map(PathBuf::from)
            .unwrap_or_else(|| self.data_dir().join(default_name))
    }

    pub fn variety_table_path(&self) -> PathBuf {
        self.data_file(config_keys::VARIETY_TABLE_PATH, DEFAULT_VARIETY_FILE)
    }

    pub fn disease_table_path(&self) -> PathBuf {
        self.data_file(config_keys::DISEASE_TABLE_PATH, DEFAULT_DISEASE_FILE)
    }

    pub fn model_path(&self) -> PathBuf {
        self.data_file(config_keys::MODEL_PATH, DEFAULT_MODEL_FILE)
    }

    // ===== 年份范围 =====

    /// 获取支持的年份范围
    ///
    /// # 默认值
    /// - 2020..=2030
    pub fn year_range(&self) -> ConfigResult<RangeInclusive<i32>> {
        let min = self.get_i32(config_keys::YEAR_MIN, DEFAULT_YEAR_MIN)?;
        let max = self.get_i32(config_keys::YEAR_MAX, DEFAULT_YEAR_MAX)?;
        if min > max {
            return Err(ConfigError::InvalidValue {
                key: config_keys::YEAR_MIN.to_string(),
                value: min.to_string(),
                message: format!("year_min must not exceed year_max ({})", max),
            });
        }
        Ok(min..=max)
    }

    // ===== 界面语言 =====

    /// 获取界面语言；不支持的语言回退到默认值
    pub fn locale(&self) -> String {
        let value = self.get_config_or_default(config_keys::LOCALE, DEFAULT_LOCALE);
        if crate::i18n::is_supported_locale(&value) {
            value
        } else {
            tracing::warn!(locale = %value, "不支持的界面语言，使用默认语言");
            DEFAULT_LOCALE.to_string()
        }
    }

    /// 生成强类型配置快照
    pub fn to_app_config(&self) -> ConfigResult<AppConfig> {
        let years = self.year_range()?;
        Ok(AppConfig {
            variety_table_path: self.variety_table_path(),
            disease_table_path: self.disease_table_path(),
            model_path: self.model_path(),
            year_min: *years.start(),
            year_max: *years.end(),
            locale: self.locale(),
        })
    }

    /// 获取生效配置的快照（JSON格式，诊断用）
    pub fn get_config_snapshot(&self) -> ConfigResult<String> {
        let config = self.to_app_config()?;
        let snapshot = json!({
            "data_dir": self.data_dir(),
            "variety_table_path": config.variety_table_path,
            "disease_table_path": config.disease_table_path,
            "model_path": config.model_path,
            "year_min": config.year_min,
            "year_max": config.year_max,
            "locale": config.locale,
        });
        Ok(snapshot.to_string())
    }
}

fn env_var_name(key: &str) -> String {
    format!("{}{}", ENV_PREFIX, key.to_uppercase())
}
