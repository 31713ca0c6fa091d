// ==========================================
// ConfigManager 集成测试
// ==========================================
// 测试目标: 默认值 / 配置文件 / 环境变量 三级覆写
// ==========================================

use annapurna_agri::config::{config_keys, ConfigError, ConfigManager};
use std::io::Write;
use std::path::PathBuf;
use tempfile::Builder;

fn config_file(content: &str) -> tempfile::NamedTempFile {
    let mut temp_file = Builder::new().suffix(".json").tempfile().unwrap();
    write!(temp_file, "{}", content).unwrap();
    temp_file
}

#[test]
fn test_defaults() {
    let config = ConfigManager::new()
        .with_overrides_from(vec![(
            "ANNAPURNA_DATA_DIR".to_string(),
            "/srv/annapurna".to_string(),
        )])
        .to_app_config()
        .unwrap();

    assert_eq!(config.variety_table_path, PathBuf::from("/srv/annapurna/seeds.csv"));
    assert_eq!(
        config.disease_table_path,
        PathBuf::from("/srv/annapurna/Disease_Advice.csv")
    );
    assert_eq!(config.year_range(), 2020..=2030);
    assert_eq!(config.locale, "en");
}

#[test]
fn test_file_then_env_precedence() {
    let file = config_file(
        r#"{"data_dir": "/from/file", "year_max": 2032, "locale": "hi", "model_path": "/models/m.json"}"#,
    );
    let config = ConfigManager::from_file(file.path())
        .unwrap()
        .with_overrides_from(vec![(
            "ANNAPURNA_DATA_DIR".to_string(),
            "/from/env".to_string(),
        )])
        .to_app_config()
        .unwrap();

    assert_eq!(config.variety_table_path, PathBuf::from("/from/env/seeds.csv"));
    // 显式路径不随数据目录变化
    assert_eq!(config.model_path, PathBuf::from("/models/m.json"));
    assert_eq!(config.year_max, 2032);
    assert_eq!(config.locale, "hi");
}

#[test]
fn test_invalid_year_in_file_fails_typed_config() {
    let file = config_file(r#"{"year_min": "twenty"}"#);
    let manager = ConfigManager::from_file(file.path()).unwrap();
    assert!(matches!(
        manager.to_app_config(),
        Err(ConfigError::InvalidValue { key, .. }) if key == config_keys::YEAR_MIN
    ));
}
