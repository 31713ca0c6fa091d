// ==========================================
// 进程级状态初始化测试
// ==========================================
// 测试目标: init_global 并发首调只加载一次，后续调用返回同一实例
// 注意: OnceLock 为进程级全局状态，本文件只放一个测试
// ==========================================


use annapurna_agri::api::Feature;
use annapurna_agri::app::{self, AppState};
use annapurna_agri::config::AppConfig;
use std::sync::{Arc, Barrier};
use std::thread;
use test_helpers::create_full_data_dir;

#[test]
fn test_init_global_loads_once_under_concurrent_first_calls() {
    let data_dir = create_full_data_dir().unwrap();
    let config = AppConfig::from_data_dir(data_dir.path());

    assert!(app::global().is_none());

    const THREADS: usize = 8;
    let barrier = Barrier::new(THREADS);
    let states: Vec<Arc<AppState>> = thread::scope(|scope| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                scope.spawn(|| {
                    barrier.wait();
                    app::init_global(&config)
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let first = &states[0];
    for state in &states[1..] {
        assert!(Arc::ptr_eq(first, state));
    }
    assert!(first.is_ready(Feature::YieldPrediction));
    assert!(first.is_ready(Feature::VarietyLookup));
    assert!(first.is_ready(Feature::DiseaseLookup));

    // 后续调用忽略新配置
    let empty_dir = tempfile::TempDir::new().unwrap();
    let mut other = AppConfig::from_data_dir(empty_dir.path());
    other.year_min = 1990;
    let again = app::init_global(&other);
    assert!(Arc::ptr_eq(first, &again));
    assert_eq!(again.config.year_min, config.year_min);
    assert!(again.is_ready(Feature::VarietyLookup));

    let global = app::global().unwrap();
    assert!(Arc::ptr_eq(first, &global));
}
