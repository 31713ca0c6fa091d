// ==========================================
// DashboardApi 端到端测试
// ==========================================
// 测试目标: 原始输入 → 校验 → 三个功能页 → 已渲染报告
// ==========================================


use annapurna_agri::api::{ApiError, DashboardQuery, Feature, TabOutcome};
use annapurna_agri::domain::{Crop, District, LookupOutcome, PredictionRequest, Season};
use annapurna_agri::engine::PredictionError;
use annapurna_agri::logging;
use annapurna_agri::model::YieldModel;
use std::sync::Arc;
use test_helpers::{create_api_with_mock, create_api_with_model, MockYieldModel};

fn varanasi_rice(locale: &str) -> DashboardQuery {
    DashboardQuery {
        district: "VARANASI".to_string(),
        crop: "Rice".to_string(),
        year: 2025,
        season: "Kharif".to_string(),
        area_hectares: 2.0,
        locale: Some(locale.to_string()),
    }
}

#[test]
fn test_predict_yield_with_mock_model() {
    logging::init_test();

    let api = create_api_with_mock(3.5);
    let request =
        PredictionRequest::new(District::Varanasi, Crop::Rice, 2025, Season::Kharif, 2.0);
    let estimate = api.predict_yield(&request).unwrap();

    assert_eq!(estimate.per_hectare, 3.5);
    assert!((estimate.total - 7.0).abs() < 1e-9);
    assert!(!estimate.extrapolated);
}

#[test]
fn test_total_is_per_hectare_times_area() {
    let api = create_api_with_mock(2.37);
    for area in [0.25, 1.0, 3.3, 12.5] {
        let request =
            PredictionRequest::new(District::Gonda, Crop::Wheat, 2026, Season::Rabi, area);
        let estimate = api.predict_yield(&request).unwrap();
        assert!((estimate.total - estimate.per_hectare * area).abs() < 1e-9);
    }
}

#[test]
fn test_evaluate_renders_all_three_tabs() {
    let report = create_api_with_mock(3.5).evaluate(&varanasi_rice("en"));

    let yield_view = report.yield_tab.data().unwrap();
    assert_eq!(yield_view.efficiency_label, "Yield Efficiency");
    assert_eq!(yield_view.efficiency_value, "3.50 Tons/Hectare");
    assert_eq!(
        yield_view.efficiency_help,
        "This is the estimated production for every 1 hectare of land."
    );
    assert_eq!(
        yield_view.total_help,
        "Total production for your specific area of 2.00 hectares."
    );
    assert_eq!(yield_view.total_label, "Total Estimated Harvest");
    assert_eq!(yield_view.total_value, "7.00 Tons");
    assert_eq!(yield_view.success_message, "Analysis complete for Rice in VARANASI!");
    assert_eq!(yield_view.extrapolation_note, None);

    let variety_view = report.variety_tab.data().unwrap();
    let seeds: Vec<&str> = variety_view.lines.iter().map(|l| l.seed_name.as_str()).collect();
    assert_eq!(seeds, vec!["Sarjoo-52", "NDR-359", "Pant Dhan-12"]);

    let disease_view = report.disease_tab.data().unwrap();
    assert_eq!(disease_view.entries.len(), 2);
    assert_eq!(disease_view.entries[0].title, "Threat: Blast");
    assert_eq!(disease_view.entries[0].risk_label, "Risk Level: High");
}

#[test]
fn test_evaluate_no_data_is_informational() {
    let query = DashboardQuery {
        district: "GONDA".to_string(),
        crop: "Sugarcane".to_string(),
        year: 2025,
        season: "Rabi".to_string(),
        area_hectares: 1.0,
        locale: None,
    };
    let report = create_api_with_mock(1.8).evaluate(&query);

    assert_eq!(report.yield_tab.error_kind(), Some("INVALID_INPUT"));
    assert_eq!(
        report.variety_tab,
        TabOutcome::NoData {
            message: "No variety data found for this selection.".to_string()
        }
    );
    assert_eq!(
        report.disease_tab,
        TabOutcome::NoData {
            message: "No active disease threats logged for Sugarcane.".to_string()
        }
    );
}

#[test]
fn test_unrecognized_risk_level_is_still_reported() {
    let query = DashboardQuery {
        district: "GONDA".to_string(),
        crop: "Barley".to_string(),
        year: 2025,
        season: "Rabi".to_string(),
        area_hectares: 1.0,
        locale: None,
    };
    let report = create_api_with_mock(1.8).evaluate(&query);

    // 品种表中 Barley 行类别无法识别，品种页无数据；病害页仍列出威胁
    assert!(matches!(report.variety_tab, TabOutcome::NoData { .. }));
    let view = report.disease_tab.data().unwrap();
    assert_eq!(view.entries.len(), 1);
    assert_eq!(view.entries[0].title, "Threat: Stripe Disease");
    assert_eq!(view.entries[0].risk_level, None);
    assert_eq!(view.entries[0].risk_label, "Risk Level: Severe");
}

#[test]
fn test_evaluate_missing_variety_shows_not_listed() {
    let query = DashboardQuery {
        district: "BALLIA".to_string(),
        crop: "Mustard".to_string(),
        year: 2024,
        season: "Rabi".to_string(),
        area_hectares: 1.0,
        locale: Some("en".to_string()),
    };
    let report = create_api_with_mock(1.1).evaluate(&query);
    let view = report.variety_tab.data().unwrap();
    assert_eq!(view.lines[0].seed_name, "Varuna");
    assert_eq!(view.lines[1].seed_name, "Not listed");
    assert_eq!(view.lines[2].seed_name, "Not listed");
}

#[test]
fn test_evaluate_in_hindi() {
    let report = create_api_with_mock(3.5).evaluate(&varanasi_rice("hi"));
    assert_eq!(report.locale, "hi");
    let yield_view = report.yield_tab.data().unwrap();
    assert_eq!(yield_view.efficiency_label, "उपज दक्षता");
    assert!(yield_view.efficiency_value.starts_with("3.50"));
}

#[test]
fn test_out_of_range_year_is_extrapolated() {
    let mut query = varanasi_rice("en");
    query.year = 2042;
    let report = create_api_with_mock(3.5).evaluate(&query);

    let yield_view = report.yield_tab.data().unwrap();
    assert!(yield_view.estimate.extrapolated);
    assert_eq!(
        yield_view.extrapolation_note.as_deref(),
        Some("Year 2042 is outside the supported range 2020-2030; treat this forecast as an extrapolation.")
    );
}

#[test]
fn test_missing_model_only_disables_yield_tab() {
    let api = create_api_with_model(None);
    let report = api.evaluate(&varanasi_rice("en"));

    assert_eq!(report.yield_tab.error_kind(), Some("MODEL_UNAVAILABLE"));
    assert!(report.variety_tab.is_found());
    assert!(report.disease_tab.is_found());

    let request =
        PredictionRequest::new(District::Varanasi, Crop::Rice, 2025, Season::Kharif, 2.0);
    assert!(matches!(
        api.predict_yield(&request),
        Err(ApiError::Prediction(PredictionError::ModelUnavailable(_)))
    ));
}

#[test]
fn test_mismatched_model_is_feature_mismatch() {
    let model: Arc<dyn YieldModel> = Arc::new(MockYieldModel::mismatched());
    let api = create_api_with_model(Some(model));
    let report = api.evaluate(&varanasi_rice("en"));

    match &report.yield_tab {
        TabOutcome::Error { kind, message } => {
            assert_eq!(kind, "FEATURE_MISMATCH");
            assert!(message.contains("model expects 1, request provides 5"));
        }
        other => panic!("unexpected yield tab: {other:?}"),
    }
    assert!(report.variety_tab.is_found());
}

#[test]
fn test_model_failure_is_prediction_error_message() {
    let model: Arc<dyn YieldModel> = Arc::new(MockYieldModel::failing("boom"));
    let report = create_api_with_model(Some(model)).evaluate(&varanasi_rice("en"));
    match &report.yield_tab {
        TabOutcome::Error { kind, message } => {
            assert_eq!(kind, "PREDICTION_ERROR");
            assert!(message.starts_with("Prediction Error:"));
            assert!(message.contains("boom"));
        }
        other => panic!("unexpected yield tab: {other:?}"),
    }
}

#[test]
fn test_empty_model_output_is_prediction_error() {
    let model: Arc<dyn YieldModel> = Arc::new(MockYieldModel::with_output(vec![]));
    let api = create_api_with_model(Some(model));
    let request =
        PredictionRequest::new(District::Varanasi, Crop::Rice, 2025, Season::Kharif, 1.0);
    let err = api.predict_yield(&request).unwrap_err();
    assert_eq!(err.kind(), "PREDICTION_ERROR");
}

#[test]
fn test_invalid_query_does_not_reach_model() {
    let mock = Arc::new(MockYieldModel::returning(3.5));
    let model: Arc<dyn YieldModel> = mock.clone();
    let api = create_api_with_model(Some(model));

    let mut query = varanasi_rice("en");
    query.area_hectares = -1.0;
    let report = api.evaluate(&query);

    assert_eq!(report.yield_tab.error_kind(), Some("INVALID_INPUT"));
    assert_eq!(mock.call_count(), 0);
    // 查表功能不受影响
    assert!(report.variety_tab.is_found());
}

#[test]
fn test_lookups_through_api() {
    let api = create_api_with_mock(1.0);
    assert!(api.lookup_varieties(" rice ", "varanasi").unwrap().is_found());
    assert_eq!(
        api.lookup_disease_risks("Sugarcane").unwrap(),
        LookupOutcome::NoDataFound
    );
}

#[test]
fn test_status_with_everything_loaded() {
    let status = create_api_with_mock(1.0).status();
    assert!(status.all_ready());
    assert_eq!(status.variety_records, 12);
    assert_eq!(status.disease_records, 6);
    assert!(status.feature(Feature::DiseaseLookup).unwrap().ready);
}

#[test]
fn test_report_serializes_with_request_id() {
    let report = create_api_with_mock(3.5).evaluate(&varanasi_rice("en"));
    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["request_id"], report.request_id.to_string());
    assert_eq!(value["yield_tab"]["status"], "FOUND");
    assert_eq!(value["yield_tab"]["data"]["estimate"]["total"], 7.0);
}

#[test]
fn test_catalog_values_are_accepted_by_evaluate() {
    let api = create_api_with_mock(2.0);
    let catalog = serde_json::to_value(api.catalog()).unwrap();
    let districts = catalog["districts"].as_array().unwrap();
    assert_eq!(districts.len(), 27);

    for district in districts {
        let mut query = varanasi_rice("en");
        query.district = district.as_str().unwrap().to_string();
        let report = api.evaluate(&query);
        assert!(
            report.yield_tab.is_found(),
            "district {} rejected: {:?}",
            query.district,
            report.yield_tab
        );
    }
}
