// Dev utility: print a yield model's declared inputs and check them against the
// dashboard request layout [District, Crop, Year, Season, Area].
//
// Usage:
//   cargo run --bin inspect_model -- [model_path]
//
// Without an argument the configured model path is used (ANNAPURNA_MODEL_PATH /
// ANNAPURNA_DATA_DIR). Exits non-zero when the model cannot be loaded or does not match.

use anyhow::{bail, Context};
use annapurna_agri::config::ConfigManager;
use annapurna_agri::model::{LinearPipelineModel, ModelInputSchema, YieldModel};
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    annapurna_agri::logging::init();

    let model_path = match std::env::args().nth(1).filter(|s| !s.trim().is_empty()) {
        Some(path) => PathBuf::from(path),
        None => ConfigManager::new().with_env_overrides().model_path(),
    };

    let model = LinearPipelineModel::from_path(&model_path)
        .with_context(|| format!("failed to load model from {}", model_path.display()))?;

    let declared = model.input_schema();
    println!("model: {}", model_path.display());
    println!("type: {} v{}", model.model_type, model.version);
    if let Some([first, last]) = model.training_years {
        println!("training years: {}-{}", first, last);
    }
    println!("features: {}", declared.n_features());
    for (idx, feature) in declared.features.iter().enumerate() {
        println!("  [{}] {}", idx, feature);
    }

    let expected = ModelInputSchema::request_schema();
    let differences = declared.differences(&expected);
    if differences.is_empty() {
        println!("schema: OK (matches {})", expected);
        return Ok(());
    }

    println!("schema: MISMATCH (request provides {})", expected);
    for diff in &differences {
        println!("  - {}", diff);
    }
    bail!("model input schema does not match the request schema");
}
