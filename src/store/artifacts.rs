use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use serde::de::DeserializeOwned;
use tracing::info;

use crate::config::Config;
use crate::model::SvdModel;

use super::{CatalogIndex, InteractionStore};

/// Everything loaded from disk at startup
pub struct Artifacts {
    pub model: SvdModel,
    pub interactions: InteractionStore,
    pub catalog: CatalogIndex,
}

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing {}", path.display()))
}

/// Loads the model and lookup tables from their serialized artifacts
///
/// Runs once at process start; any missing or malformed file fails startup.
pub fn load(config: &Config) -> anyhow::Result<Artifacts> {
    let model: SvdModel = read_json(Path::new(&config.model_path))?;
    info!("SVD model loaded");

    let raw_interactions: HashMap<u32, HashMap<u32, f64>> =
        read_json(Path::new(&config.interactions_path))?;
    let interactions = InteractionStore::from_ratings(raw_interactions);
    info!(users = interactions.user_count(), "user-item data loaded");

    let names: HashMap<u32, String> = read_json(Path::new(&config.names_path))?;
    let aisles: HashMap<u32, String> = read_json(Path::new(&config.aisles_path))?;
    let catalog = CatalogIndex::from_artifacts(names, aisles);
    info!(products = catalog.product_count(), "product catalog loaded");

    Ok(Artifacts {
        model,
        interactions,
        catalog,
    })
}
