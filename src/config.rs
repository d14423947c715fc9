use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Path to the serialized SVD model
    #[serde(default = "default_model_path")]
    pub model_path: String,

    /// Path to the user-item ratings table
    #[serde(default = "default_interactions_path")]
    pub interactions_path: String,

    /// Path to the product id -> display name table
    #[serde(default = "default_names_path")]
    pub names_path: String,

    /// Path to the product id -> aisle label table
    #[serde(default = "default_aisles_path")]
    pub aisles_path: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_model_path() -> String {
    "artifacts/model_svd.json".to_string()
}

fn default_interactions_path() -> String {
    "artifacts/user_item.json".to_string()
}

fn default_names_path() -> String {
    "artifacts/product_names.json".to_string()
}

fn default_aisles_path() -> String {
    "artifacts/product_aisles.json".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5003
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}
