use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    /// Base location of the HaalCentraal `ingeschrevenpersonen` collection,
    /// e.g. `https://host/haal-centraal-brp-bevragen/api/v1.3/ingeschrevenpersonen`.
    pub brp_base_url: String,
    pub brp_api_key: Option<String>,
    /// Path to the StUF La01 mapping definition JSON.
    pub mapping_file: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            brp_base_url: std::env::var("BRP_BASE_URL")
                .map_err(|_| anyhow::anyhow!("BRP_BASE_URL environment variable required"))
                .and_then(|url| {
                    if url.trim().is_empty() {
                        anyhow::bail!("BRP_BASE_URL cannot be empty");
                    }
                    if !url.starts_with("http://") && !url.starts_with("https://") {
                        anyhow::bail!("BRP_BASE_URL must start with http:// or https://");
                    }
                    Ok(url.trim_end_matches('/').to_string())
                })?,
            brp_api_key: std::env::var("BRP_API_KEY")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            mapping_file: std::env::var("MAPPING_FILE")
                .unwrap_or_else(|_| "mappings/stuf.haalCentraalToLa01.mapping.json".to_string()),
        };

        // Log successful configuration load (without sensitive values)
        tracing::info!("Configuration loaded successfully");
        tracing::debug!("BRP base URL: {}", config.brp_base_url);
        if config.brp_api_key.is_some() {
            tracing::debug!("BRP API key configured");
        }
        tracing::debug!("Mapping file: {}", config.mapping_file);
        tracing::debug!("Server port: {}", config.port);

        Ok(config)
    }
}
