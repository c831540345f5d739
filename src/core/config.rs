//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure populated from
//! defaults and then overridden from environment variables (a `.env` file is
//! loaded first when present).

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Tool selection and invocation limits.
    pub tools: ToolsConfig,

    /// External API credentials configuration.
    pub credentials: CredentialsConfig,

    /// Document search index configuration.
    pub search: SearchConfig,

    /// Model deployments used for embeddings and chat completions.
    pub models: ModelsConfig,

    /// Image generation defaults.
    pub generation: GenerationSettings,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Which family of tools this process serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Toolset {
    /// Document and web search tools.
    Knowledge,
    /// Prompt improvement and image generation tools.
    Image,
    /// Every tool.
    #[default]
    All,
}

impl Toolset {
    /// Parse a toolset name, returning `None` for unknown values.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "knowledge" => Some(Self::Knowledge),
            "image" => Some(Self::Image),
            "all" => Some(Self::All),
            _ => None,
        }
    }

    pub fn includes_knowledge(self) -> bool {
        matches!(self, Self::Knowledge | Self::All)
    }

    pub fn includes_image(self) -> bool {
        matches!(self, Self::Image | Self::All)
    }
}

/// Tool registration and invocation limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// The tool family to register at startup.
    pub toolset: Toolset,

    /// Deadline for a whole tool invocation in seconds (0 disables it).
    pub invocation_timeout_secs: u64,

    /// Timeout applied to each outgoing HTTP request in seconds.
    pub http_timeout_secs: u64,
}

/// Configuration for external API credentials and endpoints.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct CredentialsConfig {
    pub azure_openai_key: Option<String>,
    pub azure_openai_endpoint: Option<String>,
    pub azure_openai_api_version: Option<String>,
    pub azure_search_endpoint: Option<String>,
    pub azure_search_admin_key: Option<String>,
    pub linkup_api_key: Option<String>,
    pub fal_key: Option<String>,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn redact(value: &Option<String>) -> Option<&'static str> {
            value.as_ref().map(|_| "[REDACTED]")
        }

        f.debug_struct("CredentialsConfig")
            .field("azure_openai_key", &redact(&self.azure_openai_key))
            .field("azure_openai_endpoint", &self.azure_openai_endpoint)
            .field("azure_openai_api_version", &self.azure_openai_api_version)
            .field("azure_search_endpoint", &self.azure_search_endpoint)
            .field("azure_search_admin_key", &redact(&self.azure_search_admin_key))
            .field("linkup_api_key", &redact(&self.linkup_api_key))
            .field("fal_key", &redact(&self.fal_key))
            .finish()
    }
}

/// Document search index configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Index consulted for `index_selector = primary`.
    pub primary_index: String,

    /// Index consulted for `index_selector = secondary`.
    pub secondary_index: String,

    /// Search REST API version.
    pub api_version: String,

    /// When set, a primary search returning fewer rows than this is retried
    /// against the secondary index.
    pub fallback_min_results: Option<usize>,
}

/// Model deployment names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelsConfig {
    pub embedding_deployment: String,
    pub chat_deployment: String,
    pub chat_temperature: f32,
}

/// Image generation defaults and the fixed style overlay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationSettings {
    /// Base URL of the image generation service.
    pub base_url: String,

    /// Model identifier appended to the base URL.
    pub model_id: String,

    /// Resource reference of the overlay (LoRA weights URL or path).
    pub overlay_reference: Option<String>,

    /// Weight applied to the overlay.
    pub overlay_weight: f64,

    /// Trigger token associated with the overlay.
    pub trigger_word: String,

    pub image_size: String,
    pub num_inference_steps: u32,
    pub guidance_scale: f64,
    pub enable_safety_checker: bool,
    pub output_format: String,
    pub sync_mode: bool,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            toolset: Toolset::All,
            invocation_timeout_secs: 120,
            http_timeout_secs: 60,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            primary_index: "esvi-mcp-official".to_string(),
            secondary_index: "esvi-mcp-deepresearch".to_string(),
            api_version: "2024-07-01".to_string(),
            fallback_min_results: None,
        }
    }
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            embedding_deployment: "text-embedding-3-large".to_string(),
            chat_deployment: "gpt-4o".to_string(),
            chat_temperature: 0.7,
        }
    }
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            base_url: "https://fal.run".to_string(),
            model_id: "fal-ai/flux-lora".to_string(),
            overlay_reference: None,
            overlay_weight: 1.0,
            trigger_word: "Esteban".to_string(),
            image_size: "landscape_4_3".to_string(),
            num_inference_steps: 28,
            guidance_scale: 3.5,
            enable_safety_checker: true,
            output_format: "png".to_string(),
            sync_mode: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "genai-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
            tools: ToolsConfig::default(),
            credentials: CredentialsConfig::default(),
            search: SearchConfig::default(),
            models: ModelsConfig::default(),
            generation: GenerationSettings::default(),
        }
    }
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = env_string(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring unparseable value for {}: {:?}", key, raw);
            None
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Server settings use the `MCP_` prefix; service credentials keep the
    /// variable names of their providers (`AZURE_OPENAI_KEY`, `FAL_KEY`, ...).
    /// Only the process environment is read; the binary loads `.env` into it
    /// before logging starts.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(name) = env_string("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Some(level) = env_string("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        config.transport = TransportConfig::from_env();

        if let Some(raw) = env_string("MCP_TOOLSET") {
            match Toolset::parse(&raw) {
                Some(toolset) => config.tools.toolset = toolset,
                None => warn!("Unknown MCP_TOOLSET {:?}, serving all tools", raw),
            }
        }
        if let Some(secs) = env_parse("MCP_TOOL_TIMEOUT_SECS") {
            config.tools.invocation_timeout_secs = secs;
        }
        if let Some(secs) = env_parse("MCP_HTTP_TIMEOUT_SECS") {
            config.tools.http_timeout_secs = secs;
        }

        config.credentials = CredentialsConfig {
            azure_openai_key: env_string("AZURE_OPENAI_KEY"),
            azure_openai_endpoint: env_string("AZURE_OPENAI_ENDPOINT"),
            azure_openai_api_version: env_string("AZURE_OPENAI_API_VERSION"),
            azure_search_endpoint: env_string("AZURE_SEARCH_SERVICE_ENDPOINT"),
            azure_search_admin_key: env_string("AZURE_SEARCH_ADMIN_KEY"),
            linkup_api_key: env_string("LINKUP_API_KEY"),
            fal_key: env_string("FAL_KEY"),
        };

        if let Some(index) = env_string("AZURE_SEARCH_PRIMARY_INDEX") {
            config.search.primary_index = index;
        }
        if let Some(index) = env_string("AZURE_SEARCH_SECONDARY_INDEX") {
            config.search.secondary_index = index;
        }
        if let Some(version) = env_string("AZURE_SEARCH_API_VERSION") {
            config.search.api_version = version;
        }
        config.search.fallback_min_results = env_parse("MCP_SEARCH_FALLBACK_MIN_RESULTS");
        if let Some(min) = config.search.fallback_min_results {
            info!("Secondary index fallback enabled below {} result(s)", min);
        }

        if let Some(deployment) = env_string("AZURE_OPENAI_EMBEDDING_DEPLOYMENT") {
            config.models.embedding_deployment = deployment;
        }
        if let Some(deployment) = env_string("AZURE_OPENAI_CHAT_DEPLOYMENT") {
            config.models.chat_deployment = deployment;
        }

        if let Some(base_url) = env_string("FAL_BASE_URL") {
            config.generation.base_url = base_url;
        }
        if let Some(model_id) = env_string("FAL_MODEL_ID") {
            config.generation.model_id = model_id;
        }
        config.generation.overlay_reference = env_string("LORA_PATH");
        if let Some(scale) = env_parse("LORA_SCALE") {
            config.generation.overlay_weight = scale;
        }
        if let Some(trigger) = env_string("LORA_TRIGGER_WORD") {
            config.generation.trigger_word = trigger;
        }

        config.log_missing_credentials();

        config
    }

    /// Warn about credentials the selected toolset will need but does not have.
    fn log_missing_credentials(&self) {
        let creds = &self.credentials;
        let mut required: Vec<(&str, bool)> = Vec::new();
        let mut need = |name: &'static str, present: bool| {
            if !required.iter().any(|(seen, _)| *seen == name) {
                required.push((name, present));
            }
        };

        if self.tools.toolset.includes_knowledge() {
            need("AZURE_OPENAI_KEY", creds.azure_openai_key.is_some());
            need("AZURE_SEARCH_SERVICE_ENDPOINT", creds.azure_search_endpoint.is_some());
            need("AZURE_SEARCH_ADMIN_KEY", creds.azure_search_admin_key.is_some());
            need("LINKUP_API_KEY", creds.linkup_api_key.is_some());
        }
        if self.tools.toolset.includes_image() {
            need("AZURE_OPENAI_KEY", creds.azure_openai_key.is_some());
            need("FAL_KEY", creds.fal_key.is_some());
            need("LORA_PATH", self.generation.overlay_reference.is_some());
        }

        for (name, present) in required {
            if !present {
                warn!("{} not set - tools depending on it will return errors", name);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_credentials_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("FAL_KEY", "fal_test_key");
            std::env::set_var("LORA_PATH", "https://example.com/lora.safetensors");
        }
        let config = Config::from_env();
        assert_eq!(config.credentials.fal_key.as_deref(), Some("fal_test_key"));
        assert_eq!(
            config.generation.overlay_reference.as_deref(),
            Some("https://example.com/lora.safetensors")
        );
        unsafe {
            std::env::remove_var("FAL_KEY");
            std::env::remove_var("LORA_PATH");
        }
    }

    #[test]
    fn test_toolset_and_fallback_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_TOOLSET", "knowledge");
            std::env::set_var("MCP_SEARCH_FALLBACK_MIN_RESULTS", "2");
        }
        let config = Config::from_env();
        assert_eq!(config.tools.toolset, Toolset::Knowledge);
        assert_eq!(config.search.fallback_min_results, Some(2));
        unsafe {
            std::env::remove_var("MCP_TOOLSET");
            std::env::remove_var("MCP_SEARCH_FALLBACK_MIN_RESULTS");
        }
    }

    #[test]
    fn test_from_env_leaves_process_environment_untouched() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::remove_var("FAL_KEY");
        }
        let before: Vec<(String, String)> = std::env::vars().collect();
        let config = Config::from_env();
        let after: Vec<(String, String)> = std::env::vars().collect();

        assert_eq!(before, after);
        assert_eq!(config.credentials.fal_key, None);
    }

    #[test]
    fn test_unparseable_timeout_keeps_default() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_TOOL_TIMEOUT_SECS", "soon");
        }
        let config = Config::from_env();
        assert_eq!(config.tools.invocation_timeout_secs, 120);
        unsafe {
            std::env::remove_var("MCP_TOOL_TIMEOUT_SECS");
        }
    }

    #[test]
    fn test_credentials_redacted_in_debug() {
        let creds = CredentialsConfig {
            azure_openai_key: Some("super_secret_key".to_string()),
            fal_key: Some("another_secret".to_string()),
            azure_openai_endpoint: Some("https://example.openai.azure.com".to_string()),
            ..Default::default()
        };
        let debug_str = format!("{:?}", creds);
        assert!(debug_str.contains("REDACTED"));
        assert!(!debug_str.contains("super_secret_key"));
        assert!(!debug_str.contains("another_secret"));
        assert!(debug_str.contains("example.openai.azure.com"));
    }

    #[test]
    fn test_toolset_parse() {
        assert_eq!(Toolset::parse("Image"), Some(Toolset::Image));
        assert_eq!(Toolset::parse(" all "), Some(Toolset::All));
        assert_eq!(Toolset::parse("everything"), None);
        assert!(Toolset::All.includes_knowledge());
        assert!(!Toolset::Image.includes_knowledge());
    }

    #[test]
    fn test_generation_defaults() {
        let settings = GenerationSettings::default();
        assert_eq!(settings.model_id, "fal-ai/flux-lora");
        assert_eq!(settings.num_inference_steps, 28);
        assert_eq!(settings.guidance_scale, 3.5);
        assert_eq!(settings.output_format, "png");
        assert!(settings.overlay_reference.is_none());
    }
}
