//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 兼容旧部署的环境变量（PORT、USE_ELEVENLABS_API、ELEVENLABS_API_KEY）
//! 2. 环境变量（前缀 `CALLOUT_`）
//! 3. 配置文件（config.toml）
//! 4. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::{AppConfig, SynthesisEngine};

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 旧部署使用的环境变量
#[derive(Debug, Clone, Default)]
pub struct LegacyEnv {
    pub port: Option<String>,
    pub use_elevenlabs_api: Option<String>,
    pub elevenlabs_api_key: Option<String>,
}

impl LegacyEnv {
    pub fn from_env() -> Self {
        Self {
            port: std::env::var("PORT").ok(),
            use_elevenlabs_api: std::env::var("USE_ELEVENLABS_API").ok(),
            elevenlabs_api_key: std::env::var("ELEVENLABS_API_KEY").ok(),
        }
    }

    fn port(&self) -> Result<Option<i64>, ConfigError> {
        match self.port.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw.parse::<i64>().map(Some).map_err(|_| {
                ConfigError::ValidationError(format!("PORT must be a number, got {:?}", raw))
            }),
        }
    }

    /// 仅 `USE_ELEVENLABS_API=true` 强制远程引擎；其它值不覆盖已有配置
    fn engine(&self) -> Option<&'static str> {
        self.use_elevenlabs_api
            .as_deref()
            .filter(|v| v.trim().eq_ignore_ascii_case("true"))
            .map(|_| "remote")
    }
}

/// 加载应用配置
///
/// # 环境变量示例
/// - `CALLOUT_SERVER__PORT=8080`
/// - `CALLOUT_SYNTHESIS__ENGINE=remote`
/// - `CALLOUT_SYNTHESIS__REMOTE__API_KEY=...`
/// - `CALLOUT_STORAGE__GENERATED_DIR=/data/generated`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from(None, &LegacyEnv::from_env())
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
/// - `legacy` - 兼容旧部署的环境变量
pub fn load_config_from(
    config_path: Option<&Path>,
    legacy: &LegacyEnv,
) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 5000)?
        .set_default("storage.uploads_dir", "uploads")?
        .set_default("storage.generated_dir", "generated")?
        .set_default("storage.max_upload_size", 16 * 1024 * 1024)?
        .set_default("synthesis.engine", "local")?
        .set_default("synthesis.timeout_secs", 120)?
        .set_default("log.level", "info")?;

    // 2. 配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量
    // 前缀: CALLOUT_，层级分隔符: __ (双下划线)
    builder = builder.add_source(
        Environment::with_prefix("CALLOUT")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    // 4. 旧部署环境变量（最高优先级）
    builder = builder
        .set_override_option("server.port", legacy.port()?)?
        .set_override_option("synthesis.engine", legacy.engine())?
        .set_override_option(
            "synthesis.remote.api_key",
            legacy
                .elevenlabs_api_key
                .clone()
                .filter(|k| !k.trim().is_empty()),
        )?;

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    let storage = &config.storage;
    if storage.uploads_dir.as_os_str().is_empty() || storage.generated_dir.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "Storage directories cannot be empty".to_string(),
        ));
    }

    // 下载接口只暴露产物目录，样本不能与产物混放
    if storage.uploads_dir == storage.generated_dir {
        return Err(ConfigError::ValidationError(
            "uploads_dir and generated_dir must differ".to_string(),
        ));
    }

    if config.synthesis.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "Synthesis timeout cannot be 0".to_string(),
        ));
    }

    match config.synthesis.engine {
        SynthesisEngine::Remote if config.synthesis.remote.base_url.trim().is_empty() => {
            return Err(ConfigError::ValidationError(
                "Remote synthesis base URL cannot be empty".to_string(),
            ));
        }
        SynthesisEngine::Local if config.synthesis.local.program.as_os_str().is_empty() => {
            return Err(ConfigError::ValidationError(
                "Local synthesis program cannot be empty".to_string(),
            ));
        }
        _ => {}
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}:{}", config.server.host, config.server.port);
    tracing::info!("Uploads Directory: {:?}", config.storage.uploads_dir);
    tracing::info!("Generated Directory: {:?}", config.storage.generated_dir);
    tracing::info!("Max Upload Size: {} bytes", config.storage.max_upload_size);
    tracing::info!("Synthesis Engine: {}", config.synthesis.engine);
    tracing::info!("Synthesis Timeout: {}s", config.synthesis.timeout_secs);
    match config.synthesis.engine {
        SynthesisEngine::Remote => {
            tracing::info!("Remote API: {}", config.synthesis.remote.base_url);
            tracing::info!("Remote Voice: {}", config.synthesis.remote.voice_id);
            tracing::info!("Remote API Key: {}", config.synthesis.remote.masked_api_key());
        }
        SynthesisEngine::Local => {
            tracing::info!("Local Program: {:?}", config.synthesis.local.program);
            tracing::info!("Local Model: {}", config.synthesis.local.model);
            tracing::info!("Fallback To Sample: {}", config.synthesis.local.fallback_to_sample);
        }
    }
    if config.server.static_files.enabled {
        tracing::info!("Static Files: {:?}", config.server.static_files.dir);
    }
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(body: &str) -> tempfile::NamedTempFile {
        let file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        std::fs::write(file.path(), body).unwrap();
        file
    }

    #[test]
    fn test_load_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5000);
    }

    #[test]
    fn test_load_from_file() {
        let file = write_config(
            r#"
            [server]
            port = 6123

            [synthesis]
            engine = "remote"
            timeout_secs = 30

            [synthesis.remote]
            api_key = "from-file"
            "#,
        );

        let config = load_config_from(Some(file.path()), &LegacyEnv::default()).unwrap();
        assert_eq!(config.server.port, 6123);
        assert_eq!(config.synthesis.engine, SynthesisEngine::Remote);
        assert_eq!(config.synthesis.timeout_secs, 30);
        assert_eq!(config.synthesis.remote.api_key.as_deref(), Some("from-file"));
        assert_eq!(config.storage.generated_dir, std::path::PathBuf::from("generated"));
    }

    #[test]
    fn test_legacy_env_overrides_file() {
        let file = write_config(
            r#"
            [server]
            port = 6123
            "#,
        );
        let legacy = LegacyEnv {
            port: Some("7000".to_string()),
            use_elevenlabs_api: Some("true".to_string()),
            elevenlabs_api_key: Some("legacy-key".to_string()),
        };

        let config = load_config_from(Some(file.path()), &legacy).unwrap();
        assert_eq!(config.server.port, 7000);
        assert_eq!(config.synthesis.engine, SynthesisEngine::Remote);
        assert_eq!(config.synthesis.remote.api_key.as_deref(), Some("legacy-key"));
    }

    #[test]
    fn test_legacy_flag_other_than_true_keeps_configured_engine() {
        let file = write_config("[synthesis]\nengine = \"remote\"\n");
        for flag in ["false", "0", ""] {
            let legacy = LegacyEnv {
                use_elevenlabs_api: Some(flag.to_string()),
                ..Default::default()
            };

            let config = load_config_from(Some(file.path()), &legacy).unwrap();
            assert_eq!(config.synthesis.engine, SynthesisEngine::Remote, "{:?}", flag);
        }

        // 未配置时仍为默认的本地引擎
        let empty = write_config("");
        let legacy = LegacyEnv {
            use_elevenlabs_api: Some("false".to_string()),
            ..Default::default()
        };
        let config = load_config_from(Some(empty.path()), &legacy).unwrap();
        assert_eq!(config.synthesis.engine, SynthesisEngine::Local);
    }

    #[test]
    fn test_invalid_legacy_port() {
        let file = write_config("");
        let legacy = LegacyEnv {
            port: Some("http".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            load_config_from(Some(file.path()), &legacy),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_validation_passes_for_valid_config() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_error_for_zero_port() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_shared_directories() {
        let mut config = AppConfig::default();
        config.storage.generated_dir = config.storage.uploads_dir.clone();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_zero_timeout() {
        let mut config = AppConfig::default();
        config.synthesis.timeout_secs = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_empty_remote_url() {
        let mut config = AppConfig::default();
        config.synthesis.engine = SynthesisEngine::Remote;
        config.synthesis.remote.base_url = String::new();
        assert!(validate_config(&config).is_err());
    }
}
