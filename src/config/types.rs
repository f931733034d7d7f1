//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 存储配置
    #[serde(default)]
    pub storage: StorageConfig,

    /// 合成引擎配置
    #[serde(default)]
    pub synthesis: SynthesisConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 静态文件服务配置
    #[serde(default)]
    pub static_files: StaticFilesConfig,
}

/// 静态文件服务配置（前端页面）
#[derive(Debug, Clone, Deserialize)]
pub struct StaticFilesConfig {
    /// 是否启用静态文件服务
    #[serde(default = "default_static_enabled")]
    pub enabled: bool,

    /// 静态文件目录
    #[serde(default = "default_static_dir")]
    pub dir: PathBuf,
}

fn default_static_enabled() -> bool {
    false
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("static")
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            enabled: default_static_enabled(),
            dir: default_static_dir(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_files: StaticFilesConfig::default(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 存储配置
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// 上传样本目录
    #[serde(default = "default_uploads_dir")]
    pub uploads_dir: PathBuf,

    /// 生成产物目录（下载只在此目录内解析）
    #[serde(default = "default_generated_dir")]
    pub generated_dir: PathBuf,

    /// 上传文件最大大小（字节），默认 16MB
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size: usize,
}

fn default_uploads_dir() -> PathBuf {
    PathBuf::from("uploads")
}

fn default_generated_dir() -> PathBuf {
    PathBuf::from("generated")
}

fn default_max_upload_size() -> usize {
    16 * 1024 * 1024 // 16 MB
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            uploads_dir: default_uploads_dir(),
            generated_dir: default_generated_dir(),
            max_upload_size: default_max_upload_size(),
        }
    }
}

/// 合成引擎选择（进程启动时确定）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SynthesisEngine {
    /// 第三方 TTS API
    #[serde(alias = "elevenlabs", alias = "api")]
    Remote,
    /// 本地 TTS 模型
    #[default]
    #[serde(alias = "coqui", alias = "model")]
    Local,
}

impl std::fmt::Display for SynthesisEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SynthesisEngine::Remote => write!(f, "remote"),
            SynthesisEngine::Local => write!(f, "local"),
        }
    }
}

/// 合成配置
#[derive(Debug, Clone, Deserialize)]
pub struct SynthesisConfig {
    #[serde(default)]
    pub engine: SynthesisEngine,

    /// 单次合成超时（秒），两种引擎共用
    #[serde(default = "default_synthesis_timeout")]
    pub timeout_secs: u64,

    #[serde(default)]
    pub remote: RemoteApiConfig,

    #[serde(default)]
    pub local: LocalModelConfig,
}

fn default_synthesis_timeout() -> u64 {
    120
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            engine: SynthesisEngine::default(),
            timeout_secs: default_synthesis_timeout(),
            remote: RemoteApiConfig::default(),
            local: LocalModelConfig::default(),
        }
    }
}

/// 远程 TTS API 配置
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteApiConfig {
    #[serde(default = "default_remote_url")]
    pub base_url: String,

    /// API 凭证
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_remote_voice")]
    pub voice_id: String,

    #[serde(default = "default_remote_model")]
    pub model_id: String,

    #[serde(default = "default_voice_setting")]
    pub stability: f32,

    #[serde(default = "default_voice_setting")]
    pub similarity_boost: f32,
}

fn default_remote_url() -> String {
    "https://api.elevenlabs.io".to_string()
}

fn default_remote_voice() -> String {
    "21m00Tcm4TlvDq8ikWAM".to_string()
}

fn default_remote_model() -> String {
    "eleven_monolingual_v1".to_string()
}

fn default_voice_setting() -> f32 {
    0.5
}

impl Default for RemoteApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_remote_url(),
            api_key: None,
            voice_id: default_remote_voice(),
            model_id: default_remote_model(),
            stability: default_voice_setting(),
            similarity_boost: default_voice_setting(),
        }
    }
}

impl RemoteApiConfig {
    /// 用于日志输出的凭证掩码
    pub fn masked_api_key(&self) -> String {
        match self.api_key.as_deref().map(str::trim) {
            None | Some("") => "<unset>".to_string(),
            Some(key) if key.chars().count() <= 4 => "****".to_string(),
            Some(key) => {
                let tail: String = key.chars().skip(key.chars().count() - 4).collect();
                format!("****{}", tail)
            }
        }
    }
}

/// 本地 TTS 模型配置
#[derive(Debug, Clone, Deserialize)]
pub struct LocalModelConfig {
    /// TTS 可执行文件
    #[serde(default = "default_local_program")]
    pub program: PathBuf,

    /// 置于模型参数之前的额外参数
    #[serde(default)]
    pub args: Vec<String>,

    #[serde(default = "default_local_model")]
    pub model: String,

    #[serde(default = "default_local_language")]
    pub language: String,

    /// 模型失败时是否以样本副本作为降级结果
    #[serde(default = "default_fallback_to_sample")]
    pub fallback_to_sample: bool,
}

fn default_local_program() -> PathBuf {
    PathBuf::from("tts")
}

fn default_local_model() -> String {
    "tts_models/multilingual/multi-dataset/xtts_v2".to_string()
}

fn default_local_language() -> String {
    "en".to_string()
}

fn default_fallback_to_sample() -> bool {
    true
}

impl Default for LocalModelConfig {
    fn default() -> Self {
        Self {
            program: default_local_program(),
            args: Vec::new(),
            model: default_local_model(),
            language: default_local_language(),
            fallback_to_sample: default_fallback_to_sample(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}
