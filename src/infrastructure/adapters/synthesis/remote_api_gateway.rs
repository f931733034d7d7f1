//! Remote API Gateway - 调用第三方 TTS HTTP 服务（ElevenLabs 兼容）
//!
//! 实现 SynthesisGatewayPort trait
//!
//! 外部 TTS API:
//! POST {base_url}/v1/text-to-speech/{voice_id}
//! Headers: xi-api-key, Accept: audio/mpeg
//! Request: {"text": "...", "model_id": "...", "voice_settings": {...}}  (JSON)
//! Response: audio/mpeg binary

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::path::Path;
use std::time::Duration;

use crate::application::ports::{SynthesisError, SynthesisGatewayPort, SynthesisOutcome};

/// TTS 请求体 (JSON)
#[derive(Debug, Serialize)]
struct TextToSpeechRequest<'a> {
    text: &'a str,
    model_id: &'a str,
    voice_settings: VoiceSettings,
}

#[derive(Debug, Serialize)]
struct VoiceSettings {
    stability: f32,
    similarity_boost: f32,
}

/// 远程网关配置
#[derive(Debug, Clone)]
pub struct RemoteApiGatewayConfig {
    /// 服务基础 URL
    pub base_url: String,
    /// API 凭证；缺失时每次合成都会在发起网络请求前失败
    pub api_key: Option<String>,
    /// 远程音色 ID
    pub voice_id: String,
    pub model_id: String,
    pub stability: f32,
    pub similarity_boost: f32,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for RemoteApiGatewayConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.elevenlabs.io".to_string(),
            api_key: None,
            voice_id: "21m00Tcm4TlvDq8ikWAM".to_string(),
            model_id: "eleven_monolingual_v1".to_string(),
            stability: 0.5,
            similarity_boost: 0.5,
            timeout_secs: 120,
        }
    }
}

impl RemoteApiGatewayConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// 远程 API 网关
pub struct RemoteApiGateway {
    client: Client,
    config: RemoteApiGatewayConfig,
}

impl RemoteApiGateway {
    /// 创建新的远程网关
    pub fn new(config: RemoteApiGatewayConfig) -> Result<Self, SynthesisError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SynthesisError::Configuration(format!("HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// 是否已配置凭证
    pub fn has_credential(&self) -> bool {
        self.api_key().is_some()
    }

    fn api_key(&self) -> Option<&str> {
        self.config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }

    /// 获取合成 URL
    fn synthesis_url(&self) -> String {
        format!(
            "{}/v1/text-to-speech/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.voice_id
        )
    }
}

#[async_trait]
impl SynthesisGatewayPort for RemoteApiGateway {
    fn name(&self) -> &'static str {
        "remote"
    }

    fn output_extension(&self) -> &'static str {
        "mp3"
    }

    async fn synthesize(
        &self,
        _sample: &Path,
        text: &str,
        output: &Path,
    ) -> Result<SynthesisOutcome, SynthesisError> {
        let api_key = self.api_key().ok_or_else(|| {
            SynthesisError::Configuration("Remote synthesis API key is not configured".to_string())
        })?;

        let body = TextToSpeechRequest {
            text,
            model_id: &self.config.model_id,
            voice_settings: VoiceSettings {
                stability: self.config.stability,
                similarity_boost: self.config.similarity_boost,
            },
        };

        tracing::debug!(
            url = %self.synthesis_url(),
            text_len = text.len(),
            "Sending remote synthesis request"
        );

        let response = self
            .client
            .post(self.synthesis_url())
            .header("xi-api-key", api_key)
            .header(reqwest::header::ACCEPT, "audio/mpeg")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SynthesisError::Timeout(self.config.timeout_secs)
                } else if e.is_connect() {
                    SynthesisError::Upstream(format!("Cannot connect to synthesis API: {}", e))
                } else {
                    SynthesisError::Upstream(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(SynthesisError::Upstream(format!(
                "Synthesis API returned HTTP {}: {}",
                status.as_u16(),
                error_text
            )));
        }

        let audio_data = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                SynthesisError::Timeout(self.config.timeout_secs)
            } else {
                SynthesisError::Upstream(format!("Failed to read audio: {}", e))
            }
        })?;

        if audio_data.is_empty() {
            return Err(SynthesisError::Upstream(
                "Synthesis API returned an empty body".to_string(),
            ));
        }

        tokio::fs::write(output, &audio_data)
            .await
            .map_err(|e| SynthesisError::Io(format!("{}: {}", output.display(), e)))?;

        tracing::info!(
            output = %output.display(),
            audio_size = audio_data.len(),
            "Remote synthesis completed"
        );

        Ok(SynthesisOutcome::Completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Path as AxumPath, http::HeaderMap, http::StatusCode, routing::post, Router};
    use tokio::net::TcpListener;

    async fn spawn_api(status: StatusCode, body: &'static [u8]) -> String {
        let app = Router::new().route(
            "/v1/text-to-speech/:voice_id",
            post(move |AxumPath(_voice): AxumPath<String>, headers: HeaderMap| async move {
                if headers.get("xi-api-key").is_none() {
                    return (StatusCode::UNAUTHORIZED, Vec::new());
                }
                (status, body.to_vec())
            }),
        );
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[test]
    fn test_config_default() {
        let config = RemoteApiGatewayConfig::default();
        assert_eq!(config.base_url, "https://api.elevenlabs.io");
        assert_eq!(config.voice_id, "21m00Tcm4TlvDq8ikWAM");
        assert_eq!(config.timeout_secs, 120);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_config_builder() {
        let config = RemoteApiGatewayConfig::new("http://example.com:9000/")
            .with_api_key("k")
            .with_timeout(60);
        let gateway = RemoteApiGateway::new(config).unwrap();
        assert!(gateway.has_credential());
        assert_eq!(
            gateway.synthesis_url(),
            "http://example.com:9000/v1/text-to-speech/21m00Tcm4TlvDq8ikWAM"
        );
    }

    #[tokio::test]
    async fn test_missing_credential_fails_before_network() {
        // 端口 9 (discard) 上没有服务；若发起请求会得到连接错误而不是配置错误
        let gateway =
            RemoteApiGateway::new(RemoteApiGatewayConfig::new("http://127.0.0.1:9").with_api_key("  "))
                .unwrap();
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.mp3");

        let err = gateway
            .synthesize(Path::new("sample.wav"), "hello", &output)
            .await
            .unwrap_err();

        assert!(matches!(err, SynthesisError::Configuration(_)));
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn test_success_writes_audio() {
        let base = spawn_api(StatusCode::OK, b"ID3fake-mpeg").await;
        let gateway =
            RemoteApiGateway::new(RemoteApiGatewayConfig::new(base).with_api_key("secret")).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.mp3");

        let outcome = gateway
            .synthesize(Path::new("sample.wav"), "hello", &output)
            .await
            .unwrap();

        assert_eq!(outcome, SynthesisOutcome::Completed);
        assert_eq!(std::fs::read(&output).unwrap(), b"ID3fake-mpeg");
    }

    #[tokio::test]
    async fn test_non_success_status_is_upstream_error() {
        let base = spawn_api(StatusCode::PAYMENT_REQUIRED, b"quota exceeded").await;
        let gateway =
            RemoteApiGateway::new(RemoteApiGatewayConfig::new(base).with_api_key("secret")).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.mp3");

        let err = gateway
            .synthesize(Path::new("sample.wav"), "hello", &output)
            .await
            .unwrap_err();

        match err {
            SynthesisError::Upstream(msg) => assert!(msg.contains("402"), "{}", msg),
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(!output.exists());
    }
}
