//! Callout - 音色克隆播报服务
//!
//! 启动流程: 配置 -> 日志 -> 存储/注册表 -> 合成网关 -> HTTP 服务器

use std::sync::Arc;

use anyhow::Context;
use callout::application::{SynthesisGatewayPort, VoiceProfileRegistry};
use callout::config::{load_config, print_config, AppConfig, SynthesisEngine};
use callout::infrastructure::adapters::{
    FileSampleStorage, LocalModelGateway, LocalModelGatewayConfig, RemoteApiGateway,
    RemoteApiGatewayConfig, SymphoniaProbe,
};
use callout::infrastructure::http::{AppState, HttpServer};
use callout::infrastructure::memory::InMemoryProfileRepository;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：旧环境变量 > CALLOUT_* 环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!(
        "{},callout={},tower_http=debug",
        config.log.level, config.log.level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
        )
        .init();

    tracing::info!("Callout - voice cloning callout service");
    print_config(&config);

    // 存储（启动时创建目录）
    let storage = Arc::new(
        FileSampleStorage::new(&config.storage.uploads_dir, &config.storage.generated_dir)
            .await
            .context("Failed to prepare storage directories")?,
    );

    // 音色档案注册表
    let repo = Arc::new(InMemoryProfileRepository::new());
    let probe = Arc::new(SymphoniaProbe::new());
    let registry = Arc::new(VoiceProfileRegistry::new(repo, storage.clone(), probe));

    // 合成网关（启动时选定，运行期不变）
    let gateway = build_gateway(&config)?;
    tracing::info!(engine = gateway.name(), "Synthesis gateway ready");

    // 创建 HTTP 服务器
    let state = AppState::new(registry, storage, gateway);
    let server = HttpServer::new(config.server.clone(), state)
        .with_max_upload_size(config.storage.max_upload_size);

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for ctrl-c: {}", e);
                return;
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}

/// 根据配置选择合成网关
fn build_gateway(config: &AppConfig) -> anyhow::Result<Arc<dyn SynthesisGatewayPort>> {
    let synthesis = &config.synthesis;

    match synthesis.engine {
        SynthesisEngine::Remote => {
            let remote = &synthesis.remote;
            let gateway = RemoteApiGateway::new(RemoteApiGatewayConfig {
                base_url: remote.base_url.clone(),
                api_key: remote.api_key.clone(),
                voice_id: remote.voice_id.clone(),
                model_id: remote.model_id.clone(),
                stability: remote.stability,
                similarity_boost: remote.similarity_boost,
                timeout_secs: synthesis.timeout_secs,
            })
            .context("Failed to create remote synthesis gateway")?;

            // 凭证缺失不阻止启动，每次生成请求会以配置错误失败
            if !gateway.has_credential() {
                tracing::warn!("Remote engine selected but no API key configured; generation requests will fail");
            }

            Ok(Arc::new(gateway))
        }
        SynthesisEngine::Local => {
            let local = &synthesis.local;
            let gateway = LocalModelGateway::new(LocalModelGatewayConfig {
                program: local.program.clone(),
                args: local.args.clone(),
                model: local.model.clone(),
                language: local.language.clone(),
                timeout_secs: synthesis.timeout_secs,
                fallback_to_sample: local.fallback_to_sample,
            });

            Ok(Arc::new(gateway))
        }
    }
}
