//! HTTP Routes
//!
//! API Endpoints:
//! - /api/ping                   GET   健康检查
//! - /api/upload-voice           POST  上传音色样本（multipart `audio`）
//! - /api/profile/{profile_id}   GET   音色档案详情
//! - /api/generate-callout       POST  生成播报
//! - /api/download/{filename}    GET   下载生成产物

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new().nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .route("/upload-voice", post(handlers::upload_voice))
        .route("/profile/:profile_id", get(handlers::get_profile))
        .route("/generate-callout", post(handlers::generate_callout))
        .route("/download/:filename", get(handlers::download_artifact))
}
