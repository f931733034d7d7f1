//! Callout - 音色克隆播报服务
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Profile Context: 音色档案（样本位置、时长）
//! - Callout Context: 播报文本、产物命名、生成状态机
//!
//! 应用层 (application/):
//! - Ports: 端口定义（ProfileRepository, SampleStorage, AudioProbe, SynthesisGateway）
//! - Registry: 音色档案注册表
//! - Commands: CQRS 命令处理器（上传样本、生成播报）
//! - Queries: CQRS 查询处理器（档案详情、产物下载）
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API
//! - Memory: ProfileRepository 内存实现
//! - Adapters: 文件存储、Symphonia 时长探测、远程/本地合成网关

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
