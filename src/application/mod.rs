//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（SynthesisGateway、ProfileRepository、SampleStorage、AudioProbe）
//! - registry: 音色档案注册表
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;
pub mod registry;

// Re-exports
pub use commands::{
    GenerateCallout,
    UploadVoice,
    handlers::{
        GenerateCalloutHandler, GenerateCalloutResponse, UploadVoiceHandler, UploadVoiceResponse,
    },
};

pub use error::ApplicationError;

pub use ports::{
    AudioProbePort, ProfileRepositoryPort, RepositoryError, SampleStoragePort, StorageError,
    SynthesisError, SynthesisGatewayPort, SynthesisOutcome,
};

pub use queries::{
    GetArtifact,
    GetProfile,
    handlers::{ArtifactResponse, GetArtifactHandler, GetProfileHandler, ProfileResponse},
};

pub use registry::VoiceProfileRegistry;
