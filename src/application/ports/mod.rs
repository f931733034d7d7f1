//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod audio_probe;
mod profile_repository;
mod sample_storage;
mod synthesis_gateway;

pub use audio_probe::AudioProbePort;
pub use profile_repository::{ProfileRepositoryPort, RepositoryError};
pub use sample_storage::{SampleStoragePort, StorageError};
pub use synthesis_gateway::{SynthesisError, SynthesisGatewayPort, SynthesisOutcome};
