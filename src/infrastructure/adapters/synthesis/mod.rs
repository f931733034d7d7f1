//! Synthesis Adapter - 合成网关实现（远程 API / 本地模型 / 测试用 Fake）

mod fake_gateway;
mod local_model_gateway;
mod remote_api_gateway;

pub use fake_gateway::{FakeBehavior, FakeSynthesisGateway};
pub use local_model_gateway::{LocalModelGateway, LocalModelGatewayConfig};
pub use remote_api_gateway::{RemoteApiGateway, RemoteApiGatewayConfig};
