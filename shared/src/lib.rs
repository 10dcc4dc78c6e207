pub mod config;
pub mod error;
pub mod grpc_transport;
pub mod logging;
pub mod message_conversion;
pub mod protocol;
pub mod transport;

/// protoc で生成した google.cloud.language.v1 のメッセージとサービス
pub mod grpc {
    tonic::include_proto!("google.cloud.language.v1");
}

// ログマクロから参照する
#[doc(hidden)]
pub use paste;

pub use config::*;
pub use error::*;
pub use protocol::*;
pub use transport::*;
