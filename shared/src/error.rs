use thiserror::Error;

/// 構文解析呼び出し全体のエラー
#[derive(Error, Debug)]
pub enum AnalyzeError {
    #[error("Syntax analysis service failed: {0}")]
    Service(#[from] ServiceError),

    #[error("Unexpected analysis response: {0}")]
    Mapping(#[from] MappingError),

    #[error("Failed to write syntax table: {0}")]
    Output(#[from] std::io::Error),

    /// 既定クライアント用の設定（ファイル・環境変数）が読めない
    #[error("Failed to load client configuration")]
    Config(#[source] anyhow::Error),
}

/// リモート呼び出しが完了しなかった場合のエラー（内容はそのまま保持する）
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("{0}")]
    Status(#[from] tonic::Status),

    #[error("Transport error: {0}")]
    Transport(#[from] tonic::transport::Error),

    #[error("Client configuration error: {0}")]
    Configuration(String),
}

/// レスポンスが想定スキーマと食い違う場合のエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    #[error("Unknown {kind} value {value} for token {token_index}")]
    UnknownEnumValue {
        kind: &'static str,
        value: i32,
        token_index: usize,
    },

    #[error("Head token index {head} of token {token_index} is outside 0..{token_count}")]
    HeadIndexOutOfRange {
        token_index: usize,
        head: i32,
        token_count: usize,
    },
}

impl ServiceError {
    /// gRPCステータスコード（トランスポート層の失敗では None）
    pub fn code(&self) -> Option<tonic::Code> {
        match self {
            ServiceError::Status(status) => Some(status.code()),
            _ => None,
        }
    }
}
