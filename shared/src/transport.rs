use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;
use tonic::transport::Uri;

use crate::error::ServiceError;
use crate::grpc::AnalyzeSyntaxResponse;

/// 既定の接続先
pub const DEFAULT_ENDPOINT: &str = "https://language.googleapis.com";

/// オフセット（location）を数える単位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncodingType {
    /// サービスはオフセットを返さない（-1）
    None,
    #[default]
    Utf8,
    Utf16,
    Utf32,
}

impl FromStr for EncodingType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "").as_str() {
            "none" => Ok(EncodingType::None),
            "utf8" => Ok(EncodingType::Utf8),
            "utf16" => Ok(EncodingType::Utf16),
            "utf32" => Ok(EncodingType::Utf32),
            other => anyhow::bail!("Unknown encoding type '{other}' (expected none, utf8, utf16 or utf32)"),
        }
    }
}

/// 構文解析リクエスト（常に PLAIN_TEXT として送る）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxRequest {
    pub content: String,
    pub language_hint: Option<String>,
    pub encoding: EncodingType,
}

impl SyntaxRequest {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            language_hint: None,
            encoding: EncodingType::default(),
        }
    }

    pub fn with_language_hint(mut self, language: impl Into<String>) -> Self {
        self.language_hint = Some(language.into());
        self
    }

    pub fn with_encoding(mut self, encoding: EncodingType) -> Self {
        self.encoding = encoding;
        self
    }
}

/// 構文解析サービスのクライアント
///
/// 既定実装は [`crate::grpc_transport::GrpcLanguageClient`]。テストでは固定レスポンスを
/// 返すフェイクに差し替える。
#[async_trait]
pub trait LanguageClient: Send + Sync {
    async fn analyze_syntax(
        &self,
        request: SyntaxRequest,
    ) -> Result<AnalyzeSyntaxResponse, ServiceError>;

    /// ログ用の接続先表示
    fn endpoint(&self) -> &str;
}

/// 認証情報（取得・更新は行わない。渡されたものを送るだけ）
#[derive(Clone, PartialEq, Eq, Default)]
pub enum Credentials {
    #[default]
    None,
    ApiKey(String),
    AccessToken(String),
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // 秘密値はログに出さない
        match self {
            Credentials::None => write!(f, "None"),
            Credentials::ApiKey(_) => write!(f, "ApiKey(***)"),
            Credentials::AccessToken(_) => write!(f, "AccessToken(***)"),
        }
    }
}

/// 接続設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    pub endpoint: String,
    pub credentials: Credentials,
    pub quota_project: Option<String>,
    pub connect_timeout: Option<Duration>,
    pub request_timeout: Option<Duration>,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            credentials: Credentials::None,
            quota_project: None,
            connect_timeout: None,
            request_timeout: None,
        }
    }
}

impl ConnectionConfig {
    /// ローカルのエミュレータやテストサーバー向け（平文・認証なし）
    pub fn insecure(addr: &str) -> Self {
        Self {
            endpoint: normalize_endpoint(addr, "http"),
            ..Self::default()
        }
    }

    /// TLS を使うかどうか
    pub fn uses_tls(&self) -> bool {
        self.endpoint.starts_with("https://")
    }

    /// TLS のサーバー名（IPv6 リテラルは角括弧を外す）
    pub fn domain_name(&self) -> Option<String> {
        let uri = self.endpoint.parse::<Uri>().ok()?;
        let host = uri.host()?.trim_start_matches('[').trim_end_matches(']');
        if host.is_empty() {
            None
        } else {
            Some(host.to_string())
        }
    }
}

/// スキームが無ければ付与する
pub fn normalize_endpoint(addr: &str, default_scheme: &str) -> String {
    if addr.starts_with("http://") || addr.starts_with("https://") {
        addr.trim_end_matches('/').to_string()
    } else {
        format!("{default_scheme}://{}", addr.trim_end_matches('/'))
    }
}
