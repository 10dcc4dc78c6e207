use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::logging::LogLevel;
use crate::transport::{
    normalize_endpoint, ConnectionConfig, Credentials, EncodingType, DEFAULT_ENDPOINT,
};

/// メインの設定構造体
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// 接続設定
    #[serde(default)]
    pub connection: ConnectionSettings,

    /// リクエスト設定
    #[serde(default)]
    pub request: RequestSettings,

    /// ログ設定
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// 接続関連の設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionSettings {
    /// サービスのエンドポイント（https:// なら TLS）
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// API キー（x-goog-api-key）
    pub api_key: Option<String>,

    /// OAuth アクセストークン（Bearer）。api_key より優先
    pub access_token: Option<String>,

    /// 課金先プロジェクト（x-goog-user-project）
    pub quota_project: Option<String>,

    pub connect_timeout_secs: Option<u64>,

    pub request_timeout_secs: Option<u64>,
}

/// リクエスト関連の設定
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestSettings {
    #[serde(default)]
    pub encoding: EncodingType,

    /// 言語ヒント（未指定ならサービス側で自動判定）
    pub language: Option<String>,
}

/// ログ関連の設定
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// 詳細ログを有効にするか（level より優先して debug）
    #[serde(default)]
    pub verbose: bool,

    /// error / warn / info / debug / trace
    pub level: Option<String>,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key: None,
            access_token: None,
            quota_project: None,
            connect_timeout_secs: None,
            request_timeout_secs: None,
        }
    }
}

// デフォルト値関数
fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

impl LoggingSettings {
    /// 実際に使うログレベル
    pub fn effective_level(&self) -> LogLevel {
        if self.verbose {
            LogLevel::Debug
        } else {
            self.level
                .as_deref()
                .map(LogLevel::from)
                .unwrap_or(LogLevel::Warn)
        }
    }
}

impl Config {
    /// 設定ファイルから読み込み
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;

        Ok(config)
    }

    /// TOML文字列に変換
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config to TOML")
    }

    /// 設定ファイルに保存
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = self.to_toml()?;

        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        Ok(())
    }

    /// 設定ファイルパスの候補を取得（優先順位順）
    pub fn config_path_candidates() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. カレントディレクトリの .nlsyntax/config.toml
        if let Ok(current_dir) = std::env::current_dir() {
            paths.push(current_dir.join(".nlsyntax").join("config.toml"));
        }

        // 2. ホームディレクトリの .nlsyntax/config.toml
        if let Some(home_dir) = home::home_dir() {
            paths.push(home_dir.join(".nlsyntax").join("config.toml"));
        }

        // 3. XDG規格に従った設定ディレクトリ
        if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME") {
            paths.push(
                PathBuf::from(xdg_config_home)
                    .join("nlsyntax")
                    .join("config.toml"),
            );
        } else if let Some(home_dir) = home::home_dir() {
            paths.push(home_dir.join(".config").join("nlsyntax").join("config.toml"));
        }

        paths
    }

    /// 設定ファイルを自動検出して読み込み
    pub fn load_auto() -> Result<Option<(Self, PathBuf)>> {
        for path in Self::config_path_candidates() {
            if path.exists() {
                let config = Self::from_file(&path)?;
                return Ok(Some((config, path)));
            }
        }
        Ok(None)
    }

    /// 明示パス → 自動検出 → 既定値の順で読み込み、環境変数で上書き
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let mut config = match explicit_path {
            Some(path) => Self::from_file(path)?,
            None => match Self::load_auto()? {
                Some((config, path)) => {
                    crate::log_config!(debug, "Loaded config from {}", path.display());
                    config
                }
                None => Self::default(),
            },
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// 環境変数で設定を上書き
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// 変数の取得元を差し替え可能な上書き処理
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // 接続設定
        if let Some(endpoint) = lookup("NLSYNTAX_ENDPOINT") {
            self.connection.endpoint = endpoint;
        }

        if let Some(key) = lookup("NLSYNTAX_API_KEY").or_else(|| lookup("GOOGLE_API_KEY")) {
            self.connection.api_key = Some(key);
        }

        if let Some(token) =
            lookup("NLSYNTAX_ACCESS_TOKEN").or_else(|| lookup("GOOGLE_OAUTH_ACCESS_TOKEN"))
        {
            self.connection.access_token = Some(token);
        }

        if let Some(project) = lookup("NLSYNTAX_QUOTA_PROJECT") {
            self.connection.quota_project = Some(project);
        }

        // ログ設定
        if let Some(verbose) = lookup("NLSYNTAX_VERBOSE") {
            self.logging.verbose = verbose == "1" || verbose.to_lowercase() == "true";
        }

        if let Some(level) = lookup("NLSYNTAX_LOG_LEVEL") {
            self.logging.level = Some(level);
        }
    }

    /// 設定からConnectionConfigを生成
    pub fn to_connection_config(&self) -> ConnectionConfig {
        let settings = &self.connection;

        let credentials = match (&settings.access_token, &settings.api_key) {
            (Some(token), _) if !token.is_empty() => Credentials::AccessToken(token.clone()),
            (_, Some(key)) if !key.is_empty() => Credentials::ApiKey(key.clone()),
            _ => Credentials::None,
        };

        ConnectionConfig {
            endpoint: normalize_endpoint(&settings.endpoint, "https"),
            credentials,
            quota_project: settings.quota_project.clone(),
            connect_timeout: settings.connect_timeout_secs.map(Duration::from_secs),
            request_timeout: settings.request_timeout_secs.map(Duration::from_secs),
        }
    }

    /// 設定のサンプルを生成
    pub fn sample() -> Self {
        let mut config = Self::default();

        config.connection.api_key = Some("YOUR_API_KEY".to_string());
        config.connection.connect_timeout_secs = Some(10);
        config.connection.request_timeout_secs = Some(30);

        config.request.encoding = EncodingType::Utf8;
        config.request.language = Some("en".to_string());

        config.logging.level = Some("warn".to_string());

        config
    }
}
