use async_trait::async_trait;
use tonic::metadata::AsciiMetadataValue;
use tonic::service::interceptor::InterceptedService;
use tonic::service::Interceptor;
use tonic::transport::{Channel, ClientTlsConfig, Endpoint};
use tonic::{Request, Status};

use crate::{
    error::ServiceError,
    grpc::{language_service_client::LanguageServiceClient, AnalyzeSyntaxResponse},
    log_grpc, log_transport,
    message_conversion::grpc_conversion,
    transport::{ConnectionConfig, Credentials, LanguageClient, SyntaxRequest},
};

const API_KEY_HEADER: &str = "x-goog-api-key";
const AUTHORIZATION_HEADER: &str = "authorization";
const QUOTA_PROJECT_HEADER: &str = "x-goog-user-project";

/// 認証ヘッダーを全リクエストに付与するインターセプター
#[derive(Clone, Default)]
pub struct AuthInterceptor {
    headers: Vec<(&'static str, AsciiMetadataValue)>,
}

impl AuthInterceptor {
    pub fn new(config: &ConnectionConfig) -> Result<Self, ServiceError> {
        let mut headers = Vec::new();

        match &config.credentials {
            Credentials::None => {}
            Credentials::ApiKey(key) => {
                headers.push((API_KEY_HEADER, metadata_value(API_KEY_HEADER, key)?));
            }
            Credentials::AccessToken(token) => {
                let bearer = format!("Bearer {token}");
                headers.push((
                    AUTHORIZATION_HEADER,
                    metadata_value(AUTHORIZATION_HEADER, &bearer)?,
                ));
            }
        }

        if let Some(project) = &config.quota_project {
            headers.push((
                QUOTA_PROJECT_HEADER,
                metadata_value(QUOTA_PROJECT_HEADER, project)?,
            ));
        }

        Ok(Self { headers })
    }

    pub fn header_names(&self) -> Vec<&'static str> {
        self.headers.iter().map(|(name, _)| *name).collect()
    }
}

fn metadata_value(name: &str, value: &str) -> Result<AsciiMetadataValue, ServiceError> {
    value
        .parse::<AsciiMetadataValue>()
        .map_err(|_| ServiceError::Configuration(format!("Invalid characters in {name} value")))
}

impl Interceptor for AuthInterceptor {
    fn call(&mut self, mut request: Request<()>) -> Result<Request<()>, Status> {
        for (name, value) in &self.headers {
            request.metadata_mut().insert(*name, value.clone());
        }
        Ok(request)
    }
}

type InnerClient = LanguageServiceClient<InterceptedService<Channel, AuthInterceptor>>;

/// gRPC クライアント実装
#[derive(Clone)]
pub struct GrpcLanguageClient {
    client: InnerClient,
    endpoint: String,
}

impl GrpcLanguageClient {
    /// 接続を確立してクライアントを作成
    pub async fn connect(config: &ConnectionConfig) -> Result<Self, ServiceError> {
        let interceptor = AuthInterceptor::new(config)?;
        let channel = Self::build_endpoint(config)?.connect().await?;

        log_grpc!(
            debug,
            "Connected to {} (tls={}, auth headers={:?})",
            config.endpoint,
            config.uses_tls(),
            interceptor.header_names()
        );

        Ok(Self {
            client: LanguageServiceClient::with_interceptor(channel, interceptor),
            endpoint: config.endpoint.clone(),
        })
    }

    fn build_endpoint(config: &ConnectionConfig) -> Result<Endpoint, ServiceError> {
        let mut endpoint = Endpoint::from_shared(config.endpoint.clone())?;

        if let Some(timeout) = config.connect_timeout {
            endpoint = endpoint.connect_timeout(timeout);
        }
        if let Some(timeout) = config.request_timeout {
            endpoint = endpoint.timeout(timeout);
        }

        if config.uses_tls() {
            let mut tls = ClientTlsConfig::new();
            if let Some(domain) = config.domain_name() {
                log_transport!(debug, "TLS server name: {}", domain);
                tls = tls.domain_name(domain);
            }
            endpoint = endpoint.tls_config(tls)?;
        }

        log_transport!(
            trace,
            "Endpoint {} (connect_timeout={:?}, request_timeout={:?})",
            config.endpoint,
            config.connect_timeout,
            config.request_timeout
        );

        Ok(endpoint)
    }
}

#[async_trait]
impl LanguageClient for GrpcLanguageClient {
    async fn analyze_syntax(
        &self,
        request: SyntaxRequest,
    ) -> Result<AnalyzeSyntaxResponse, ServiceError> {
        let grpc_request = grpc_conversion::to_grpc_request(&request);

        log_grpc!(
            trace,
            "AnalyzeSyntax: {} bytes, encoding={:?}",
            request.content.len(),
            request.encoding
        );

        let mut client = self.client.clone();
        let response = client.analyze_syntax(grpc_request).await?;
        Ok(response.into_inner())
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}
