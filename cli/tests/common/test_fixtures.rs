// テストフィクスチャとダミーデータ生成
// Note: 統合テスト用共通関数は複数の統合テストファイルから使用されるが、
// 各統合テストは独立してコンパイルされるため dead_code 警告を抑制。

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Server;
use tonic::{Request, Response, Status};

use nlsyntax_shared::grpc::language_service_server::{LanguageService, LanguageServiceServer};
use nlsyntax_shared::grpc::{
    AnalyzeSyntaxRequest, AnalyzeSyntaxResponse, DependencyEdge, PartOfSpeech, TextSpan, Token,
};
use nlsyntax_shared::{LanguageClient, ServiceError, SyntaxRequest};

// ワイヤ上のコード（proto の列挙値）
pub const TAG_DET: i32 = 5;
pub const TAG_NOUN: i32 = 6;
pub const TAG_PRON: i32 = 8;
pub const TAG_VERB: i32 = 11;
pub const TENSE_PAST: i32 = 3;
pub const VOICE_ACTIVE: i32 = 1;
pub const LABEL_DET: i32 = 16;
pub const LABEL_DOBJ: i32 = 18;
pub const LABEL_NSUBJ: i32 = 28;
pub const LABEL_ROOT: i32 = 54;

/// テスト用のトークンを作成
pub fn create_test_token(
    content: &str,
    offset: i32,
    (tag, tense, voice): (i32, i32, i32),
    lemma: &str,
    (head, label): (i32, i32),
) -> Token {
    Token {
        text: Some(TextSpan {
            content: content.to_string(),
            begin_offset: offset,
        }),
        part_of_speech: Some(PartOfSpeech { tag, tense, voice }),
        dependency_edge: Some(DependencyEdge {
            head_token_index: head,
            label,
        }),
        lemma: lemma.to_string(),
    }
}

/// "I ate the pizza" のレスポンス
pub fn create_pizza_response() -> AnalyzeSyntaxResponse {
    AnalyzeSyntaxResponse {
        sentences: vec![],
        tokens: vec![
            create_test_token("I", 0, (TAG_PRON, 0, 0), "I", (1, LABEL_NSUBJ)),
            create_test_token(
                "ate",
                2,
                (TAG_VERB, TENSE_PAST, VOICE_ACTIVE),
                "eat",
                (1, LABEL_ROOT),
            ),
            create_test_token("the", 6, (TAG_DET, 0, 0), "the", (3, LABEL_DET)),
            create_test_token("pizza", 10, (TAG_NOUN, 0, 0), "pizza", (1, LABEL_DOBJ)),
        ],
        language: "en".to_string(),
    }
}

/// 固定レスポンスを返すクライアント（受け取ったリクエストと呼び出し回数を記録）
#[derive(Clone)]
pub struct CannedLanguageClient {
    response: AnalyzeSyntaxResponse,
    pub requests: Arc<Mutex<Vec<SyntaxRequest>>>,
    pub calls: Arc<AtomicUsize>,
}

impl CannedLanguageClient {
    pub fn new(response: AnalyzeSyntaxResponse) -> Self {
        Self {
            response,
            requests: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LanguageClient for CannedLanguageClient {
    async fn analyze_syntax(
        &self,
        request: SyntaxRequest,
    ) -> Result<AnalyzeSyntaxResponse, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request);
        Ok(self.response.clone())
    }

    fn endpoint(&self) -> &str {
        "canned://test"
    }
}

/// 常に失敗するクライアント
pub struct FailingLanguageClient {
    pub code: tonic::Code,
    pub message: &'static str,
}

#[async_trait]
impl LanguageClient for FailingLanguageClient {
    async fn analyze_syntax(
        &self,
        _request: SyntaxRequest,
    ) -> Result<AnalyzeSyntaxResponse, ServiceError> {
        Err(ServiceError::Status(Status::new(self.code, self.message)))
    }

    fn endpoint(&self) -> &str {
        "failing://test"
    }
}

/// テスト用 gRPC サービス（固定レスポンスを返す）
#[derive(Clone)]
pub struct FakeLanguageService {
    pub response: AnalyzeSyntaxResponse,
    pub received: Arc<Mutex<Vec<AnalyzeSyntaxRequest>>>,
}

impl FakeLanguageService {
    pub fn new(response: AnalyzeSyntaxResponse) -> Self {
        Self {
            response,
            received: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[tonic::async_trait]
impl LanguageService for FakeLanguageService {
    async fn analyze_syntax(
        &self,
        request: Request<AnalyzeSyntaxRequest>,
    ) -> Result<Response<AnalyzeSyntaxResponse>, Status> {
        self.received.lock().unwrap().push(request.into_inner());
        Ok(Response::new(self.response.clone()))
    }
}

/// ローカルの空きポートで gRPC サーバーを起動し、アドレスを返す
pub async fn spawn_fake_server(service: FakeLanguageService) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        Server::builder()
            .add_service(LanguageServiceServer::new(service))
            .serve_with_incoming(TcpListenerStream::new(listener))
            .await
            .unwrap();
    });

    addr.to_string()
}
