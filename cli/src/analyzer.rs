use std::io::{self, Write};
use std::path::Path;

use nlsyntax_shared::{
    grpc_transport::GrpcLanguageClient, log_analysis, log_display,
    message_conversion::grpc_conversion, AnalysisResult, AnalyzeError, Config, LanguageClient,
    SyntaxRequest,
};

use crate::table;

/// テキストの構文解析を行い、必要なら表を標準出力に表示する
///
/// `client` が `None` の場合は環境（設定ファイル・環境変数）から既定の gRPC
/// クライアントを作る。
pub async fn analyze_syntax(
    text: &str,
    display_table: bool,
    client: Option<&dyn LanguageClient>,
) -> Result<AnalysisResult, AnalyzeError> {
    analyze_syntax_to(text, display_table, client, &mut io::stdout()).await
}

/// [`analyze_syntax`] の出力先指定版
pub async fn analyze_syntax_to<W: Write>(
    text: &str,
    display_table: bool,
    client: Option<&dyn LanguageClient>,
    out: &mut W,
) -> Result<AnalysisResult, AnalyzeError> {
    analyze_request_to(SyntaxRequest::new(text), display_table, client, out).await
}

/// 言語ヒントやエンコーディングを指定したリクエストで解析する
pub async fn analyze_request_to<W: Write>(
    request: SyntaxRequest,
    display_table: bool,
    client: Option<&dyn LanguageClient>,
    out: &mut W,
) -> Result<AnalysisResult, AnalyzeError> {
    let default_client;
    let client: &dyn LanguageClient = match client {
        Some(client) => client,
        None => {
            default_client = connect_default_client(None).await?;
            &default_client
        }
    };

    log_analysis!(
        debug,
        "Sending {} bytes to {}",
        request.content.len(),
        client.endpoint()
    );

    let response = client.analyze_syntax(request).await?;

    // 全トークンの変換が成功してから表示する（部分的な出力はしない）
    let result = grpc_conversion::analysis_result_from_grpc(&response)?;

    log_analysis!(
        debug,
        "Received {} tokens (language: {})",
        result.len(),
        result.language
    );

    if display_table {
        log_display!(debug, "Writing {} table rows", result.len());
        table::write_table(out, &result)?;
    }

    Ok(result)
}

/// 設定と環境変数から既定クライアントを作成
pub async fn connect_default_client(
    config_path: Option<&Path>,
) -> Result<GrpcLanguageClient, AnalyzeError> {
    let config = Config::load(config_path).map_err(AnalyzeError::Config)?;

    Ok(GrpcLanguageClient::connect(&config.to_connection_config()).await?)
}
