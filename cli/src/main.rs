use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tokio::io::AsyncReadExt;

use nlsyntax_cli::analyzer::analyze_request_to;
use nlsyntax_shared::{
    grpc_transport::GrpcLanguageClient, log_system, logging, AnalyzeError, Config, EncodingType,
    ServiceError, SyntaxRequest,
};

#[derive(Parser)]
#[command(name = "nlsyntax")]
#[command(version)]
#[command(about = "Show part of speech, tense, voice, lemma and dependency parse for each token")]
struct Cli {
    /// Text to analyze (reads --file or stdin when omitted)
    text: Option<String>,

    /// Read the text from a file
    #[arg(short, long, conflicts_with = "text")]
    file: Option<PathBuf>,

    /// Language hint such as "en" or "ja" (auto-detected when omitted)
    #[arg(short, long)]
    language: Option<String>,

    /// Offset encoding for LOCATION: none, utf8, utf16, utf32
    #[arg(long)]
    encoding: Option<EncodingType>,

    /// Print the result as JSON instead of the table
    #[arg(long)]
    json: bool,

    /// Do not print anything on success
    #[arg(short, long, conflicts_with = "json")]
    quiet: bool,

    /// Service endpoint (overrides config and NLSYNTAX_ENDPOINT)
    #[arg(long)]
    endpoint: Option<String>,

    /// Config file path (default: auto-detect)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print a sample config file and exit
    #[arg(long)]
    print_config: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let exit_code = match run(cli).await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("❌ {e:#}");
            exit_code_for(&e)
        }
    };

    std::process::exit(exit_code);
}

/// エラー種別ごとの終了コード
fn exit_code_for(error: &anyhow::Error) -> i32 {
    if let Some(analyze_error) = error.downcast_ref::<AnalyzeError>() {
        return match analyze_error {
            AnalyzeError::Service(_) => 3,
            AnalyzeError::Mapping(_) => 4,
            AnalyzeError::Output(_) | AnalyzeError::Config(_) => 1,
        };
    }
    if error.downcast_ref::<ServiceError>().is_some() {
        return 3;
    }
    1
}

async fn run(cli: Cli) -> Result<()> {
    if cli.print_config {
        let sample = toml_sample()?;
        print!("{sample}");
        return Ok(());
    }

    let mut config = Config::load(cli.config.as_deref())?;

    // コマンドライン引数が最優先
    if let Some(endpoint) = cli.endpoint {
        config.connection.endpoint = endpoint;
    }
    if let Some(language) = cli.language {
        config.request.language = Some(language);
    }
    if let Some(encoding) = cli.encoding {
        config.request.encoding = encoding;
    }
    if cli.verbose {
        config.logging.verbose = true;
    }

    logging::set_log_level(config.logging.effective_level());

    let text = read_input(cli.text, cli.file.as_deref()).await?;

    let connection = config.to_connection_config();
    log_system!(info, "Connecting to {}", connection.endpoint);
    let client = GrpcLanguageClient::connect(&connection).await?;

    let mut request = SyntaxRequest::new(text).with_encoding(config.request.encoding);
    if let Some(language) = config.request.language.clone() {
        request = request.with_language_hint(language);
    }

    let display_table = !cli.json && !cli.quiet;
    let result = analyze_request_to(request, display_table, Some(&client), &mut std::io::stdout())
        .await?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    }

    Ok(())
}

/// 引数 → ファイル → 標準入力 の順でテキストを取得
async fn read_input(text: Option<String>, file: Option<&std::path::Path>) -> Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }

    if let Some(path) = file {
        return tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read input file: {}", path.display()));
    }

    let mut buffer = String::new();
    tokio::io::stdin()
        .read_to_string(&mut buffer)
        .await
        .context("Failed to read text from stdin")?;
    Ok(buffer)
}

fn toml_sample() -> Result<String> {
    let mut content = String::from("# nlsyntax config (~/.nlsyntax/config.toml)\n");
    content.push_str(&Config::sample().to_toml()?);
    Ok(content)
}
