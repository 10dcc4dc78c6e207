// Analyzer の統合テスト（フェイククライアント経由）

mod common;

use common::*;
use nlsyntax_cli::analyzer::{analyze_request_to, analyze_syntax, analyze_syntax_to};
use nlsyntax_cli::table;
use nlsyntax_shared::grpc::AnalyzeSyntaxResponse;
use nlsyntax_shared::{
    AnalyzeError, DependencyLabel, EncodingType, ServiceError, SpeechTag, SyntaxRequest, Tense,
    Voice,
};

#[tokio::test]
async fn test_pizza_example() {
    let client = CannedLanguageClient::new(create_pizza_response());
    let mut out = Vec::new();

    let result = analyze_syntax_to("I ate the pizza", false, Some(&client), &mut out)
        .await
        .unwrap();

    assert_eq!(result.language, "en");
    assert_eq!(result.len(), 4);

    let ate_index = result
        .tokens
        .iter()
        .position(|t| t.text == "ate")
        .expect("ate should be present");
    let ate = &result.tokens[ate_index];
    assert_eq!(ate.speech_tag, SpeechTag::Verb);
    assert_eq!(ate.tense, Tense::Past);
    assert_eq!(ate.voice, Voice::Active);
    assert_eq!(ate.lemma, "eat");
    assert_eq!(ate.speech_tag.name(), "VERB");
    assert_eq!(ate.tense.name(), "PAST");
    assert_eq!(ate.voice.name(), "ACTIVE");

    let subject = &result.tokens[0];
    assert_eq!(subject.text, "I");
    assert_eq!(subject.head_token_index, ate_index);
    assert_eq!(subject.label, DependencyLabel::Nsubj);

    let object = &result.tokens[3];
    assert_eq!(object.text, "pizza");
    assert_eq!(object.head_token_index, ate_index);
    assert_eq!(object.label, DependencyLabel::Dobj);

    // 表示しない場合は何も出力しない
    assert!(out.is_empty());
}

#[tokio::test]
async fn test_order_and_head_range() {
    let client = CannedLanguageClient::new(create_pizza_response());
    let result = analyze_syntax_to("I ate the pizza", false, Some(&client), &mut Vec::new())
        .await
        .unwrap();

    let texts: Vec<&str> = result.tokens.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, vec!["I", "ate", "the", "pizza"]);

    let locations: Vec<i32> = result.tokens.iter().map(|t| t.location).collect();
    assert_eq!(locations, vec![0, 2, 6, 10]);

    for token in &result.tokens {
        assert!(token.head_token_index < result.len());
    }
    let roots: Vec<usize> = result.roots().map(|(i, _)| i).collect();
    assert_eq!(roots, vec![1]);
}

#[tokio::test]
async fn test_display_table_output() {
    let client = CannedLanguageClient::new(create_pizza_response());
    let mut out = Vec::new();

    let result = analyze_syntax_to("I ate the pizza", true, Some(&client), &mut out)
        .await
        .unwrap();

    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    // ヘッダー + 4トークン + 言語行
    assert_eq!(lines.len(), 6);
    assert_eq!(lines[0], table::header_line());
    assert_eq!(
        lines[2],
        format!(
            "{:<15}{:<10}{:<15}{:<20}{:<20}{:<15}{:<20}{:<10}",
            "ate", 2, "VERB", "ACTIVE", "PAST", "eat", 1, "ROOT"
        )
    );
    assert_eq!(lines[5], "Language of the text: en");

    for (line, token) in lines[1..5].iter().zip(&result.tokens) {
        assert_eq!(*line, table::token_line(token));
    }
}

#[tokio::test]
async fn test_empty_response() {
    let client = CannedLanguageClient::new(AnalyzeSyntaxResponse {
        sentences: vec![],
        tokens: vec![],
        language: "und".to_string(),
    });
    let mut out = Vec::new();

    let result = analyze_syntax_to("", true, Some(&client), &mut out)
        .await
        .unwrap();

    assert!(result.is_empty());
    let text = String::from_utf8(out).unwrap();
    assert_eq!(text.lines().count(), 2);
    assert!(text.ends_with("Language of the text: und\n"));
}

#[tokio::test]
async fn test_service_error_propagates_without_output() {
    let client = FailingLanguageClient {
        code: tonic::Code::Unavailable,
        message: "connection reset",
    };
    let mut out = Vec::new();

    let err = analyze_syntax_to("I ate the pizza", true, Some(&client), &mut out)
        .await
        .unwrap_err();

    match err {
        AnalyzeError::Service(ServiceError::Status(status)) => {
            assert_eq!(status.code(), tonic::Code::Unavailable);
            assert_eq!(status.message(), "connection reset");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(out.is_empty());
}

#[tokio::test]
async fn test_unknown_enum_is_mapping_error() {
    let mut response = create_pizza_response();
    response.tokens[2] = create_test_token("the", 6, (TAG_DET, 0, 42), "the", (3, LABEL_DET));
    let client = CannedLanguageClient::new(response);
    let mut out = Vec::new();

    let err = analyze_syntax_to("I ate the pizza", true, Some(&client), &mut out)
        .await
        .unwrap_err();

    assert!(matches!(err, AnalyzeError::Mapping(_)));
    assert!(err.to_string().contains("voice"));
    assert!(out.is_empty());
}

#[tokio::test]
async fn test_request_options_are_forwarded() {
    let client = CannedLanguageClient::new(create_pizza_response());
    let request = SyntaxRequest::new("I ate the pizza")
        .with_language_hint("en")
        .with_encoding(EncodingType::Utf32);

    analyze_request_to(request.clone(), false, Some(&client), &mut Vec::new())
        .await
        .unwrap();

    assert_eq!(client.call_count(), 1);
    assert_eq!(client.requests.lock().unwrap()[0], request);
}

#[test]
fn test_mapping_is_deterministic() {
    let client = CannedLanguageClient::new(create_pizza_response());

    let first = tokio_test::block_on(analyze_syntax("I ate the pizza", false, Some(&client)))
        .unwrap();
    let second = tokio_test::block_on(analyze_syntax("I ate the pizza", false, Some(&client)))
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(client.call_count(), 2);
}
