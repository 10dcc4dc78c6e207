use crate::error::MappingError;
use crate::grpc::{self, document, AnalyzeSyntaxRequest, AnalyzeSyntaxResponse, Document};
use crate::transport::{EncodingType, SyntaxRequest};
use crate::{AnalysisResult, DependencyLabel, SpeechTag, Tense, TokenRecord, Voice};

/// gRPC メッセージの変換ユーティリティ
pub mod grpc_conversion {
    use super::*;

    /// EncodingType を gRPC の i32 値に変換
    pub fn encoding_type_to_grpc(encoding: EncodingType) -> i32 {
        match encoding {
            EncodingType::None => grpc::EncodingType::None as i32,
            EncodingType::Utf8 => grpc::EncodingType::Utf8 as i32,
            EncodingType::Utf16 => grpc::EncodingType::Utf16 as i32,
            EncodingType::Utf32 => grpc::EncodingType::Utf32 as i32,
        }
    }

    /// SyntaxRequest を gRPC AnalyzeSyntaxRequest に変換
    pub fn to_grpc_request(request: &SyntaxRequest) -> AnalyzeSyntaxRequest {
        AnalyzeSyntaxRequest {
            document: Some(Document {
                r#type: document::Type::PlainText as i32,
                language: request.language_hint.clone().unwrap_or_default(),
                source: Some(document::Source::Content(request.content.clone())),
            }),
            encoding_type: encoding_type_to_grpc(request.encoding),
        }
    }

    fn decode<T>(
        code: i32,
        from_code: fn(i32) -> Option<T>,
        kind: &'static str,
        token_index: usize,
    ) -> Result<T, MappingError> {
        from_code(code).ok_or(MappingError::UnknownEnumValue {
            kind,
            value: code,
            token_index,
        })
    }

    /// gRPC Token を TokenRecord に変換
    ///
    /// 未設定のサブメッセージは protobuf の既定値（空文字列・0）として扱う。
    pub fn token_record_from_grpc(
        token: &grpc::Token,
        token_index: usize,
        token_count: usize,
    ) -> Result<TokenRecord, MappingError> {
        let text = token.text.clone().unwrap_or_default();
        let part_of_speech = token.part_of_speech.clone().unwrap_or_default();
        let edge = token.dependency_edge.clone().unwrap_or_default();

        let head = edge.head_token_index;
        let head_token_index = usize::try_from(head)
            .ok()
            .filter(|index| *index < token_count)
            .ok_or(MappingError::HeadIndexOutOfRange {
                token_index,
                head,
                token_count,
            })?;

        Ok(TokenRecord {
            text: text.content,
            location: text.begin_offset,
            speech_tag: decode(
                part_of_speech.tag,
                SpeechTag::from_code,
                SpeechTag::KIND,
                token_index,
            )?,
            voice: decode(part_of_speech.voice, Voice::from_code, Voice::KIND, token_index)?,
            tense: decode(part_of_speech.tense, Tense::from_code, Tense::KIND, token_index)?,
            lemma: token.lemma.clone(),
            head_token_index,
            label: decode(
                edge.label,
                DependencyLabel::from_code,
                DependencyLabel::KIND,
                token_index,
            )?,
        })
    }

    /// gRPC AnalyzeSyntaxResponse を AnalysisResult に変換（途中で失敗したら何も返さない）
    pub fn analysis_result_from_grpc(
        response: &AnalyzeSyntaxResponse,
    ) -> Result<AnalysisResult, MappingError> {
        let token_count = response.tokens.len();
        let tokens = response
            .tokens
            .iter()
            .enumerate()
            .map(|(index, token)| token_record_from_grpc(token, index, token_count))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(AnalysisResult {
            tokens,
            language: response.language.clone(),
        })
    }
}
