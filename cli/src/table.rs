use std::io::{self, Write};

use nlsyntax_shared::{AnalysisResult, TokenRecord};

/// 列幅（左寄せ、区切り文字なし）
pub const COLUMN_WIDTHS: [usize; 8] = [15, 10, 15, 20, 20, 15, 20, 10];

pub const HEADERS: [&str; 8] = [
    "TEXT",
    "LOCATION",
    "SPEECH TAG",
    "VOICE",
    "TENSE",
    "LEMMA",
    "HEAD TOKEN INDEX",
    "LABEL",
];

/// 固定幅の1行を組み立てる。幅を超える値は切り詰めない
fn format_row(cells: [String; 8]) -> String {
    cells
        .iter()
        .zip(COLUMN_WIDTHS)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect()
}

pub fn header_line() -> String {
    format_row(HEADERS.map(str::to_string))
}

pub fn token_line(token: &TokenRecord) -> String {
    format_row([
        token.text.clone(),
        token.location.to_string(),
        token.speech_tag.to_string(),
        token.voice.to_string(),
        token.tense.to_string(),
        token.lemma.clone(),
        token.head_token_index.to_string(),
        token.label.to_string(),
    ])
}

pub fn language_line(language: &str) -> String {
    format!("Language of the text: {language}")
}

/// ヘッダー・各トークン・言語の行を書き出す
pub fn write_table<W: Write>(out: &mut W, result: &AnalysisResult) -> io::Result<()> {
    writeln!(out, "{}", header_line())?;
    for token in &result.tokens {
        writeln!(out, "{}", token_line(token))?;
    }
    writeln!(out, "{}", language_line(&result.language))?;
    out.flush()
}
