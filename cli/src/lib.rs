pub mod analyzer;
pub mod table;

pub use analyzer::{analyze_request_to, analyze_syntax, analyze_syntax_to, connect_default_client};
