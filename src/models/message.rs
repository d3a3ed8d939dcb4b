use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize, Debug, Default)]
pub struct MessageUsage {
    pub input_tokens: Option<u64>,
    pub cache_creation_input_tokens: Option<u64>,
    pub cache_read_input_tokens: Option<u64>,
}

impl MessageUsage {
    /// Tokens occupying the context window for this turn
    pub fn context_tokens(&self) -> u64 {
        self.input_tokens
            .unwrap_or(0)
            .saturating_add(self.cache_read_input_tokens.unwrap_or(0))
            .saturating_add(self.cache_creation_input_tokens.unwrap_or(0))
    }
}

#[derive(Deserialize, Debug)]
pub struct MessageObj {
    pub usage: Option<MessageUsage>,
}

/// One JSONL record of the session transcript. Only the fields the scanner
/// looks at are modelled; `content` stays loose because its shape varies by
/// record type.
#[derive(Deserialize, Debug)]
pub struct TranscriptLine {
    pub r#type: Option<String>,
    pub message: Option<MessageObj>,
    pub content: Option<Value>,
}
