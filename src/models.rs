use serde::{Deserialize, Serialize};

// Substituted when upstream answers without any reply text
pub const NO_REPLY_FALLBACK: &str = "no reply content";

// Inbound /chat request format
#[derive(Deserialize, Serialize, Clone)]
pub struct ChatRequest {
    pub prompt: String,
}

// Outbound /chat response format
#[derive(Deserialize, Serialize, Clone)]
pub struct ChatReply {
    pub reply: String,
    pub remaining: u32,
}

// DashScope apps completion request format:
// { "input": { "prompt": ... }, "parameters": {}, "debug": {} }
#[derive(Serialize, Clone)]
pub struct CompletionRequest {
    pub input: CompletionInput,
    pub parameters: serde_json::Value,
    pub debug: serde_json::Value,
}

#[derive(Serialize, Clone)]
pub struct CompletionInput {
    pub prompt: String,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            input: CompletionInput {
                prompt: prompt.into(),
            },
            parameters: serde_json::json!({}),
            debug: serde_json::json!({}),
        }
    }
}

// DashScope apps completion response format. Both levels are optional;
// a missing text field is tolerated, not an error.
#[derive(Deserialize, Clone)]
pub struct CompletionResponse {
    #[serde(default)]
    pub output: Option<CompletionOutput>,
}

#[derive(Deserialize, Clone)]
pub struct CompletionOutput {
    #[serde(default)]
    pub text: Option<String>,
}

impl CompletionResponse {
    pub fn reply_text(self) -> String {
        self.output
            .and_then(|output| output.text)
            .unwrap_or_else(|| NO_REPLY_FALLBACK.to_string())
    }
}
