use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RagSource {
    pub source_name: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RagResult {
    pub answer: String,
    pub sources: Vec<RagSource>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatImage {
    pub base64: String,
    pub mime_type: String,
}

/// One turn of the chatbot conversation. History is accepted by the chat
/// service for interface stability but not yet fed back into retrieval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ChatImage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<RagSource>>,
}

impl ChatMessage {
    pub fn model_text(text: impl Into<String>) -> Self {
        ChatMessage {
            role: ChatRole::Model,
            text: text.into(),
            image: None,
            sources: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_serialize_lowercase() {
        assert_eq!(serde_json::to_string(&ChatRole::Model).unwrap(), "\"model\"");
        let parsed: ChatRole = serde_json::from_str("\"user\"").unwrap();
        assert_eq!(parsed, ChatRole::User);
    }

    #[test]
    fn sources_use_camel_case_on_the_wire() {
        let source = RagSource {
            source_name: "Mayo Clinic".to_string(),
            url: "https://www.mayoclinic.org/acne".to_string(),
        };
        let json = serde_json::to_value(&source).unwrap();
        assert!(json.get("sourceName").is_some());
    }
}
