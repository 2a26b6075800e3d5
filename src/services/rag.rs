use tracing::{info, warn};

use crate::config::Config;
use crate::error::DermaError;
use crate::llm::{GenerateRequest, ModelClient, Part};
use crate::prompts::rag::{
    chatbot_context, chatbot_prompt, condition_info_question, rag_answer_prompt,
    CHATBOT_SYSTEM_INSTRUCTION,
};
use crate::rag::{KnowledgeBase, KnowledgeChunk};
use crate::schemas::RAG_RESPONSE_SCHEMA;
use crate::services::{generation_error, parse_structured};
use crate::types::rag::{ChatImage, ChatMessage, ChatRole, RagResult, RagSource};

const RAG_ERROR_VI: &str = "Không thể tạo câu trả lời. Vui lòng thử lại.";

/// Returned without any model call when retrieval comes back empty.
const NO_CONTEXT_ANSWER_VI: &str = "Rất tiếc, tôi không tìm thấy thông tin đáng tin cậy nào \
     liên quan đến câu hỏi của bạn trong cơ sở kiến thức của mình. Vui lòng thử một câu hỏi \
     khác hoặc tham khảo ý kiến bác sĩ da liễu.";

const CHATBOT_FALLBACK_VI: &str = "Ui, tui bị lag xíu rùi 🥺. Bồ thử lại sau nha!";

/// Keeps only sources that point back at a retrieved chunk. The model is
/// told to cite from context only; this makes that rule hold regardless.
fn retain_known_sources(sources: Vec<RagSource>, chunks: &[KnowledgeChunk]) -> Vec<RagSource> {
    let before = sources.len();
    let kept: Vec<RagSource> = sources
        .into_iter()
        .filter(|source| {
            chunks.iter().any(|chunk| {
                chunk.url == source.url || chunk.source.eq_ignore_ascii_case(&source.source_name)
            })
        })
        .collect();
    if kept.len() < before {
        warn!(
            "Dropped {} cited source(s) not present in the retrieved context",
            before - kept.len()
        );
    }
    kept
}

/// Answers a question strictly from the knowledge corpus. An empty
/// retrieval short-circuits to a canned answer; the model is never asked
/// to answer from nothing.
pub async fn get_grounded_answer(
    client: &dyn ModelClient,
    config: &Config,
    kb: &KnowledgeBase,
    question: &str,
) -> Result<RagResult, DermaError> {
    let chunks = kb.find_relevant_chunks(question);
    if chunks.is_empty() {
        info!("No relevant chunks for question, returning canned answer");
        return Ok(RagResult {
            answer: NO_CONTEXT_ANSWER_VI.to_string(),
            sources: Vec::new(),
        });
    }

    let request = GenerateRequest::new(
        &config.gemini_model,
        vec![Part::text(rag_answer_prompt(question, &chunks))],
    )
    .with_schema(&RAG_RESPONSE_SCHEMA)
    .with_operation("get_grounded_answer");

    let raw = client
        .generate_content(request)
        .await
        .map_err(|err| generation_error(RAG_ERROR_VI, err))?;

    let mut result: RagResult = parse_structured(&raw, RAG_ERROR_VI)?;
    result.sources = retain_known_sources(result.sources, &chunks);
    Ok(result)
}

/// Short expert overview of one condition name, grounded the same way as a
/// free-form question.
pub async fn get_expert_info_for_condition(
    client: &dyn ModelClient,
    config: &Config,
    kb: &KnowledgeBase,
    condition: &str,
) -> Result<RagResult, DermaError> {
    get_grounded_answer(client, config, kb, &condition_info_question(condition)).await
}

fn history_transcript(history: &[ChatMessage]) -> String {
    let recent: Vec<&ChatMessage> = history.iter().rev().take(6).collect();
    recent
        .into_iter()
        .rev()
        .map(|message| {
            let who = match message.role {
                ChatRole::User => "Bạn thân",
                ChatRole::Model => "AI Daily",
            };
            format!("{who}: {}", message.text)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Friendly chatbot turn. This path never surfaces an error: any failure
/// is logged and replaced with a canned apology, because a broken chat
/// bubble is worse than a sheepish one.
pub async fn get_chatbot_response(
    client: &dyn ModelClient,
    config: &Config,
    kb: &KnowledgeBase,
    question: &str,
    image: Option<&ChatImage>,
    history: &[ChatMessage],
) -> ChatMessage {
    let chunks = kb.find_relevant_chunks(question);
    let context = chatbot_context(&chunks);

    let mut user_text = String::new();
    let transcript = history_transcript(history);
    if !transcript.is_empty() {
        user_text.push_str("[LỊCH SỬ TRÒ CHUYỆN GẦN ĐÂY]:\n");
        user_text.push_str(&transcript);
        user_text.push_str("\n---\n");
    }
    user_text.push_str(&chatbot_prompt(question, &context));

    let mut parts = vec![Part::text(user_text)];
    if let Some(image) = image {
        parts.push(Part::inline_data(
            image.mime_type.clone(),
            image.base64.clone(),
        ));
    }

    let request = GenerateRequest::new(&config.gemini_flash_model, parts)
        .with_schema(&RAG_RESPONSE_SCHEMA)
        .with_system_instruction(CHATBOT_SYSTEM_INSTRUCTION)
        .with_operation("get_chatbot_response");

    let parsed: Result<RagResult, DermaError> = match client.generate_content(request).await {
        Ok(raw) => parse_structured(&raw, RAG_ERROR_VI),
        Err(err) => Err(generation_error(RAG_ERROR_VI, err)),
    };

    match parsed {
        Ok(mut result) => {
            result.sources = retain_known_sources(result.sources, &chunks);
            ChatMessage {
                role: ChatRole::Model,
                text: result.answer,
                image: None,
                sources: Some(result.sources),
            }
        }
        Err(err) => {
            warn!(
                "Chatbot turn failed, using fallback reply: {}",
                err.detail()
            );
            ChatMessage::model_text(CHATBOT_FALLBACK_VI)
        }
    }
}
