use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use once_cell::sync::Lazy;
use regex::Regex;

static DATA_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^data:(image/[a-z0-9.+-]+);base64,(.+)$").expect("valid data url regex")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub base64: String,
    pub mime_type: String,
}

/// Accepts either a `data:image/<fmt>;base64,...` URL or raw base64.
/// Raw input is assumed to be JPEG, matching what the mobile client sends
/// when it skips the prefix.
pub fn parse_base64_image(image_data: &str) -> ImagePayload {
    let trimmed = image_data.trim();
    if let Some(captures) = DATA_URL_RE.captures(trimmed) {
        return ImagePayload {
            mime_type: captures[1].to_string(),
            base64: captures[2].to_string(),
        };
    }

    ImagePayload {
        base64: trimmed.to_string(),
        mime_type: "image/jpeg".to_string(),
    }
}

/// Cheap sanity check before a payload is shipped to the model; catches
/// plain text or truncated uploads masquerading as image data.
pub fn is_plausible_base64(data: &str) -> bool {
    !data.is_empty() && BASE64.decode(data).is_ok()
}

/// Strips a Markdown code fence if the model wrapped its output in one,
/// e.g. ```svg ... ``` around heatmap markup.
pub fn strip_code_fence(text: &str) -> String {
    let trimmed = text.trim();
    if !trimmed.starts_with("```") {
        return trimmed.to_string();
    }

    let without_open = match trimmed.find('\n') {
        Some(index) => &trimmed[index + 1..],
        None => return trimmed.to_string(),
    };
    let without_close = without_open
        .strip_suffix("```")
        .unwrap_or(without_open);
    without_close.trim().to_string()
}
