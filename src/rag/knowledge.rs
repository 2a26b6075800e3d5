use std::collections::HashSet;

use once_cell::sync::Lazy;

use crate::config::Config;

/// Immutable corpus entry. Built once at startup, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeChunk {
    pub id: String,
    pub source: String,
    pub url: String,
    pub content: String,
    pub keywords: Vec<String>,
}

fn chunk(id: &str, source: &str, url: &str, content: &str, keywords: &[&str]) -> KnowledgeChunk {
    KnowledgeChunk {
        id: id.to_string(),
        source: source.to_string(),
        url: url.to_string(),
        content: content.to_string(),
        keywords: keywords.iter().map(|keyword| keyword.to_string()).collect(),
    }
}

static CORPUS: Lazy<Vec<KnowledgeChunk>> = Lazy::new(|| {
    vec![
        chunk(
            "kb-acne-overview",
            "Mayo Clinic",
            "https://www.mayoclinic.org/diseases-conditions/acne/symptoms-causes/syc-20368047",
            "Mụn trứng cá (acne) xảy ra khi nang lông bị bít tắc bởi dầu thừa và tế bào chết. \
             Biểu hiện gồm mụn đầu trắng, mụn đầu đen, sẩn viêm và mụn mủ, thường gặp ở trán, mũi, \
             má và cằm. Thay đổi nội tiết tố ở tuổi dậy thì là yếu tố thúc đẩy chính.",
            &["mụn", "mụn trứng cá", "acne", "mụn đầu trắng", "nang lông", "dậy thì"],
        ),
        chunk(
            "kb-blackheads",
            "American Academy of Dermatology",
            "https://www.aad.org/public/diseases/acne/types/blackheads",
            "Mụn đầu đen (blackheads) là lỗ chân lông hở bị bít bởi dầu và tế bào chết; phần bề mặt \
             oxy hóa nên chuyển màu đen. Sản phẩm chứa salicylic acid giúp làm sạch sâu lỗ chân lông; \
             không nên tự nặn vì dễ gây viêm và thâm.",
            &["mụn đầu đen", "blackhead", "blackheads", "lỗ chân lông", "salicylic"],
        ),
        chunk(
            "kb-inflammatory-acne",
            "American Academy of Dermatology",
            "https://www.aad.org/public/diseases/acne/derm-treat/treat",
            "Mụn viêm (sẩn đỏ, mụn mủ, nang) cần được xử lý sớm để tránh sẹo. Benzoyl peroxide nồng độ \
             thấp giúp giảm vi khuẩn C. acnes; retinoid bôi ngoài hỗ trợ thông thoáng nang lông. Mụn \
             nang hoặc mụn lan rộng nên được bác sĩ da liễu kê đơn điều trị.",
            &["mụn viêm", "mụn mủ", "mụn nang", "benzoyl peroxide", "retinoid", "sẹo mụn"],
        ),
        chunk(
            "kb-oily-skin",
            "Vinmec International Hospital",
            "https://www.vinmec.com/vie/bai-viet/cach-cham-soc-da-dau-dung-cach",
            "Da dầu tiết nhiều bã nhờn, bề mặt bóng và lỗ chân lông to, dễ nổi mụn. Nên rửa mặt tối đa \
             hai lần mỗi ngày bằng sữa rửa mặt dịu nhẹ, ưu tiên sản phẩm không gây bít tắc lỗ chân lông \
             (non-comedogenic) và vẫn cần dưỡng ẩm dạng gel.",
            &["da dầu", "oily", "bã nhờn", "lỗ chân lông to", "non-comedogenic"],
        ),
        chunk(
            "kb-dry-skin",
            "MedlinePlus",
            "https://medlineplus.gov/ency/article/003250.htm",
            "Da khô thường căng, bong tróc và dễ kích ứng, nặng hơn khi thời tiết hanh hoặc tắm nước \
             nóng lâu. Dưỡng ẩm ngay sau khi rửa mặt, chọn sản phẩm không hương liệu và tránh tẩy rửa \
             mạnh giúp phục hồi hàng rào bảo vệ da.",
            &["da khô", "dry skin", "bong tróc", "dưỡng ẩm", "hàng rào bảo vệ da"],
        ),
        chunk(
            "kb-sensitive-rosacea",
            "NHS",
            "https://www.nhs.uk/conditions/rosacea/",
            "Da nhạy cảm dễ đỏ, châm chích khi gặp mỹ phẩm có cồn hoặc hương liệu. Chứng đỏ mặt kéo dài \
             kèm mạch máu nổi có thể là rosacea, một bệnh da mạn tính cần bác sĩ chẩn đoán; nắng, đồ cay \
             và rượu là các yếu tố kích hoạt thường gặp.",
            &["da nhạy cảm", "sensitive", "rosacea", "đỏ mặt", "châm chích", "kích ứng"],
        ),
        chunk(
            "kb-hyperpigmentation",
            "American Academy of Dermatology",
            "https://www.aad.org/public/diseases/a-z/dark-spots-causes",
            "Vết thâm sau mụn (tăng sắc tố sau viêm) là phản ứng của da sau tổn thương, thường tự mờ \
             trong vài tháng. Chống nắng đều đặn, vitamin C và niacinamide giúp vết thâm mờ nhanh hơn; \
             nốt sẫm màu thay đổi hình dạng cần được bác sĩ kiểm tra.",
            &["vết thâm", "thâm mụn", "tăng sắc tố", "dark spots", "niacinamide", "sạm da"],
        ),
        chunk(
            "kb-sunscreen",
            "World Health Organization",
            "https://www.who.int/news-room/questions-and-answers/item/radiation-sun-protection",
            "Tia UV làm tổn thương da ngay cả khi trời râm. Kem chống nắng phổ rộng SPF 30 trở lên, thoa \
             lại mỗi 2 giờ khi ở ngoài trời, kết hợp mũ và bóng râm, là biện pháp nền tảng cho mọi loại \
             da, kể cả da đang điều trị mụn.",
            &["chống nắng", "kem chống nắng", "sunscreen", "spf", "tia uv"],
        ),
        chunk(
            "kb-eczema",
            "National Hospital of Dermatology and Venereology",
            "https://benhviendalieutw.vn/chuyen-de/viem-da-co-dia",
            "Viêm da cơ địa (eczema) gây mảng da khô, đỏ, ngứa, hay gặp ở mặt và nếp gấp. Bệnh tiến \
             triển từng đợt; dưỡng ẩm dày và đều đặn là nền tảng, còn thuốc chống viêm bôi ngoài phải \
             dùng theo chỉ định của bác sĩ da liễu.",
            &["viêm da cơ địa", "eczema", "chàm", "ngứa", "mảng đỏ"],
        ),
        chunk(
            "kb-skincare-routine",
            "American Academy of Dermatology",
            "https://www.aad.org/public/everyday-care/skin-care-basics/care/skin-care-routine",
            "Một chu trình chăm sóc da cơ bản gồm: làm sạch dịu nhẹ, dưỡng ẩm phù hợp loại da và chống \
             nắng buổi sáng. Hoạt chất mạnh như retinoid hoặc AHA/BHA nên thêm vào từ từ, mỗi lần một \
             sản phẩm, để da kịp thích nghi và dễ xác định nguyên nhân nếu kích ứng.",
            &["chu trình", "routine", "skincare", "chăm sóc da", "aha", "bha", "làm sạch"],
        ),
    ]
});

const KEYWORD_HIT_SCORE: i32 = 4;
const CONTENT_TOKEN_SCORE: i32 = 1;
const MIN_RELEVANCE_SCORE: i32 = 3;
const DEFAULT_TOP_K: usize = 3;

fn tokenize(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .map(str::trim)
        .filter(|token| token.chars().count() >= 2)
        .map(str::to_string)
        .collect()
}

fn relevance_score(query_lower: &str, query_tokens: &HashSet<String>, chunk: &KnowledgeChunk) -> i32 {
    let mut score = 0;

    for keyword in &chunk.keywords {
        let keyword = keyword.trim().to_lowercase();
        if !keyword.is_empty() && query_lower.contains(&keyword) {
            score += KEYWORD_HIT_SCORE;
        }
    }

    let content_lower = chunk.content.to_lowercase();
    for token in query_tokens {
        if content_lower.contains(token.as_str()) {
            score += CONTENT_TOKEN_SCORE;
        }
    }

    score
}

/// Read-only view over the static dermatology corpus. Retrieval is a pure
/// lexical heuristic; the corpus is small enough that embeddings would be
/// overkill, and the interface stays stable if scoring is swapped later.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    chunks: Vec<KnowledgeChunk>,
    top_k: usize,
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        KnowledgeBase {
            chunks: CORPUS.clone(),
            top_k: DEFAULT_TOP_K,
        }
    }
}

impl KnowledgeBase {
    pub fn from_config(config: &Config) -> Self {
        Self::with_top_k(config.rag_top_k)
    }

    pub fn with_top_k(top_k: usize) -> Self {
        KnowledgeBase {
            chunks: CORPUS.clone(),
            top_k: top_k.max(1),
        }
    }

    #[cfg(test)]
    pub fn from_chunks(chunks: Vec<KnowledgeChunk>, top_k: usize) -> Self {
        KnowledgeBase {
            chunks,
            top_k: top_k.max(1),
        }
    }

    /// Top-K chunks by lexical relevance, most relevant first. Ties keep
    /// corpus order. An empty result is a valid outcome, never an error.
    pub fn find_relevant_chunks(&self, query: &str) -> Vec<KnowledgeChunk> {
        let query_lower = query.to_lowercase();
        let query_tokens = tokenize(query);
        if query_tokens.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<(i32, usize)> = self
            .chunks
            .iter()
            .enumerate()
            .map(|(index, chunk)| (relevance_score(&query_lower, &query_tokens, chunk), index))
            .filter(|(score, _)| *score >= MIN_RELEVANCE_SCORE)
            .collect();

        scored.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));

        scored
            .into_iter()
            .take(self.top_k)
            .map(|(_, index)| self.chunks[index].clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn irrelevant_query_returns_empty_not_error() {
        let kb = KnowledgeBase::default();
        assert!(kb.find_relevant_chunks("lịch chiếu phim cuối tuần").is_empty());
        assert!(kb.find_relevant_chunks("").is_empty());
        assert!(kb.find_relevant_chunks("   !!! ").is_empty());
    }

    #[test]
    fn acne_question_ranks_acne_chunks_first() {
        let kb = KnowledgeBase::default();
        let hits = kb.find_relevant_chunks("Mụn trứng cá ở tuổi dậy thì có tự hết không?");
        assert!(!hits.is_empty());
        assert_eq!(hits[0].id, "kb-acne-overview");
        assert!(hits.len() <= 3);
    }

    #[test]
    fn english_keywords_also_match() {
        let kb = KnowledgeBase::default();
        let hits = kb.find_relevant_chunks("how do I treat blackheads on my nose");
        assert!(hits.iter().any(|chunk| chunk.id == "kb-blackheads"));
    }

    #[test]
    fn results_never_contain_duplicate_ids() {
        let kb = KnowledgeBase::default();
        let hits = kb.find_relevant_chunks("mụn viêm, mụn đầu đen và vết thâm trên má");
        let mut ids: Vec<&str> = hits.iter().map(|chunk| chunk.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), hits.len());
    }

    #[test]
    fn ties_keep_corpus_order() {
        let a = chunk("a", "S", "https://a", "nội dung chung", &["kem chống nắng"]);
        let b = chunk("b", "S", "https://b", "nội dung chung", &["kem chống nắng"]);
        let kb = KnowledgeBase::from_chunks(vec![a, b], 3);
        let hits = kb.find_relevant_chunks("nên chọn kem chống nắng nào?");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].id, "a");
        assert_eq!(hits[1].id, "b");
    }

    #[test]
    fn top_k_caps_result_length() {
        let kb = KnowledgeBase::with_top_k(1);
        let hits = kb.find_relevant_chunks("da dầu nhiều mụn viêm và mụn đầu đen");
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn from_config_honors_configured_top_k() {
        let config = Config {
            log_level: "info".to_string(),
            gemini_api_key: "test-key".to_string(),
            gemini_model: "gemini-2.5-pro".to_string(),
            gemini_flash_model: "gemini-2.5-flash".to_string(),
            gemini_temperature: 0.4,
            gemini_top_k: 40,
            gemini_top_p: 0.95,
            gemini_max_output_tokens: 8192,
            gemini_request_timeout_secs: 150,
            report_webhook_url: "https://example.com/hook".to_string(),
            rag_top_k: 2,
            default_confidence_threshold: 70,
        };
        let kb = KnowledgeBase::from_config(&config);
        let hits = kb.find_relevant_chunks("da dầu nhiều mụn viêm và mụn đầu đen");
        assert!(hits.len() <= 2);
    }
}
