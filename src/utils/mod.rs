pub mod http;
pub mod image;
pub mod logging;
pub mod timing;

/// Truncates noisy text (model output, error bodies) for log lines.
pub fn truncate_for_log(value: &str, limit: usize) -> String {
    if value.chars().count() <= limit {
        return value.to_string();
    }
    let truncated: String = value.chars().take(limit).collect();
    format!("{truncated}... (truncated)")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_is_char_safe() {
        assert_eq!(truncate_for_log("ngắn", 10), "ngắn");
        let long = "mụn trứng cá ".repeat(40);
        let cut = truncate_for_log(&long, 20);
        assert!(cut.ends_with("... (truncated)"));
        assert_eq!(cut.chars().count(), 20 + "... (truncated)".chars().count());
    }
}
