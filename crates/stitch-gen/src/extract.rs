//! Pulling the JSON payload out of model text
//!
//! Models asked for JSON still like to wrap it in markdown fences.

/// Remove ```json / ``` fences and surrounding whitespace
pub fn extract_json(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fenced_block() {
        let text = "```json\n{\"title\": \"Osito\"}\n```\n";
        assert_eq!(extract_json(text), "{\"title\": \"Osito\"}");
    }

    #[test]
    fn test_bare_fence() {
        assert_eq!(extract_json("```\n[1, 2]\n```"), "[1, 2]");
    }

    #[test]
    fn test_plain_json_untouched() {
        assert_eq!(extract_json("  {\"a\": 1} "), "{\"a\": 1}");
    }
}
