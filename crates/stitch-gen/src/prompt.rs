//! Model prompt construction

use stitch_schema::{pattern_schema, Mode, BRAND};

/// Build the instruction text sent alongside the photo
pub fn pattern_prompt(mode: Mode) -> String {
    let precision = match mode {
        Mode::Exact => "Be precise with stitch counts, assuming a standard gauge.",
        Mode::Instant => "Make educated guesses where the photo is unclear.",
    };
    let contract = serde_json::to_string(pattern_schema()).unwrap_or_default();

    format!(
        "You are an expert crochet designer. Analyze this photo and write a complete \
crochet pattern as a single JSON object.\n\
\n\
Rules:\n\
1. Only generate from photos of finished crochet pieces. Refuse screenshots of \
written instructions, charts or patterns.\n\
2. If the piece is not crochet, refuse.\n\
3. Mode: {mode}. {precision}\n\
4. Set \"brand\" to \"{BRAND}\" and \"mode\" to \"{mode}\".\n\
5. The object must match this field contract exactly:\n\
{contract}\n\
\n\
Analyze the structure, stitch type and likely construction method."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_follows_mode() {
        let exact = pattern_prompt(Mode::Exact);
        assert!(exact.contains("Mode: exact. Be precise"));
        assert!(exact.contains("\"mode\" to \"exact\""));

        let instant = pattern_prompt(Mode::Instant);
        assert!(instant.contains("Mode: instant. Make educated guesses"));
    }

    #[test]
    fn test_prompt_carries_contract() {
        let prompt = pattern_prompt(Mode::Instant);
        assert!(prompt.contains("\"stitch_count\""));
        assert!(prompt.contains(BRAND));
    }
}
