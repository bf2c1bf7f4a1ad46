//! Campaign prompt construction.
//!
//! The brand voice and persona list are fixed; the scraped product text is
//! sanitized before it is interpolated into the prompt.

/// Max length for scraped text interpolated into the prompt (after which we
/// hard-truncate).
pub const MAX_FRAGMENT_LEN: usize = 4000;

/// The customer personas captions are written for. The model picks the top
/// three and adds a unified "Signature" caption.
pub const PERSONAS: [(&str, &str); 4] = [
    (
        "The Lagos Socialite",
        "'Owambe ready', but make it comfortable. Life of the party.",
    ),
    (
        "The Notting Hill Expat",
        "Global cool, wears pajamas to dinner, effortless wealth.",
    ),
    (
        "The Tropical Traveller",
        "Ibiza, Zanzibar, sipping cocktails, vibrant life.",
    ),
    (
        "The 'Soft Life' Advocate",
        "Rejects stress, embraces silk and ease.",
    ),
];

/// Persona label for the unified hybrid caption the model appends.
pub const SIGNATURE_PERSONA: &str = "Banke Kuku Signature";

/// Remove control characters and hard-truncate scraped text before it goes
/// into the prompt.
#[must_use]
pub fn sanitize_fragment(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_control() || *c == '\n')
        .take(MAX_FRAGMENT_LEN)
        .collect()
}

/// Build the full campaign prompt for one product.
#[must_use]
pub fn build_campaign_prompt(product_name: &str, description: &str) -> String {
    let product_name = sanitize_fragment(product_name);
    let description = sanitize_fragment(description);

    let persona_list = PERSONAS
        .iter()
        .enumerate()
        .map(|(i, (name, tone))| format!("{}. {} (Tone: {})", i + 1, name, tone))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Role: Head of Digital Content for 'Banke Kuku'.\n\
         Brand Voice: \"Occasion Loungewear.\" Vibrant, Effortless, Lagos-to-London, Statement Prints.\n\
         Product: {product_name}\n\
         Specs: {description}\n\
         \n\
         TASK:\n\
         1. Select TOP 3 Personas from the list.\n\
         2. Write 3 Captions.\n\
         3. Write 1 \"Hybrid Vibe Caption\".\n\
         \n\
         PERSONAS:\n\
         {persona_list}\n\
         \n\
         CRITICAL INSTRUCTIONS:\n\
         - FOCUS ON THE PRINT: Banke Kuku is about the print. Mention 'vibrancy', 'story', 'pattern'.\n\
         - KEYWORD: 'Ease'. It must sound comfortable but expensive.\n\
         - NO 'WORK' TALK: This woman is not working. She is living.\n\
         \n\
         Output JSON ONLY:\n\
         [\n\
             {{\"persona\": \"Persona Name\", \"post\": \"Caption text...\"}},\n\
             ...\n\
             {{\"persona\": \"{SIGNATURE_PERSONA}\", \"post\": \"The unified caption text...\"}}\n\
         ]"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_contains_product_and_personas() {
        let prompt = build_campaign_prompt("Amara Kimono", "Bold silk print.");
        assert!(prompt.contains("Product: Amara Kimono"));
        assert!(prompt.contains("Specs: Bold silk print."));
        for (name, _) in PERSONAS {
            assert!(prompt.contains(name), "missing persona {name}");
        }
        assert!(prompt.contains(SIGNATURE_PERSONA));
        assert!(prompt.contains("Output JSON ONLY"));
    }

    #[test]
    fn test_sanitize_fragment_strips_control_chars() {
        let input = "Silk \u{0000}kimono\u{007F} line\nnext";
        let out = sanitize_fragment(input);
        assert_eq!(out, "Silk kimono line\nnext");
    }

    #[test]
    fn test_sanitize_fragment_truncates() {
        let long = "a".repeat(MAX_FRAGMENT_LEN + 500);
        assert_eq!(sanitize_fragment(&long).len(), MAX_FRAGMENT_LEN);
    }
}
