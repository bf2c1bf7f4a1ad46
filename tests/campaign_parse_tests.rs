use campaign_studio::ai::client::{error_campaign, extract_response_text, parse_campaign_json};
use campaign_studio::ai::prompt::{PERSONAS, SIGNATURE_PERSONA, build_campaign_prompt};
use campaign_studio::errors::StudioError;

#[test]
fn test_parse_full_campaign_reply() {
    // The shape the prompt contract asks for: three personas plus the
    // signature hybrid caption.
    let reply = r#"```json
[
    {"persona": "The Lagos Socialite", "post": "Owambe-ready, minus the effort."},
    {"persona": "The Tropical Traveller", "post": "Zanzibar called. The print answered."},
    {"persona": "The 'Soft Life' Advocate", "post": "Silk first. Everything else later."},
    {"persona": "Banke Kuku Signature", "post": "One print, a thousand stories. Worn with ease."}
]
```"#;

    let variants = parse_campaign_json(reply).unwrap();
    assert_eq!(variants.len(), 4);
    assert_eq!(variants[3].persona, SIGNATURE_PERSONA);
    assert!(variants.iter().all(|v| !v.post.is_empty()));
}

#[test]
fn test_parse_reply_without_fence() {
    let reply = r#"[{"persona": "The Notting Hill Expat", "post": "Pajamas to dinner."}]"#;
    let variants = parse_campaign_json(reply).unwrap();
    assert_eq!(variants.len(), 1);
}

#[test]
fn test_parse_reply_with_surrounding_prose() {
    let reply = "Sure! Here is your campaign:\n```json\n[{\"persona\": \"A\", \"post\": \"B\"}]\n```\nLet me know if you want more.";
    assert_eq!(parse_campaign_json(reply).unwrap().len(), 1);
}

#[test]
fn test_parse_rejects_non_json_reply() {
    let err = parse_campaign_json("I cannot write captions for this product.").unwrap_err();
    assert!(matches!(err, StudioError::GeminiError(_)));
}

#[test]
fn test_extract_text_from_generate_content_reply() {
    let response = serde_json::json!({
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [{ "text": "[{\"persona\":\"A\",\"post\":\"B\"}]" }]
            },
            "finishReason": "STOP"
        }],
        "modelVersion": "gemini-flash-latest"
    });

    let text = extract_response_text(&response).unwrap();
    let variants = parse_campaign_json(&text).unwrap();
    assert_eq!(variants[0].persona, "A");
}

#[test]
fn test_prompt_lists_all_personas() {
    let prompt = build_campaign_prompt("Amara Kimono", "Signature Delta print silk.");
    for (i, (name, tone)) in PERSONAS.iter().enumerate() {
        assert!(prompt.contains(&format!("{}. {name}", i + 1)));
        assert!(prompt.contains(tone));
    }
}

#[test]
fn test_error_campaign_carries_message() {
    let err = StudioError::HttpError("connection refused".to_string());
    let variants = error_campaign(&err);
    assert_eq!(variants.len(), 1);
    assert_eq!(variants[0].persona, "Error");
    assert!(variants[0].post.contains("connection refused"));
}
