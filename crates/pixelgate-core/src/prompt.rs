//! Prompt Composition
//!
//! User prompts are scrubbed of trademarked names and wrapped in a fixed
//! pixel-art template before they reach the image API.

use std::sync::LazyLock;

use regex::Regex;

/// Trademarked terms and their neutral replacements, applied in order
const DENYLIST: &[(&str, &str)] = &[
    ("minecraft", "pixel fantasy"),
    ("pokémon", "fantasy creature"),
    ("pokemon", "fantasy creature"),
    ("mario", "plumber hero"),
    ("zelda", "elf princess"),
    ("fortnite", "battle royale"),
    ("roblox", "blocky toy"),
];

static PATTERNS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    DENYLIST
        .iter()
        .filter_map(|(term, replacement)| {
            Regex::new(&format!(r"(?i)\b{}\b", regex::escape(term)))
                .ok()
                .map(|re| (re, *replacement))
        })
        .collect()
});

/// Replace denylisted terms (case-insensitive) with neutral phrases
pub fn sanitize_prompt(prompt: &str) -> String {
    PATTERNS
        .iter()
        .fold(prompt.to_string(), |acc, (re, replacement)| {
            re.replace_all(&acc, *replacement).into_owned()
        })
}

/// Sanitize the prompt and embed it in the style template
pub fn compose_prompt(prompt: &str) -> String {
    let subject = sanitize_prompt(prompt.trim());
    format!(
        "Create a single pixel art illustration of: {subject}. \
         Style: 16-bit retro game aesthetic, limited color palette, crisp square pixels, \
         no anti-aliasing. Format: square composition, centered subject, simple background. \
         Do not include any text, letters, logos or watermarks."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minecraft_replaced() {
        let composed = compose_prompt("minecraft castle");
        assert!(composed.contains("pixel fantasy castle"));
        assert!(!composed.to_lowercase().contains("minecraft"));
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(sanitize_prompt("MineCraft house"), "pixel fantasy house");
        assert_eq!(sanitize_prompt("POKEMON and Pokémon"), "fantasy creature and fantasy creature");
    }

    #[test]
    fn test_whole_words_only() {
        assert_eq!(sanitize_prompt("marionette"), "marionette");
        assert_eq!(sanitize_prompt("super mario"), "super plumber hero");
    }

    #[test]
    fn test_clean_prompt_untouched() {
        assert_eq!(sanitize_prompt("dragon"), "dragon");
        assert!(compose_prompt("  dragon ").contains("of: dragon."));
    }
}
