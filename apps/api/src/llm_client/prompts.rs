// Cross-cutting prompt fragments shared by every content type.
// Type-specific templates live in generation::prompts.

use crate::generation::content_type::Language;

/// Suffix appended after the keyword for every static template.
pub fn language_instruction(language: Language) -> String {
    format!("\n\nGenerate in {language} language.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_instruction_names_language() {
        assert_eq!(
            language_instruction(Language::German),
            "\n\nGenerate in German language."
        );
    }
}
