//! Prompt template for counter lookups.
//!
//! The template is plain text with a single `{character}` placeholder. It is
//! loaded once at startup and may be overridden through configuration.

use thiserror::Error;

/// Placeholder replaced with the requested character name.
pub const CHARACTER_PLACEHOLDER: &str = "{character}";

/// Template used when no override is configured.
pub const DEFAULT_PROMPT_TEMPLATE: &str = "Act as an expert Star Wars Galaxy of Heroes player and SWGOH.GG counter database. For the character \"{character}\", provide a highly effective, high-banner, 5v5 Grand Arena Championship (GAC) counter team for their top-rated defensive team. Provide the counter in a clear Markdown table format with columns for 'Counter Team', 'Key Strategy', and 'Win Rate (Est)'.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    template: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("prompt template must contain {{character}}")]
pub struct MissingPlaceholder;

impl PromptTemplate {
    pub fn new(template: impl Into<String>) -> Result<Self, MissingPlaceholder> {
        let template = template.into();
        if !template.contains(CHARACTER_PLACEHOLDER) {
            return Err(MissingPlaceholder);
        }
        Ok(Self { template })
    }

    /// Substitute `character` verbatim for every placeholder.
    ///
    /// Placeholders appearing inside `character` itself are left as-is.
    pub fn render(&self, character: &str) -> String {
        self.template.replace(CHARACTER_PLACEHOLDER, character)
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self {
            template: DEFAULT_PROMPT_TEMPLATE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_prompt_embeds_character_and_columns() {
        let prompt = PromptTemplate::default().render("Rey");

        assert!(prompt.contains("For the character \"Rey\","));
        assert!(prompt.contains("'Counter Team'"));
        assert!(prompt.contains("'Key Strategy'"));
        assert!(prompt.contains("'Win Rate (Est)'"));
        assert!(!prompt.contains(CHARACTER_PLACEHOLDER));
    }

    #[test]
    fn character_is_not_recased_or_trimmed() {
        let prompt = PromptTemplate::default().render("  dARTH vader (Legendary)  ");
        assert!(prompt.contains("\"  dARTH vader (Legendary)  \""));
    }

    #[test]
    fn placeholder_inside_character_is_not_expanded_again() {
        let template = PromptTemplate::new("<{character}>").unwrap();
        assert_eq!(template.render("{character}"), "<{character}>");
    }

    #[test]
    fn every_placeholder_is_replaced() {
        let template = PromptTemplate::new("{character} vs {character}").unwrap();
        assert_eq!(template.render("GL Leia"), "GL Leia vs GL Leia");
    }

    #[test]
    fn template_without_placeholder_is_rejected() {
        assert_eq!(
            PromptTemplate::new("List some counters."),
            Err(MissingPlaceholder)
        );
    }
}
