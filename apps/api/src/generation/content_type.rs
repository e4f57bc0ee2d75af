//! The closed set of content types and output languages.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Category of output requested for a keyword.
///
/// Declaration order is the order a batch walks the selected types in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Recipe,
    Pinterest,
    Image,
    Seo,
    Article,
}

impl ContentType {
    pub const ALL: [ContentType; 5] = [
        ContentType::Recipe,
        ContentType::Pinterest,
        ContentType::Image,
        ContentType::Seo,
        ContentType::Article,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ContentType::Recipe => "Facebook Recipe Post",
            ContentType::Pinterest => "Pinterest Recipe",
            ContentType::Image => "Midjourney Prompt",
            ContentType::Seo => "WordPress SEO",
            ContentType::Article => "Blog Article",
        }
    }

    /// Wire tag, also used in progress keys.
    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::Recipe => "recipe",
            ContentType::Pinterest => "pinterest",
            ContentType::Image => "image",
            ContentType::Seo => "seo",
            ContentType::Article => "article",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output language for generated text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    #[default]
    English,
    Spanish,
    French,
    German,
    Italian,
}

/// Localized section headings used by the recipe template.
#[derive(Debug, Clone, Copy)]
pub struct RecipeHeaders {
    pub ingredients: &'static str,
    pub directions: &'static str,
    pub tips: &'static str,
}

impl Language {
    pub fn recipe_headers(self) -> RecipeHeaders {
        match self {
            Language::English => RecipeHeaders {
                ingredients: "Ingredients",
                directions: "Instructions",
                tips: "Tips and Notes",
            },
            Language::Spanish => RecipeHeaders {
                ingredients: "Ingredientes",
                directions: "Instrucciones",
                tips: "Consejos y Notas",
            },
            Language::French => RecipeHeaders {
                ingredients: "Ingrédients",
                directions: "Instructions",
                tips: "Conseils et Notes",
            },
            Language::German => RecipeHeaders {
                ingredients: "Zutaten",
                directions: "Anleitung",
                tips: "Tipps und Hinweise",
            },
            Language::Italian => RecipeHeaders {
                ingredients: "Ingredienti",
                directions: "Istruzioni",
                tips: "Consigli e Note",
            },
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Language::English => "English",
            Language::Spanish => "Spanish",
            Language::French => "French",
            Language::German => "German",
            Language::Italian => "Italian",
        };
        f.write_str(name)
    }
}
