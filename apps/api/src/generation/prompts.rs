//! Prompt templates per content type, and prompt assembly.
//!
//! A template is either a fixed preamble that the keyword is appended to, or a
//! function of (language, keyword) that lays the whole prompt out itself.

use crate::generation::content_type::{ContentType, Language};
use crate::llm_client::prompts::language_instruction;

/// How a content type turns a keyword into a prompt.
#[derive(Clone, Copy)]
pub enum PromptTemplate {
    Static(&'static str),
    Dynamic(fn(Language, &str) -> String),
}

pub const PINTEREST_TEMPLATE: &str = "Create a Pinterest-optimized recipe with:
- Catchy title
- Brief description
- Key ingredients
- Quick instructions
- Relevant hashtags

Recipe for:";

pub const IMAGE_TEMPLATE: &str = "Create a detailed Midjourney prompt only, no additional text.
Include:
- Subject description
- Style/mood
- Lighting
- Camera angle
- Technical specs

For:";

pub const SEO_TEMPLATE: &str = "Create WordPress SEO elements:
- Meta title (60 chars max)
- Meta description (160 chars max)
- Focus keywords (5-7)
- Secondary keywords (8-10)
- SEO title
- Slug

For:";

pub const ARTICLE_TEMPLATE: &str = "Write a blog post with this exact format:

<h1>SEO-optimized title</h1>

<content>
[Write the full article content here with proper paragraphs]
</content>

For topic:";

fn recipe_prompt(language: Language, keyword: &str) -> String {
    let headers = language.recipe_headers();
    format!(
        "Generate a recipe in {language} language for: {keyword}

Please format the response exactly like this:
[Recipe Name with Emoji, only food emoji]
[2-3 sentence description]

{ingredients}
- [ingredients with measurements]

{directions}
1. [detailed step]
2. [detailed step]
(continue with all steps)

{tips}
- [helpful cooking tips]",
        ingredients = headers.ingredients,
        directions = headers.directions,
        tips = headers.tips,
    )
}

pub fn template_for(content_type: ContentType) -> PromptTemplate {
    match content_type {
        ContentType::Recipe => PromptTemplate::Dynamic(recipe_prompt),
        ContentType::Pinterest => PromptTemplate::Static(PINTEREST_TEMPLATE),
        ContentType::Image => PromptTemplate::Static(IMAGE_TEMPLATE),
        ContentType::Seo => PromptTemplate::Static(SEO_TEMPLATE),
        ContentType::Article => PromptTemplate::Static(ARTICLE_TEMPLATE),
    }
}

/// Builds the full prompt for one (keyword, content type) item.
///
/// A non-empty `custom_prompt` replaces the type's template and is treated as static.
pub fn build_prompt(
    content_type: ContentType,
    keyword: &str,
    language: Language,
    custom_prompt: Option<&str>,
) -> String {
    let template = match custom_prompt.map(str::trim).filter(|p| !p.is_empty()) {
        Some(custom) => return static_prompt(custom, keyword, language),
        None => template_for(content_type),
    };

    match template {
        PromptTemplate::Static(preamble) => static_prompt(preamble, keyword, language),
        PromptTemplate::Dynamic(render) => render(language, keyword),
    }
}

fn static_prompt(preamble: &str, keyword: &str, language: Language) -> String {
    format!("{preamble} {keyword}{}", language_instruction(language))
}
