use serde::Serialize;

use crate::models::content::GeneratedContent;

/// All artifacts produced for one keyword.
#[derive(Debug, Clone, Serialize)]
pub struct KeywordGroup {
    pub keyword: String,
    pub items: Vec<GeneratedContent>,
}

/// Groups a flat history by keyword.
///
/// Groups are ordered by the keyword's first appearance in `history`; items keep
/// their history order inside a group.
pub fn group_by_keyword(history: &[GeneratedContent]) -> Vec<KeywordGroup> {
    let mut groups: Vec<KeywordGroup> = Vec::new();

    for content in history {
        match groups.iter_mut().find(|g| g.keyword == content.name) {
            Some(group) => group.items.push(content.clone()),
            None => groups.push(KeywordGroup {
                keyword: content.name.clone(),
                items: vec![content.clone()],
            }),
        }
    }

    groups
}
