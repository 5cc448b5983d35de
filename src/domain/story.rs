use serde::{Deserialize, Serialize};
use validator::Validate;

/// A user story (HU) document: where it came from and its free text.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StoryDocument {
    pub name: String,
    #[validate(length(min = 1, message = "story content is empty"))]
    pub content: String,
}

impl StoryDocument {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_content_fails_validation() {
        let story = StoryDocument::new("hu.txt", "");
        assert!(story.validate().is_err());
    }

    #[test]
    fn non_empty_content_passes_validation() {
        let story = StoryDocument::new("hu.txt", "Como usuario quiero...");
        assert!(story.validate().is_ok());
    }
}
