use crate::{foundation::error::StoryResult, story::model::Story};

const STORY_JSON: &str = include_str!("../../assets/story.json");

/// Raw JSON of the story bundled with the crate.
pub fn builtin_story_json() -> &'static str {
    STORY_JSON
}

/// Parse and validate the bundled story: "Stellar Stories", thirteen scenes about space weather.
pub fn builtin_story() -> StoryResult<Story> {
    Story::from_json_str(STORY_JSON)
}

#[cfg(test)]
#[path = "../../tests/unit/story/builtin.rs"]
mod tests;
