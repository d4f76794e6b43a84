use serde::{Deserialize, Serialize};

use crate::data_url::DataUrl;

/// Topic picked in the "Choose a section" selector.
///
/// The value is kept in the card state but never reaches the submission
/// callback.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Section {
    #[default]
    None,
    ConceptCards,
    InterviewQuestions,
    PracticeQuestions,
    Quizzes,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::None,
        Section::ConceptCards,
        Section::InterviewQuestions,
        Section::PracticeQuestions,
        Section::Quizzes,
    ];

    pub fn value(&self) -> &'static str {
        match *self {
            Section::None => "",
            Section::ConceptCards => "option0",
            Section::InterviewQuestions => "option1",
            Section::PracticeQuestions => "option2",
            Section::Quizzes => "option3",
        }
    }

    pub fn label(&self) -> &'static str {
        match *self {
            Section::None => "Select",
            Section::ConceptCards => "Concept Cards",
            Section::InterviewQuestions => "Interview Questions",
            Section::PracticeQuestions => "Practice Questions",
            Section::Quizzes => "Quizzes",
        }
    }

    /// Unknown values fall back to [`Section::None`].
    pub fn from_value(value: &str) -> Self {
        Self::ALL
            .iter()
            .copied()
            .find(|section| section.value() == value)
            .unwrap_or_default()
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SubmitState {
    Enabled,
    Disabled,
}

impl SubmitState {
    pub fn is_disabled(&self) -> bool {
        *self == SubmitState::Disabled
    }
}

/// A downscaled attachment, stored inline as a JPEG data URL.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Thumbnail(pub DataUrl);

impl Thumbnail {
    pub fn src(&self) -> &str {
        self.0.as_str()
    }
}
