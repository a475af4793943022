//! Follow-up stage definitions
//!
//! Stages are a fixed, straight-line progression per track. Labels and badge
//! colors are lookup tables consumed by the dashboard when rendering stage
//! badges.

use serde::{Deserialize, Serialize};

/// Stage of a person in the follow-up pipeline.
///
/// The wire form is SCREAMING_SNAKE_CASE (`CONTACT_NEW_MEMBER`), the database
/// form snake_case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "follow_up_stage", rename_all = "snake_case")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FollowUpStage {
    New,
    Contacted,
    ContactNewMember,
    Scheduled,
    FirstCompleted,
    SecondCompleted,
    ThirdCompleted,
    FinalCompleted,
}

impl FollowUpStage {
    /// Human-readable badge label
    pub fn label(&self) -> &'static str {
        match self {
            FollowUpStage::New => "New",
            FollowUpStage::Contacted => "Contacted",
            FollowUpStage::ContactNewMember => "Contact New Member",
            FollowUpStage::Scheduled => "Visit Scheduled",
            FollowUpStage::FirstCompleted => "First Visit Completed",
            FollowUpStage::SecondCompleted => "Second Visit Completed",
            FollowUpStage::ThirdCompleted => "Third Visit Completed",
            FollowUpStage::FinalCompleted => "Follow-Up Completed",
        }
    }

    /// Badge color rendered by the dashboard
    pub fn color(&self) -> &'static str {
        match self {
            FollowUpStage::New => "gray",
            FollowUpStage::Contacted => "blue",
            FollowUpStage::ContactNewMember => "indigo",
            FollowUpStage::Scheduled => "amber",
            FollowUpStage::FirstCompleted => "teal",
            FollowUpStage::SecondCompleted => "cyan",
            FollowUpStage::ThirdCompleted => "sky",
            FollowUpStage::FinalCompleted => "green",
        }
    }

    /// Whether this stage marks a completed visit
    pub fn is_completion(&self) -> bool {
        matches!(
            self,
            FollowUpStage::FirstCompleted
                | FollowUpStage::SecondCompleted
                | FollowUpStage::ThirdCompleted
                | FollowUpStage::FinalCompleted
        )
    }

    /// Terminal stage: nothing advances past it
    pub fn is_terminal(&self) -> bool {
        matches!(self, FollowUpStage::FinalCompleted)
    }
}

/// One row of the stage lookup table exposed to the dashboard
#[derive(Debug, Clone, Serialize)]
pub struct StageInfo {
    pub stage: FollowUpStage,
    pub label: &'static str,
    pub color: &'static str,
}

impl From<FollowUpStage> for StageInfo {
    fn from(stage: FollowUpStage) -> Self {
        Self {
            stage,
            label: stage.label(),
            color: stage.color(),
        }
    }
}
