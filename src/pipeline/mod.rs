//! Follow-up pipeline
//!
//! This module defines the staged follow-up progressions for converts and new
//! members: each track is a fixed sequence of stages, and recording a checkin
//! advances a person through it with simple conditionals. There is no
//! re-entrancy and no rollback; stages only move forward.

pub mod stages;

pub use stages::{FollowUpStage, StageInfo};

use crate::models::checkin::{CheckinOutcome, PersonKind};
use crate::utils::errors::{FlockKeeperError, Result};

/// Registry of follow-up tracks and their stage sequences
#[derive(Debug, Clone)]
pub struct PipelineManager {
    converts: Vec<FollowUpStage>,
    new_members: Vec<FollowUpStage>,
}

impl PipelineManager {
    /// Create a pipeline manager with the default track definitions
    pub fn new() -> Self {
        Self {
            converts: vec![
                FollowUpStage::New,
                FollowUpStage::Contacted,
                FollowUpStage::Scheduled,
                FollowUpStage::FirstCompleted,
                FollowUpStage::SecondCompleted,
                FollowUpStage::FinalCompleted,
            ],
            new_members: vec![
                FollowUpStage::New,
                FollowUpStage::ContactNewMember,
                FollowUpStage::Scheduled,
                FollowUpStage::FirstCompleted,
                FollowUpStage::SecondCompleted,
                FollowUpStage::ThirdCompleted,
                FollowUpStage::FinalCompleted,
            ],
        }
    }

    /// Stage sequence for a track
    pub fn sequence(&self, track: PersonKind) -> &[FollowUpStage] {
        match track {
            PersonKind::Convert => &self.converts,
            PersonKind::NewMember => &self.new_members,
        }
    }

    /// Lookup table (stage, label, color) for a track, in pipeline order
    pub fn stage_table(&self, track: PersonKind) -> Vec<StageInfo> {
        self.sequence(track).iter().copied().map(StageInfo::from).collect()
    }

    /// The stage a person enters after the first contact attempt
    pub fn contact_stage(&self, track: PersonKind) -> FollowUpStage {
        match track {
            PersonKind::Convert => FollowUpStage::Contacted,
            PersonKind::NewMember => FollowUpStage::ContactNewMember,
        }
    }

    /// Position of a stage within a track
    fn position(&self, track: PersonKind, stage: FollowUpStage) -> Result<usize> {
        self.sequence(track)
            .iter()
            .position(|s| *s == stage)
            .ok_or_else(|| FlockKeeperError::InvalidStageTransition {
                from: format!("{:?}", stage),
                to: format!("track {}", track.as_str()),
            })
    }

    /// The completion stage following `current` in the track, if any
    pub fn next_completion(&self, track: PersonKind, current: FollowUpStage) -> Option<FollowUpStage> {
        let sequence = self.sequence(track);
        let pos = sequence.iter().position(|s| *s == current)?;
        sequence[pos + 1..].iter().copied().find(|s| s.is_completion())
    }

    /// Apply the stage-advancement conditionals for a recorded checkin.
    ///
    /// In order:
    /// 1. the terminal stage never changes;
    /// 2. a completed visit that connected advances to the next completion
    ///    stage of the track;
    /// 3. a checkin that scheduled a visit moves an early-stage person to
    ///    `SCHEDULED` (completed stages are not regressed);
    /// 4. any other first contact moves `NEW` to the track's contact stage;
    /// 5. otherwise the stage is unchanged.
    pub fn after_checkin(
        &self,
        track: PersonKind,
        current: FollowUpStage,
        outcome: CheckinOutcome,
        completed_visit: bool,
        scheduled: bool,
    ) -> Result<FollowUpStage> {
        let current_pos = self.position(track, current)?;

        if current.is_terminal() {
            return Ok(current);
        }

        if completed_visit && outcome == CheckinOutcome::Connected {
            if let Some(next) = self.next_completion(track, current) {
                return Ok(next);
            }
            return Ok(current);
        }

        if scheduled {
            let scheduled_pos = self.position(track, FollowUpStage::Scheduled)?;
            if current_pos < scheduled_pos {
                return Ok(FollowUpStage::Scheduled);
            }
            return Ok(current);
        }

        if current == FollowUpStage::New {
            return Ok(self.contact_stage(track));
        }

        Ok(current)
    }

    /// Whether a stage is valid for a track (update requests may carry an
    /// explicit stage override)
    pub fn stage_in_track(&self, track: PersonKind, stage: FollowUpStage) -> bool {
        self.sequence(track).contains(&stage)
    }
}

impl Default for PipelineManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn manager() -> PipelineManager {
        PipelineManager::new()
    }

    #[test]
    fn test_tracks_are_distinct() {
        let m = manager();
        assert_ne!(m.sequence(PersonKind::Convert), m.sequence(PersonKind::NewMember));
        assert!(m
            .sequence(PersonKind::NewMember)
            .contains(&FollowUpStage::ContactNewMember));
        assert!(!m.sequence(PersonKind::Convert).contains(&FollowUpStage::ContactNewMember));
    }

    #[test]
    fn test_first_contact_advances_new() {
        let m = manager();
        let next = m
            .after_checkin(
                PersonKind::Convert,
                FollowUpStage::New,
                CheckinOutcome::LeftMessage,
                false,
                false,
            )
            .unwrap();
        assert_eq!(next, FollowUpStage::Contacted);

        let next = m
            .after_checkin(
                PersonKind::NewMember,
                FollowUpStage::New,
                CheckinOutcome::NoResponse,
                false,
                false,
            )
            .unwrap();
        assert_eq!(next, FollowUpStage::ContactNewMember);
    }

    #[test]
    fn test_scheduling_moves_to_scheduled() {
        let m = manager();
        let next = m
            .after_checkin(
                PersonKind::Convert,
                FollowUpStage::Contacted,
                CheckinOutcome::Connected,
                false,
                true,
            )
            .unwrap();
        assert_eq!(next, FollowUpStage::Scheduled);

        // Scheduling directly from NEW skips the contact stage
        let next = m
            .after_checkin(
                PersonKind::NewMember,
                FollowUpStage::New,
                CheckinOutcome::Connected,
                false,
                true,
            )
            .unwrap();
        assert_eq!(next, FollowUpStage::Scheduled);
    }

    #[test]
    fn test_scheduling_does_not_regress_completed_stage() {
        let m = manager();
        let next = m
            .after_checkin(
                PersonKind::Convert,
                FollowUpStage::FirstCompleted,
                CheckinOutcome::Connected,
                false,
                true,
            )
            .unwrap();
        assert_eq!(next, FollowUpStage::FirstCompleted);
    }

    #[test]
    fn test_completed_visits_walk_the_completion_ladder() {
        let m = manager();
        let mut stage = FollowUpStage::Scheduled;
        let expected = [
            FollowUpStage::FirstCompleted,
            FollowUpStage::SecondCompleted,
            FollowUpStage::FinalCompleted,
        ];
        for want in expected {
            stage = m
                .after_checkin(PersonKind::Convert, stage, CheckinOutcome::Connected, true, false)
                .unwrap();
            assert_eq!(stage, want);
        }

        // The new-members track has one extra visit
        let mut stage = FollowUpStage::Scheduled;
        let expected = [
            FollowUpStage::FirstCompleted,
            FollowUpStage::SecondCompleted,
            FollowUpStage::ThirdCompleted,
            FollowUpStage::FinalCompleted,
        ];
        for want in expected {
            stage = m
                .after_checkin(PersonKind::NewMember, stage, CheckinOutcome::Connected, true, false)
                .unwrap();
            assert_eq!(stage, want);
        }
    }

    #[test]
    fn test_unconnected_visit_does_not_complete() {
        let m = manager();
        let next = m
            .after_checkin(
                PersonKind::Convert,
                FollowUpStage::Scheduled,
                CheckinOutcome::NoResponse,
                true,
                false,
            )
            .unwrap();
        assert_eq!(next, FollowUpStage::Scheduled);
    }

    #[test]
    fn test_terminal_stage_is_sticky() {
        let m = manager();
        let next = m
            .after_checkin(
                PersonKind::NewMember,
                FollowUpStage::FinalCompleted,
                CheckinOutcome::Connected,
                true,
                true,
            )
            .unwrap();
        assert_eq!(next, FollowUpStage::FinalCompleted);
    }

    #[test]
    fn test_stage_from_other_track_rejected() {
        let m = manager();
        let result = m.after_checkin(
            PersonKind::Convert,
            FollowUpStage::ThirdCompleted,
            CheckinOutcome::Connected,
            false,
            false,
        );
        assert!(result.is_err());
        assert!(!m.stage_in_track(PersonKind::Convert, FollowUpStage::ThirdCompleted));
        assert!(m.stage_in_track(PersonKind::NewMember, FollowUpStage::ThirdCompleted));
    }

    #[test]
    fn test_stage_table_order_matches_sequence() {
        let m = manager();
        let table = m.stage_table(PersonKind::Convert);
        assert_eq!(table.len(), m.sequence(PersonKind::Convert).len());
        assert_eq!(table[0].stage, FollowUpStage::New);
        assert_eq!(table.last().unwrap().stage, FollowUpStage::FinalCompleted);
        assert_eq!(table.last().unwrap().color, "green");
    }

    fn arb_track() -> impl Strategy<Value = PersonKind> {
        prop_oneof![Just(PersonKind::Convert), Just(PersonKind::NewMember)]
    }

    fn arb_outcome() -> impl Strategy<Value = CheckinOutcome> {
        prop_oneof![
            Just(CheckinOutcome::Connected),
            Just(CheckinOutcome::LeftMessage),
            Just(CheckinOutcome::NoResponse),
            Just(CheckinOutcome::WrongNumber),
            Just(CheckinOutcome::Scheduled),
        ]
    }

    proptest! {
        /// Stages never move backwards, whatever checkin is recorded.
        #[test]
        fn prop_advancement_is_monotone(
            track in arb_track(),
            stage_idx in 0usize..7,
            outcome in arb_outcome(),
            completed in any::<bool>(),
            scheduled in any::<bool>(),
        ) {
            let m = manager();
            let sequence = m.sequence(track);
            let current = sequence[stage_idx % sequence.len()];
            let next = m.after_checkin(track, current, outcome, completed, scheduled).unwrap();

            let current_pos = sequence.iter().position(|s| *s == current).unwrap();
            let next_pos = sequence.iter().position(|s| *s == next).unwrap();
            prop_assert!(next_pos >= current_pos);
        }
    }
}
