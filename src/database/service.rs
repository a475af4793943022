//! Database service layer
//!
//! This module provides a high-level interface to database operations

use crate::database::{
    AnnouncementRepository, CheckinRepository, ChurchRepository, ConvertRepository,
    DatabasePool, GuestRepository, LeaderRepository, MemberRepository, NewMemberRepository,
    PrayerRepository,
};
use crate::models::checkin::PersonKind;
use crate::pipeline::FollowUpStage;
use crate::utils::errors::FlockKeeperError;

#[derive(Debug, Clone)]
pub struct DatabaseService {
    pub churches: ChurchRepository,
    pub leaders: LeaderRepository,
    pub converts: ConvertRepository,
    pub new_members: NewMemberRepository,
    pub members: MemberRepository,
    pub guests: GuestRepository,
    pub prayers: PrayerRepository,
    pub checkins: CheckinRepository,
    pub announcements: AnnouncementRepository,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            churches: ChurchRepository::new(pool.clone()),
            leaders: LeaderRepository::new(pool.clone()),
            converts: ConvertRepository::new(pool.clone()),
            new_members: NewMemberRepository::new(pool.clone()),
            members: MemberRepository::new(pool.clone()),
            guests: GuestRepository::new(pool.clone()),
            prayers: PrayerRepository::new(pool.clone()),
            checkins: CheckinRepository::new(pool.clone()),
            announcements: AnnouncementRepository::new(pool),
        }
    }

    /// Current pipeline stage of a tracked person, dispatching on track
    pub async fn person_stage(
        &self,
        church_id: i64,
        kind: PersonKind,
        person_id: i64,
    ) -> Result<Option<(FollowUpStage, Option<i64>)>, FlockKeeperError> {
        match kind {
            PersonKind::Convert => Ok(self
                .converts
                .find_by_id(church_id, person_id)
                .await?
                .map(|c| (c.stage, c.assigned_leader_id))),
            PersonKind::NewMember => Ok(self
                .new_members
                .find_by_id(church_id, person_id)
                .await?
                .map(|m| (m.stage, m.assigned_leader_id))),
        }
    }

    /// Move a tracked person to a new pipeline stage
    pub async fn set_person_stage(
        &self,
        church_id: i64,
        kind: PersonKind,
        person_id: i64,
        stage: FollowUpStage,
    ) -> Result<(), FlockKeeperError> {
        match kind {
            PersonKind::Convert => {
                self.converts.set_stage(church_id, person_id, stage).await?;
            }
            PersonKind::NewMember => {
                self.new_members.set_stage(church_id, person_id, stage).await?;
            }
        }
        Ok(())
    }

    /// Get per-entity record counts for a church dashboard
    pub async fn get_church_stats(
        &self,
        church_id: i64,
    ) -> Result<serde_json::Value, FlockKeeperError> {
        let converts = self.converts.count(church_id).await?;
        let new_members = self.new_members.count(church_id).await?;
        let members = self.members.count(church_id).await?;
        let guests = self.guests.count(church_id).await?;
        let prayers = self.prayers.count(church_id).await?;
        let checkins = self.checkins.count(church_id).await?;
        let announcements = self.announcements.count(church_id).await?;

        Ok(serde_json::json!({
            "converts": converts,
            "new_members": new_members,
            "members": members,
            "guests": guests,
            "prayer_requests": prayers,
            "checkins": checkins,
            "announcements": announcements,
        }))
    }
}
