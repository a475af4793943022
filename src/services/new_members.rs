//! New member service implementation
//!
//! Handles registration and management of new members on their own follow-up
//! track, including the leader-scoped listing behind the leader dashboard.

use tracing::{debug, info};

use crate::database::NewMemberRepository;
use crate::models::checkin::PersonKind;
use crate::models::new_member::{CreateNewMemberRequest, NewMember, UpdateNewMemberRequest};
use crate::pipeline::{FollowUpStage, PipelineManager};
use crate::utils::errors::{FlockKeeperError, Result};
use crate::utils::helpers::{clamp_pagination, normalize_phone, require_field, validate_email};

/// New member service
#[derive(Clone)]
pub struct NewMemberService {
    new_member_repository: NewMemberRepository,
    pipeline: PipelineManager,
}

impl NewMemberService {
    /// Create a new NewMemberService instance
    pub fn new(new_member_repository: NewMemberRepository, pipeline: PipelineManager) -> Self {
        Self {
            new_member_repository,
            pipeline,
        }
    }

    /// Register a new member
    pub async fn create(
        &self,
        church_id: i64,
        mut request: CreateNewMemberRequest,
    ) -> Result<NewMember> {
        require_field("first_name", &request.first_name)?;
        require_field("last_name", &request.last_name)?;

        if let Some(email) = &request.email {
            validate_email("email", email)?;
        }
        if let Some(phone) = &request.phone {
            request.phone = Some(normalize_phone("phone", phone)?);
        }

        let member = self.new_member_repository.create(church_id, request).await?;
        info!(church_id = church_id, new_member_id = member.id, "New member registered");

        Ok(member)
    }

    /// Get new member by ID
    pub async fn get(&self, church_id: i64, id: i64) -> Result<NewMember> {
        self.new_member_repository
            .find_by_id(church_id, id)
            .await?
            .ok_or(FlockKeeperError::NewMemberNotFound { id })
    }

    /// Update new member fields
    pub async fn update(
        &self,
        church_id: i64,
        id: i64,
        mut request: UpdateNewMemberRequest,
    ) -> Result<NewMember> {
        self.get(church_id, id).await?;

        if let Some(email) = &request.email {
            validate_email("email", email)?;
        }
        if let Some(phone) = &request.phone {
            request.phone = Some(normalize_phone("phone", phone)?);
        }
        if let Some(stage) = request.stage {
            if !self.pipeline.stage_in_track(PersonKind::NewMember, stage) {
                return Err(FlockKeeperError::InvalidStageTransition {
                    from: "new members track".to_string(),
                    to: format!("{:?}", stage),
                });
            }
        }

        let member = self.new_member_repository.update(church_id, id, request).await?;
        info!(church_id = church_id, new_member_id = id, "New member updated");

        Ok(member)
    }

    /// Delete new member
    pub async fn delete(&self, church_id: i64, id: i64) -> Result<()> {
        let deleted = self.new_member_repository.delete(church_id, id).await?;
        if !deleted {
            return Err(FlockKeeperError::NewMemberNotFound { id });
        }
        info!(church_id = church_id, new_member_id = id, "New member deleted");
        Ok(())
    }

    /// List new members with search, stage filter, and pagination
    pub async fn list(
        &self,
        church_id: i64,
        search: Option<&str>,
        stage: Option<FollowUpStage>,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<NewMember>> {
        let (limit, offset) = clamp_pagination(limit, offset);
        debug!(church_id = church_id, search = ?search, stage = ?stage, "Listing new members");
        self.new_member_repository
            .list(church_id, search, stage, limit, offset)
            .await
    }

    /// New members assigned to one leader
    pub async fn list_for_leader(&self, church_id: i64, leader_id: i64) -> Result<Vec<NewMember>> {
        debug!(church_id = church_id, leader_id = leader_id, "Listing leader's new members");
        self.new_member_repository.list_by_leader(church_id, leader_id).await
    }

    /// All new members of a church, for exports
    pub async fn list_all(&self, church_id: i64) -> Result<Vec<NewMember>> {
        self.new_member_repository.list_all(church_id).await
    }
}
