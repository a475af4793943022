//! Convert service implementation
//!
//! This service handles convert registration, profile updates, search and
//! listing, and leader assignment for the converts follow-up track.

use tracing::{debug, info};

use crate::database::ConvertRepository;
use crate::models::convert::{Convert, CreateConvertRequest, UpdateConvertRequest};
use crate::pipeline::{FollowUpStage, PipelineManager};
use crate::models::checkin::PersonKind;
use crate::utils::errors::{FlockKeeperError, Result};
use crate::utils::helpers::{clamp_pagination, normalize_phone, require_field, validate_email};

/// Convert service for managing convert records
#[derive(Clone)]
pub struct ConvertService {
    convert_repository: ConvertRepository,
    pipeline: PipelineManager,
}

impl ConvertService {
    /// Create a new ConvertService instance
    pub fn new(convert_repository: ConvertRepository, pipeline: PipelineManager) -> Self {
        Self {
            convert_repository,
            pipeline,
        }
    }

    /// Register a new convert
    pub async fn create(&self, church_id: i64, mut request: CreateConvertRequest) -> Result<Convert> {
        require_field("first_name", &request.first_name)?;
        require_field("last_name", &request.last_name)?;

        if let Some(email) = &request.email {
            validate_email("email", email)?;
        }
        if let Some(phone) = &request.phone {
            request.phone = Some(normalize_phone("phone", phone)?);
        }

        let convert = self.convert_repository.create(church_id, request).await?;
        info!(church_id = church_id, convert_id = convert.id, "New convert registered");

        Ok(convert)
    }

    /// Get convert by ID
    pub async fn get(&self, church_id: i64, id: i64) -> Result<Convert> {
        self.convert_repository
            .find_by_id(church_id, id)
            .await?
            .ok_or(FlockKeeperError::ConvertNotFound { id })
    }

    /// Update convert fields
    pub async fn update(
        &self,
        church_id: i64,
        id: i64,
        mut request: UpdateConvertRequest,
    ) -> Result<Convert> {
        // Ensure the record exists so a missing id maps to 404 rather than a
        // bare database error.
        self.get(church_id, id).await?;

        if let Some(email) = &request.email {
            validate_email("email", email)?;
        }
        if let Some(phone) = &request.phone {
            request.phone = Some(normalize_phone("phone", phone)?);
        }
        if let Some(stage) = request.stage {
            if !self.pipeline.stage_in_track(PersonKind::Convert, stage) {
                return Err(FlockKeeperError::InvalidStageTransition {
                    from: "converts track".to_string(),
                    to: format!("{:?}", stage),
                });
            }
        }

        let convert = self.convert_repository.update(church_id, id, request).await?;
        info!(church_id = church_id, convert_id = id, "Convert updated");

        Ok(convert)
    }

    /// Delete convert
    pub async fn delete(&self, church_id: i64, id: i64) -> Result<()> {
        let deleted = self.convert_repository.delete(church_id, id).await?;
        if !deleted {
            return Err(FlockKeeperError::ConvertNotFound { id });
        }
        info!(church_id = church_id, convert_id = id, "Convert deleted");
        Ok(())
    }

    /// List converts with search, stage filter, and pagination
    pub async fn list(
        &self,
        church_id: i64,
        search: Option<&str>,
        stage: Option<FollowUpStage>,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<Convert>> {
        let (limit, offset) = clamp_pagination(limit, offset);
        debug!(church_id = church_id, search = ?search, stage = ?stage, "Listing converts");
        self.convert_repository
            .list(church_id, search, stage, limit, offset)
            .await
    }

    /// List converts assigned to a leader
    pub async fn list_for_leader(&self, church_id: i64, leader_id: i64) -> Result<Vec<Convert>> {
        self.convert_repository.list_by_leader(church_id, leader_id).await
    }

    /// All converts of a church, for exports
    pub async fn list_all(&self, church_id: i64) -> Result<Vec<Convert>> {
        self.convert_repository.list_all(church_id).await
    }
}
