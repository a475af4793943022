//! Prayer request service implementation

use tracing::info;

use crate::database::PrayerRepository;
use crate::models::prayer::{CreatePrayerRequest, PrayerRequest, UpdatePrayerRequest};
use crate::utils::errors::{FlockKeeperError, Result};
use crate::utils::helpers::{clamp_pagination, require_field};

#[derive(Clone)]
pub struct PrayerService {
    prayer_repository: PrayerRepository,
}

impl PrayerService {
    pub fn new(prayer_repository: PrayerRepository) -> Self {
        Self { prayer_repository }
    }

    pub async fn create(&self, church_id: i64, request: CreatePrayerRequest) -> Result<PrayerRequest> {
        require_field("requester_name", &request.requester_name)?;
        require_field("request", &request.request)?;

        let prayer = self.prayer_repository.create(church_id, request).await?;
        info!(church_id = church_id, prayer_id = prayer.id, "Prayer request created");
        Ok(prayer)
    }

    pub async fn get(&self, church_id: i64, id: i64) -> Result<PrayerRequest> {
        self.prayer_repository
            .find_by_id(church_id, id)
            .await?
            .ok_or(FlockKeeperError::RecordNotFound { entity: "Prayer request", id })
    }

    pub async fn update(
        &self,
        church_id: i64,
        id: i64,
        request: UpdatePrayerRequest,
    ) -> Result<PrayerRequest> {
        self.get(church_id, id).await?;
        let prayer = self.prayer_repository.update(church_id, id, request).await?;
        info!(church_id = church_id, prayer_id = id, "Prayer request updated");
        Ok(prayer)
    }

    /// Mark a prayer request answered
    pub async fn mark_answered(&self, church_id: i64, id: i64) -> Result<PrayerRequest> {
        self.get(church_id, id).await?;
        let prayer = self.prayer_repository.mark_answered(church_id, id).await?;
        info!(church_id = church_id, prayer_id = id, "Prayer request marked answered");
        Ok(prayer)
    }

    pub async fn delete(&self, church_id: i64, id: i64) -> Result<()> {
        if !self.prayer_repository.delete(church_id, id).await? {
            return Err(FlockKeeperError::RecordNotFound { entity: "Prayer request", id });
        }
        info!(church_id = church_id, prayer_id = id, "Prayer request deleted");
        Ok(())
    }

    pub async fn list(
        &self,
        church_id: i64,
        answered: Option<bool>,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<PrayerRequest>> {
        let (limit, offset) = clamp_pagination(limit, offset);
        self.prayer_repository.list(church_id, answered, limit, offset).await
    }
}
