//! Announcement service implementation
//!
//! This service creates announcement drafts, resolves recipient groups to
//! concrete addresses, dispatches email/SMS/MMS through the outbound
//! gateways, and handles scheduled dispatch. Bulk sends pace themselves with
//! a small delay between messages, which keeps provider rate limiters happy.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, info, warn};
use url::Url;

use crate::database::DatabaseService;
use crate::models::announcement::{
    Announcement, AnnouncementChannel, AnnouncementStatus, CreateAnnouncementRequest,
    DispatchReport, Recipient, ScheduleAnnouncementRequest, SendAnnouncementRequest,
};
use crate::services::messaging::{EmailSender, SmsGateway};
use crate::utils::errors::{FlockKeeperError, Result};
use crate::utils::helpers::clamp_pagination;
use crate::utils::logging::log_announcement_dispatch;

/// Delay between consecutive outbound messages in a bulk send
const BULK_SEND_DELAY: Duration = Duration::from_millis(50);

/// Announcement service for outbound communications
#[derive(Clone)]
pub struct AnnouncementService {
    db: DatabaseService,
    email: Arc<dyn EmailSender>,
    sms: Arc<dyn SmsGateway>,
}

impl AnnouncementService {
    /// Create a new AnnouncementService instance
    pub fn new(db: DatabaseService, email: Arc<dyn EmailSender>, sms: Arc<dyn SmsGateway>) -> Self {
        Self { db, email, sms }
    }

    /// Validate an announcement draft before it is stored
    pub fn validate_draft(request: &CreateAnnouncementRequest) -> Result<()> {
        if request.body.trim().is_empty() {
            return Err(FlockKeeperError::Validation {
                field: "body".to_string(),
                message: "is required".to_string(),
            });
        }

        if request.audiences.is_empty() {
            return Err(FlockKeeperError::Validation {
                field: "audiences".to_string(),
                message: "select at least one recipient group".to_string(),
            });
        }

        match request.channel {
            AnnouncementChannel::Email => {
                if request.subject.trim().is_empty() {
                    return Err(FlockKeeperError::Validation {
                        field: "subject".to_string(),
                        message: "is required for email announcements".to_string(),
                    });
                }
            }
            AnnouncementChannel::Mms => {
                let Some(media_url) = &request.media_url else {
                    return Err(FlockKeeperError::Validation {
                        field: "media_url".to_string(),
                        message: "is required for MMS announcements".to_string(),
                    });
                };
                if Url::parse(media_url).is_err() {
                    return Err(FlockKeeperError::Validation {
                        field: "media_url".to_string(),
                        message: format!("'{}' is not a valid URL", media_url),
                    });
                }
            }
            AnnouncementChannel::Sms => {}
        }

        Ok(())
    }

    /// Create an announcement draft
    pub async fn create_draft(
        &self,
        church_id: i64,
        created_by: i64,
        request: CreateAnnouncementRequest,
    ) -> Result<Announcement> {
        Self::validate_draft(&request)?;

        let announcement = self.db.announcements.create(church_id, request, created_by).await?;
        info!(
            church_id = church_id,
            announcement_id = announcement.id,
            "Announcement draft created"
        );
        Ok(announcement)
    }

    /// Get one announcement
    pub async fn get(&self, church_id: i64, id: i64) -> Result<Announcement> {
        self.db
            .announcements
            .find_by_id(church_id, id)
            .await?
            .ok_or(FlockKeeperError::AnnouncementNotFound { id })
    }

    /// List announcements of a church
    pub async fn list(
        &self,
        church_id: i64,
        status: Option<AnnouncementStatus>,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<Announcement>> {
        let (limit, offset) = clamp_pagination(limit, offset);
        self.db.announcements.list(church_id, status, limit, offset).await
    }

    /// Send an announcement immediately
    pub async fn send_now(
        &self,
        church_id: i64,
        created_by: i64,
        request: SendAnnouncementRequest,
    ) -> Result<DispatchReport> {
        let announcement = self
            .resolve_target(church_id, created_by, request.announcement_id, request.draft)
            .await?;
        self.dispatch(&announcement).await
    }

    /// Schedule an announcement for future dispatch
    pub async fn schedule(
        &self,
        church_id: i64,
        created_by: i64,
        request: ScheduleAnnouncementRequest,
    ) -> Result<Announcement> {
        if request.scheduled_at <= Utc::now() {
            return Err(FlockKeeperError::Validation {
                field: "scheduled_at".to_string(),
                message: "must be in the future".to_string(),
            });
        }

        let announcement = self
            .resolve_target(church_id, created_by, request.announcement_id, request.draft)
            .await?;

        let scheduled = self
            .db
            .announcements
            .schedule(church_id, announcement.id, request.scheduled_at)
            .await?;

        info!(
            church_id = church_id,
            announcement_id = scheduled.id,
            scheduled_at = %request.scheduled_at,
            "Announcement scheduled"
        );
        Ok(scheduled)
    }

    /// Dispatch every scheduled announcement whose time has arrived.
    /// Returns the number of announcements dispatched.
    pub async fn run_scheduled_dispatch(&self) -> Result<usize> {
        let due = self.db.announcements.due_scheduled(Utc::now()).await?;
        if due.is_empty() {
            return Ok(0);
        }

        info!(count = due.len(), "Dispatching due scheduled announcements");
        let mut dispatched = 0;
        for announcement in due {
            match self.dispatch(&announcement).await {
                Ok(_) => dispatched += 1,
                Err(e) => {
                    warn!(announcement_id = announcement.id, error = %e, "Scheduled dispatch failed");
                    self.db
                        .announcements
                        .record_dispatch(announcement.id, AnnouncementStatus::Failed, 0, 0)
                        .await?;
                }
            }
        }

        Ok(dispatched)
    }

    /// Resolve the recipients of an announcement and send to each of them
    async fn dispatch(&self, announcement: &Announcement) -> Result<DispatchReport> {
        if announcement.status == AnnouncementStatus::Sent {
            return Err(FlockKeeperError::InvalidInput(
                "Announcement has already been sent".to_string(),
            ));
        }

        let recipients = self.resolve_recipients(announcement).await?;
        if recipients.is_empty() {
            warn!(
                announcement_id = announcement.id,
                "Announcement has no reachable recipients"
            );
        }

        let mut sent: u32 = 0;
        let mut failed: u32 = 0;

        for recipient in &recipients {
            let result = match announcement.channel {
                AnnouncementChannel::Email => {
                    let address = recipient.email.as_deref().unwrap_or_default();
                    self.email
                        .send_email(address, &announcement.subject, &announcement.body)
                        .await
                }
                AnnouncementChannel::Sms => {
                    let number = recipient.phone.as_deref().unwrap_or_default();
                    self.sms.send_sms(number, &announcement.body, None).await
                }
                AnnouncementChannel::Mms => {
                    let number = recipient.phone.as_deref().unwrap_or_default();
                    self.sms
                        .send_sms(number, &announcement.body, announcement.media_url.as_deref())
                        .await
                }
            };

            match result {
                Ok(()) => {
                    sent += 1;
                    debug!(announcement_id = announcement.id, recipient = %recipient.name, "Recipient delivered");
                }
                Err(e) => {
                    failed += 1;
                    warn!(announcement_id = announcement.id, recipient = %recipient.name, error = %e, "Recipient delivery failed");
                }
            }

            tokio::time::sleep(BULK_SEND_DELAY).await;
        }

        let status = if sent == 0 && failed > 0 {
            AnnouncementStatus::Failed
        } else {
            AnnouncementStatus::Sent
        };

        self.db
            .announcements
            .record_dispatch(announcement.id, status, sent as i32, failed as i32)
            .await?;
        log_announcement_dispatch(announcement.id, sent, failed);

        Ok(DispatchReport {
            announcement_id: announcement.id,
            status,
            sent,
            failed,
        })
    }

    /// Expand audience groups into deduplicated recipients that have a
    /// usable address for the announcement's channel
    async fn resolve_recipients(&self, announcement: &Announcement) -> Result<Vec<Recipient>> {
        let groups = announcement.audiences.0.clone();
        let fetches = groups.iter().map(|group| {
            self.db
                .announcements
                .recipients_for_group(announcement.church_id, *group)
        });
        let results = futures::future::join_all(fetches).await;

        let mut recipients = Vec::new();
        let mut seen_addresses: HashSet<String> = HashSet::new();

        for (group, rows) in groups.iter().zip(results) {
            for (name, email, phone) in rows? {
                let address = match announcement.channel {
                    AnnouncementChannel::Email => email.clone(),
                    AnnouncementChannel::Sms | AnnouncementChannel::Mms => phone.clone(),
                };

                let Some(address) = address else {
                    continue;
                };
                if !seen_addresses.insert(address) {
                    continue;
                }

                recipients.push(Recipient {
                    group: *group,
                    name,
                    email,
                    phone,
                });
            }
        }

        Ok(recipients)
    }

    /// Fetch an existing announcement or create one from an inline draft
    async fn resolve_target(
        &self,
        church_id: i64,
        created_by: i64,
        announcement_id: Option<i64>,
        draft: Option<CreateAnnouncementRequest>,
    ) -> Result<Announcement> {
        match (announcement_id, draft) {
            (Some(id), _) => self.get(church_id, id).await,
            (None, Some(draft)) => self.create_draft(church_id, created_by, draft).await,
            (None, None) => Err(FlockKeeperError::Validation {
                field: "announcement_id".to_string(),
                message: "provide an announcement id or an inline draft".to_string(),
            }),
        }
    }

    /// Delete a draft announcement
    pub async fn delete(&self, church_id: i64, id: i64) -> Result<()> {
        let announcement = self.get(church_id, id).await?;
        if announcement.status == AnnouncementStatus::Sent {
            return Err(FlockKeeperError::InvalidInput(
                "Sent announcements cannot be deleted".to_string(),
            ));
        }

        self.db.announcements.delete(church_id, id).await?;
        info!(church_id = church_id, announcement_id = id, "Announcement deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::announcement::RecipientGroup;

    fn draft(channel: AnnouncementChannel) -> CreateAnnouncementRequest {
        CreateAnnouncementRequest {
            subject: "Easter service".to_string(),
            body: "Join us Sunday at 10am.".to_string(),
            channel,
            media_url: None,
            audiences: vec![RecipientGroup::Members, RecipientGroup::Guests],
        }
    }

    #[test]
    fn test_valid_drafts_pass() {
        assert!(AnnouncementService::validate_draft(&draft(AnnouncementChannel::Email)).is_ok());
        assert!(AnnouncementService::validate_draft(&draft(AnnouncementChannel::Sms)).is_ok());

        let mut mms = draft(AnnouncementChannel::Mms);
        mms.media_url = Some("https://cdn.example/easter.jpg".to_string());
        assert!(AnnouncementService::validate_draft(&mms).is_ok());
    }

    #[test]
    fn test_empty_body_rejected() {
        let mut request = draft(AnnouncementChannel::Sms);
        request.body = "   ".to_string();
        assert!(AnnouncementService::validate_draft(&request).is_err());
    }

    #[test]
    fn test_email_requires_subject() {
        let mut request = draft(AnnouncementChannel::Email);
        request.subject = String::new();
        assert!(AnnouncementService::validate_draft(&request).is_err());

        // SMS has no subject requirement
        let mut request = draft(AnnouncementChannel::Sms);
        request.subject = String::new();
        assert!(AnnouncementService::validate_draft(&request).is_ok());
    }

    #[test]
    fn test_mms_requires_valid_media_url() {
        let request = draft(AnnouncementChannel::Mms);
        assert!(AnnouncementService::validate_draft(&request).is_err());

        let mut request = draft(AnnouncementChannel::Mms);
        request.media_url = Some("not a url".to_string());
        assert!(AnnouncementService::validate_draft(&request).is_err());
    }

    #[test]
    fn test_audiences_required() {
        let mut request = draft(AnnouncementChannel::Email);
        request.audiences.clear();
        assert!(AnnouncementService::validate_draft(&request).is_err());
    }
}
