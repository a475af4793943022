//! Follow-up service implementation
//!
//! This service records follow-up interactions (checkins), applies the
//! pipeline stage conditionals, and runs the mass follow-up batch operation
//! with its per-person success/failure report.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::database::DatabaseService;
use crate::i18n::I18n;
use crate::models::checkin::{
    Checkin, CheckinOutcome, CreateCheckinRequest, MassFollowUpCandidate,
    MassFollowUpCandidatesRequest, MassFollowUpFailure, MassFollowUpReport,
    MassFollowUpScheduleRequest, PersonKind, PersonRef,
};
use crate::pipeline::PipelineManager;
use crate::services::meetings::MeetingService;
use crate::services::messaging::{EmailSender, SmsGateway};
use crate::utils::errors::{FlockKeeperError, Result};
use crate::utils::logging::{log_leader_action, log_stage_change};

/// Follow-up service for checkins and mass scheduling
#[derive(Clone)]
pub struct FollowUpService {
    db: DatabaseService,
    pipeline: PipelineManager,
    meetings: MeetingService,
    email: Arc<dyn EmailSender>,
    sms: Arc<dyn SmsGateway>,
    i18n: Arc<I18n>,
}

impl FollowUpService {
    /// Create a new FollowUpService instance
    pub fn new(
        db: DatabaseService,
        pipeline: PipelineManager,
        meetings: MeetingService,
        email: Arc<dyn EmailSender>,
        sms: Arc<dyn SmsGateway>,
        i18n: Arc<I18n>,
    ) -> Self {
        Self {
            db,
            pipeline,
            meetings,
            email,
            sms,
            i18n,
        }
    }

    /// Record a follow-up interaction and advance the person's stage
    pub async fn record_checkin(
        &self,
        church_id: i64,
        leader_id: i64,
        request: CreateCheckinRequest,
    ) -> Result<Checkin> {
        if request.create_meeting_link && request.scheduled_for.is_none() {
            return Err(FlockKeeperError::Validation {
                field: "scheduled_for".to_string(),
                message: "a scheduled date is required to create a meeting link".to_string(),
            });
        }

        let (current_stage, _) = self
            .db
            .person_stage(church_id, request.person_kind, request.person_id)
            .await?
            .ok_or(match request.person_kind {
                PersonKind::Convert => FlockKeeperError::ConvertNotFound {
                    id: request.person_id,
                },
                PersonKind::NewMember => FlockKeeperError::NewMemberNotFound {
                    id: request.person_id,
                },
            })?;

        let meeting_link = if request.create_meeting_link {
            Some(self.meeting_link_for(church_id).await?)
        } else {
            None
        };

        let checkin = self
            .db
            .checkins
            .create(
                church_id,
                request.person_kind,
                request.person_id,
                request.outcome,
                request.completed_visit,
                request.note.as_deref(),
                request.scheduled_for,
                meeting_link.as_deref(),
                leader_id,
            )
            .await?;

        let next_stage = self.pipeline.after_checkin(
            request.person_kind,
            current_stage,
            request.outcome,
            request.completed_visit,
            request.scheduled_for.is_some(),
        )?;

        if next_stage != current_stage {
            self.db
                .set_person_stage(church_id, request.person_kind, request.person_id, next_stage)
                .await?;
            log_stage_change(
                request.person_kind.as_str(),
                request.person_id,
                current_stage.label(),
                next_stage.label(),
            );
        }

        info!(
            church_id = church_id,
            leader_id = leader_id,
            person_kind = request.person_kind.as_str(),
            person_id = request.person_id,
            checkin_id = checkin.id,
            "Checkin recorded"
        );

        Ok(checkin)
    }

    /// Follow-up history for one person, newest first
    pub async fn history(
        &self,
        church_id: i64,
        kind: PersonKind,
        person_id: i64,
    ) -> Result<Vec<Checkin>> {
        self.db
            .person_stage(church_id, kind, person_id)
            .await?
            .ok_or(match kind {
                PersonKind::Convert => FlockKeeperError::ConvertNotFound { id: person_id },
                PersonKind::NewMember => FlockKeeperError::NewMemberNotFound { id: person_id },
            })?;

        self.db.checkins.list_for_person(church_id, kind, person_id).await
    }

    /// Candidate recipients for a mass follow-up batch
    pub async fn candidates(
        &self,
        church_id: i64,
        request: MassFollowUpCandidatesRequest,
    ) -> Result<Vec<MassFollowUpCandidate>> {
        if let Some(stage) = request.stage {
            if !self.pipeline.stage_in_track(request.track, stage) {
                return Err(FlockKeeperError::Validation {
                    field: "stage".to_string(),
                    message: format!("{:?} is not a stage of this track", stage),
                });
            }
        }

        debug!(church_id = church_id, track = request.track.as_str(), "Fetching mass follow-up candidates");
        self.db
            .checkins
            .mass_candidates(church_id, request.track, request.stage, request.not_contacted_since)
            .await
    }

    /// Schedule the same follow-up for every selected person, recording
    /// per-person success and failure without aborting the batch.
    pub async fn mass_schedule(
        &self,
        church_id: i64,
        leader_id: i64,
        request: MassFollowUpScheduleRequest,
    ) -> Result<MassFollowUpReport> {
        if request.people.is_empty() {
            return Err(FlockKeeperError::Validation {
                field: "people".to_string(),
                message: "select at least one person".to_string(),
            });
        }
        if request.scheduled_for <= Utc::now() {
            return Err(FlockKeeperError::Validation {
                field: "scheduled_for".to_string(),
                message: "must be in the future".to_string(),
            });
        }

        let church = self
            .db
            .churches
            .find_by_id(church_id)
            .await?
            .ok_or(FlockKeeperError::RecordNotFound { entity: "Church", id: church_id })?;

        let total = request.people.len();
        let mut scheduled = Vec::new();
        let mut failures = Vec::new();

        for person in &request.people {
            match self
                .schedule_one(church_id, leader_id, *person, &request, &church.slug, &church.language_code)
                .await
            {
                Ok(()) => scheduled.push(*person),
                Err(e) => {
                    warn!(
                        church_id = church_id,
                        person_kind = person.kind.as_str(),
                        person_id = person.id,
                        error = %e,
                        "Mass follow-up entry failed"
                    );
                    failures.push(MassFollowUpFailure {
                        kind: person.kind,
                        id: person.id,
                        reason: e.to_string(),
                    });
                }
            }
        }

        info!(
            church_id = church_id,
            leader_id = leader_id,
            total = total,
            scheduled = scheduled.len(),
            failed = failures.len(),
            "Mass follow-up batch completed"
        );
        log_leader_action(
            leader_id,
            church_id,
            "mass_followup_schedule",
            request.note.as_deref(),
        );

        Ok(MassFollowUpReport {
            total,
            scheduled,
            failures,
        })
    }

    /// Schedule the follow-up for a single batch entry
    async fn schedule_one(
        &self,
        church_id: i64,
        leader_id: i64,
        person: PersonRef,
        request: &MassFollowUpScheduleRequest,
        church_slug: &str,
        language: &str,
    ) -> Result<()> {
        let (current_stage, _) = self
            .db
            .person_stage(church_id, person.kind, person.id)
            .await?
            .ok_or(match person.kind {
                PersonKind::Convert => FlockKeeperError::ConvertNotFound { id: person.id },
                PersonKind::NewMember => FlockKeeperError::NewMemberNotFound { id: person.id },
            })?;

        if current_stage.is_terminal() {
            return Err(FlockKeeperError::InvalidStageTransition {
                from: current_stage.label().to_string(),
                to: "Visit Scheduled".to_string(),
            });
        }

        let meeting_link = if request.create_meeting_links {
            Some(self.meetings.create_link(church_slug))
        } else {
            None
        };

        self.db
            .checkins
            .create(
                church_id,
                person.kind,
                person.id,
                CheckinOutcome::Scheduled,
                false,
                request.note.as_deref(),
                Some(request.scheduled_for),
                meeting_link.as_deref(),
                leader_id,
            )
            .await?;

        let next_stage = self.pipeline.after_checkin(
            person.kind,
            current_stage,
            CheckinOutcome::Scheduled,
            false,
            true,
        )?;
        if next_stage != current_stage {
            self.db
                .set_person_stage(church_id, person.kind, person.id, next_stage)
                .await?;
            log_stage_change(
                person.kind.as_str(),
                person.id,
                current_stage.label(),
                next_stage.label(),
            );
        }

        if request.notify {
            self.send_reminder(church_id, person, request, meeting_link.as_deref(), language)
                .await;
        }

        Ok(())
    }

    /// Best-effort localized reminder to the person's preferred channel.
    /// Delivery problems never fail the batch entry.
    async fn send_reminder(
        &self,
        church_id: i64,
        person: PersonRef,
        request: &MassFollowUpScheduleRequest,
        meeting_link: Option<&str>,
        language: &str,
    ) {
        let contact = match self.person_contact(church_id, person).await {
            Ok(contact) => contact,
            Err(e) => {
                warn!(person_id = person.id, error = %e, "Could not load contact for reminder");
                return;
            }
        };

        let mut params = HashMap::new();
        params.insert("first_name".to_string(), contact.first_name.clone());
        params.insert(
            "date".to_string(),
            request.scheduled_for.format("%Y-%m-%d %H:%M UTC").to_string(),
        );
        params.insert(
            "link".to_string(),
            meeting_link.unwrap_or_default().to_string(),
        );

        let body = self.i18n.t("followup.reminder", language, Some(&params));

        if let Some(phone) = &contact.phone {
            if let Err(e) = self.sms.send_sms(phone, &body, None).await {
                warn!(person_id = person.id, error = %e, "Reminder SMS failed");
            }
        } else if let Some(email) = &contact.email {
            let subject = self.i18n.t("followup.reminder_subject", language, None);
            if let Err(e) = self.email.send_email(email, &subject, &body).await {
                warn!(person_id = person.id, error = %e, "Reminder email failed");
            }
        } else {
            debug!(person_id = person.id, "Person has no contact details, skipping reminder");
        }
    }

    async fn person_contact(&self, church_id: i64, person: PersonRef) -> Result<PersonContact> {
        match person.kind {
            PersonKind::Convert => {
                let convert = self
                    .db
                    .converts
                    .find_by_id(church_id, person.id)
                    .await?
                    .ok_or(FlockKeeperError::ConvertNotFound { id: person.id })?;
                Ok(PersonContact {
                    first_name: convert.first_name,
                    email: convert.email,
                    phone: convert.phone,
                })
            }
            PersonKind::NewMember => {
                let member = self
                    .db
                    .new_members
                    .find_by_id(church_id, person.id)
                    .await?
                    .ok_or(FlockKeeperError::NewMemberNotFound { id: person.id })?;
                Ok(PersonContact {
                    first_name: member.first_name,
                    email: member.email,
                    phone: member.phone,
                })
            }
        }
    }

    async fn meeting_link_for(&self, church_id: i64) -> Result<String> {
        let church = self
            .db
            .churches
            .find_by_id(church_id)
            .await?
            .ok_or(FlockKeeperError::RecordNotFound { entity: "Church", id: church_id })?;
        Ok(self.meetings.create_link(&church.slug))
    }
}

struct PersonContact {
    first_name: String,
    email: Option<String>,
    phone: Option<String>,
}
