//! Services module
//!
//! This module contains business logic services

pub mod announcements;
pub mod auth;
pub mod converts;
pub mod directory;
pub mod export;
pub mod followup;
pub mod meetings;
pub mod messaging;
pub mod new_members;
pub mod prayer;

// Re-export commonly used services
pub use announcements::AnnouncementService;
pub use auth::{AuthContext, AuthService, Claims};
pub use converts::ConvertService;
pub use directory::DirectoryService;
pub use export::ExportService;
pub use followup::FollowUpService;
pub use meetings::MeetingService;
pub use messaging::{
    ConsoleEmailSender, ConsoleSmsGateway, EmailSender, HttpEmailSender, HttpSmsGateway,
    SmsGateway,
};
pub use new_members::NewMemberService;
pub use prayer::PrayerService;

use std::sync::Arc;

use crate::config::settings::Settings;
use crate::database::{connection, DatabasePool, DatabaseService};
use crate::i18n::I18n;
use crate::pipeline::PipelineManager;
use crate::utils::errors::Result;

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub auth_service: AuthService,
    pub convert_service: ConvertService,
    pub new_member_service: NewMemberService,
    pub directory_service: DirectoryService,
    pub prayer_service: PrayerService,
    pub followup_service: FollowUpService,
    pub announcement_service: AnnouncementService,
    pub export_service: ExportService,
    pub pipeline: PipelineManager,
    pub db: DatabaseService,
    pool: DatabasePool,
    settings: Settings,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(
        settings: Settings,
        pool: DatabasePool,
        i18n: Arc<I18n>,
    ) -> Result<Self> {
        let db = DatabaseService::new(pool.clone());
        let pipeline = PipelineManager::new();

        let email: Arc<dyn EmailSender> = if settings.features.deliver_messages {
            Arc::new(HttpEmailSender::new(settings.email.clone())?)
        } else {
            Arc::new(ConsoleEmailSender)
        };
        let sms: Arc<dyn SmsGateway> = if settings.features.deliver_messages {
            Arc::new(HttpSmsGateway::new(settings.sms.clone())?)
        } else {
            Arc::new(ConsoleSmsGateway)
        };

        let meetings = MeetingService::new(&settings.meetings)?;

        let auth_service = AuthService::new(db.leaders.clone(), settings.clone());
        let convert_service = ConvertService::new(db.converts.clone(), pipeline.clone());
        let new_member_service = NewMemberService::new(db.new_members.clone(), pipeline.clone());
        let directory_service = DirectoryService::new(db.members.clone(), db.guests.clone());
        let prayer_service = PrayerService::new(db.prayers.clone());
        let followup_service = FollowUpService::new(
            db.clone(),
            pipeline.clone(),
            meetings,
            email.clone(),
            sms.clone(),
            i18n,
        );
        let announcement_service = AnnouncementService::new(db.clone(), email, sms);
        let export_service = ExportService::new();

        Ok(Self {
            auth_service,
            convert_service,
            new_member_service,
            directory_service,
            prayer_service,
            followup_service,
            announcement_service,
            export_service,
            pipeline,
            db,
            pool,
            settings,
        })
    }

    /// Health check for all services
    pub async fn health_check(&self) -> ServiceHealthStatus {
        let database_healthy = connection::health_check(&self.pool).await.is_ok();

        ServiceHealthStatus {
            database_healthy,
            delivery_enabled: self.settings.features.deliver_messages,
            scheduled_dispatch_enabled: self.settings.features.scheduled_dispatch,
        }
    }
}

/// Health status for all services
#[derive(Debug, Clone, serde::Serialize)]
pub struct ServiceHealthStatus {
    pub database_healthy: bool,
    pub delivery_enabled: bool,
    pub scheduled_dispatch_enabled: bool,
}

impl ServiceHealthStatus {
    /// Check if all critical services are healthy
    pub fn is_healthy(&self) -> bool {
        self.database_healthy
    }

    /// Get list of unhealthy services
    pub fn get_issues(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if !self.database_healthy {
            issues.push("Database connection failed".to_string());
        }

        issues
    }
}
