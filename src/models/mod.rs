//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod announcement;
pub mod checkin;
pub mod church;
pub mod convert;
pub mod guest;
pub mod leader;
pub mod member;
pub mod new_member;
pub mod prayer;

// Re-export commonly used models
pub use announcement::{
    Announcement, AnnouncementChannel, AnnouncementStatus, CreateAnnouncementRequest,
    DispatchReport, Recipient, RecipientGroup, ScheduleAnnouncementRequest,
    SendAnnouncementRequest,
};
pub use checkin::{
    Checkin, CheckinOutcome, CreateCheckinRequest, MassFollowUpCandidate,
    MassFollowUpCandidatesRequest, MassFollowUpFailure, MassFollowUpReport,
    MassFollowUpScheduleRequest, PersonKind, PersonRef,
};
pub use church::{Church, CreateChurchRequest};
pub use convert::{Convert, CreateConvertRequest, UpdateConvertRequest};
pub use guest::{CreateGuestRequest, Guest, UpdateGuestRequest};
pub use leader::{CreateLeaderRequest, Leader, LeaderRole, LoginRequest, LoginResponse};
pub use member::{CreateMemberRequest, Member, UpdateMemberRequest};
pub use new_member::{CreateNewMemberRequest, NewMember, UpdateNewMemberRequest};
pub use prayer::{CreatePrayerRequest, PrayerRequest, UpdatePrayerRequest};
