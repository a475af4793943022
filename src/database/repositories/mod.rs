//! Database repositories module
//!
//! This module contains all repository implementations for data access

pub mod announcement;
pub mod checkin;
pub mod church;
pub mod convert;
pub mod guest;
pub mod leader;
pub mod member;
pub mod new_member;
pub mod prayer;

// Re-export repositories
pub use announcement::AnnouncementRepository;
pub use checkin::CheckinRepository;
pub use church::ChurchRepository;
pub use convert::ConvertRepository;
pub use guest::GuestRepository;
pub use leader::LeaderRepository;
pub use member::MemberRepository;
pub use new_member::NewMemberRepository;
pub use prayer::PrayerRepository;
