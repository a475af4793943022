//! Fake data builders for tests

use chrono::NaiveDate;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;

use FlockKeeper::models::announcement::{AnnouncementChannel, CreateAnnouncementRequest, RecipientGroup};
use FlockKeeper::models::convert::CreateConvertRequest;
use FlockKeeper::models::guest::CreateGuestRequest;
use FlockKeeper::models::member::CreateMemberRequest;
use FlockKeeper::models::new_member::CreateNewMemberRequest;

pub fn convert_request() -> CreateConvertRequest {
    CreateConvertRequest {
        first_name: FirstName().fake(),
        last_name: LastName().fake(),
        email: Some(SafeEmail().fake()),
        phone: Some("+1 (555) 867-5309".to_string()),
        decision_date: NaiveDate::from_ymd_opt(2025, 2, 16).unwrap(),
        assigned_leader_id: None,
        notes: None,
    }
}

pub fn new_member_request() -> CreateNewMemberRequest {
    CreateNewMemberRequest {
        first_name: FirstName().fake(),
        last_name: LastName().fake(),
        email: Some(SafeEmail().fake()),
        phone: Some("+1 (555) 201-4455".to_string()),
        joined_date: NaiveDate::from_ymd_opt(2025, 1, 12).unwrap(),
        assigned_leader_id: None,
        notes: Some("Met at the welcome lunch".to_string()),
    }
}

pub fn member_request() -> CreateMemberRequest {
    CreateMemberRequest {
        first_name: FirstName().fake(),
        last_name: LastName().fake(),
        email: Some(SafeEmail().fake()),
        phone: None,
        membership_date: NaiveDate::from_ymd_opt(2019, 6, 1).unwrap(),
    }
}

pub fn guest_request() -> CreateGuestRequest {
    CreateGuestRequest {
        first_name: FirstName().fake(),
        last_name: LastName().fake(),
        email: Some(SafeEmail().fake()),
        phone: None,
        visit_date: NaiveDate::from_ymd_opt(2025, 3, 9).unwrap(),
        invited_by: Some("A friend".to_string()),
    }
}

pub fn email_announcement() -> CreateAnnouncementRequest {
    CreateAnnouncementRequest {
        subject: "Spring picnic".to_string(),
        body: "Bring a dish to share after the second service.".to_string(),
        channel: AnnouncementChannel::Email,
        media_url: None,
        audiences: vec![RecipientGroup::Members, RecipientGroup::NewMembers],
    }
}
