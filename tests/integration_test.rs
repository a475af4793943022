//! Database-backed integration tests
//!
//! These suites run against the database named by `TEST_DATABASE_URL` and
//! skip cleanly when it is not configured.

mod helpers;

use chrono::{Duration, Utc};
use serial_test::serial;

use helpers::database_helper::TestDatabase;
use helpers::{test_settings, test_state};
use FlockKeeper::models::checkin::{CheckinOutcome, CreateCheckinRequest, PersonKind};
use FlockKeeper::models::convert::UpdateConvertRequest;
use FlockKeeper::models::leader::LoginRequest;
use FlockKeeper::models::prayer::CreatePrayerRequest;
use FlockKeeper::pipeline::FollowUpStage;

#[tokio::test]
#[serial]
async fn test_convert_lifecycle_and_pipeline() {
    let Some(db) = TestDatabase::connect().await else {
        return;
    };
    let state = test_state(db.pool.clone(), test_settings());
    let services = &state.services;
    let (church, leader) = db.seed_church(services).await;

    // Create enters the pipeline at NEW, with the phone normalized
    let convert = services
        .convert_service
        .create(church.id, helpers::test_data::convert_request())
        .await
        .unwrap();
    assert_eq!(convert.stage, FollowUpStage::New);
    assert_eq!(convert.phone.as_deref(), Some("+15558675309"));

    // First contact without a schedule moves NEW -> CONTACTED
    services
        .followup_service
        .record_checkin(
            church.id,
            leader.id,
            CreateCheckinRequest {
                person_kind: PersonKind::Convert,
                person_id: convert.id,
                outcome: CheckinOutcome::LeftMessage,
                completed_visit: false,
                note: Some("Left a voicemail".to_string()),
                scheduled_for: None,
                create_meeting_link: false,
            },
        )
        .await
        .unwrap();
    let convert = services.convert_service.get(church.id, convert.id).await.unwrap();
    assert_eq!(convert.stage, FollowUpStage::Contacted);

    // Scheduling a visit moves to SCHEDULED and can attach a meeting link
    let checkin = services
        .followup_service
        .record_checkin(
            church.id,
            leader.id,
            CreateCheckinRequest {
                person_kind: PersonKind::Convert,
                person_id: convert.id,
                outcome: CheckinOutcome::Connected,
                completed_visit: false,
                note: None,
                scheduled_for: Some(Utc::now() + Duration::days(3)),
                create_meeting_link: true,
            },
        )
        .await
        .unwrap();
    assert!(checkin.meeting_link.as_deref().unwrap().contains("grace-chapel-"));
    let convert = services.convert_service.get(church.id, convert.id).await.unwrap();
    assert_eq!(convert.stage, FollowUpStage::Scheduled);

    // Completed connected visits walk the completion ladder to the end
    for expected in [
        FollowUpStage::FirstCompleted,
        FollowUpStage::SecondCompleted,
        FollowUpStage::FinalCompleted,
    ] {
        services
            .followup_service
            .record_checkin(
                church.id,
                leader.id,
                CreateCheckinRequest {
                    person_kind: PersonKind::Convert,
                    person_id: convert.id,
                    outcome: CheckinOutcome::Connected,
                    completed_visit: true,
                    note: None,
                    scheduled_for: None,
                    create_meeting_link: false,
                },
            )
            .await
            .unwrap();
        let convert = services.convert_service.get(church.id, convert.id).await.unwrap();
        assert_eq!(convert.stage, expected);
    }

    // History returns all five checkins, newest first
    let history = services
        .followup_service
        .history(church.id, PersonKind::Convert, convert.id)
        .await
        .unwrap();
    assert_eq!(history.len(), 5);
    assert!(history.windows(2).all(|w| w[0].created_at >= w[1].created_at));

    // Partial update leaves unset fields untouched
    let updated = services
        .convert_service
        .update(
            church.id,
            convert.id,
            UpdateConvertRequest {
                notes: Some("Baptism class scheduled".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.first_name, convert.first_name);
    assert_eq!(updated.notes.as_deref(), Some("Baptism class scheduled"));
}

#[tokio::test]
#[serial]
async fn test_login_and_search() {
    let Some(db) = TestDatabase::connect().await else {
        return;
    };
    let state = test_state(db.pool.clone(), test_settings());
    let services = &state.services;
    let (church, _leader) = db.seed_church(services).await;

    // Login with the seeded credentials issues a verifiable token
    let login = services
        .auth_service
        .login(LoginRequest {
            email: "pat@gracechapel.org".to_string(),
            access_code: "open-sesame".to_string(),
        })
        .await
        .unwrap();
    let context = services.auth_service.verify_token(&login.token).unwrap();
    assert_eq!(context.church_id, church.id);

    // Wrong access code is rejected
    assert!(services
        .auth_service
        .login(LoginRequest {
            email: "pat@gracechapel.org".to_string(),
            access_code: "wrong".to_string(),
        })
        .await
        .is_err());

    // Search narrows the converts list
    let mut named = helpers::test_data::convert_request();
    named.first_name = "Magdalena".to_string();
    services.convert_service.create(church.id, named).await.unwrap();
    services
        .convert_service
        .create(church.id, helpers::test_data::convert_request())
        .await
        .unwrap();

    let found = services
        .convert_service
        .list(church.id, Some("magdal"), None, None, None)
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].first_name, "Magdalena");
}

#[tokio::test]
#[serial]
async fn test_prayer_requests() {
    let Some(db) = TestDatabase::connect().await else {
        return;
    };
    let state = test_state(db.pool.clone(), test_settings());
    let services = &state.services;
    let (church, _leader) = db.seed_church(services).await;

    let prayer = services
        .prayer_service
        .create(
            church.id,
            CreatePrayerRequest {
                requester_name: "Ruth A.".to_string(),
                contact: None,
                request: "Healing after surgery".to_string(),
            },
        )
        .await
        .unwrap();
    assert!(!prayer.answered);

    services.prayer_service.mark_answered(church.id, prayer.id).await.unwrap();

    let open = services
        .prayer_service
        .list(church.id, Some(false), None, None)
        .await
        .unwrap();
    assert!(open.is_empty());

    let answered = services
        .prayer_service
        .list(church.id, Some(true), None, None)
        .await
        .unwrap();
    assert_eq!(answered.len(), 1);
}

#[tokio::test]
#[serial]
async fn test_announcement_send_and_scheduled_dispatch() {
    let Some(db) = TestDatabase::connect().await else {
        return;
    };
    let state = test_state(db.pool.clone(), test_settings());
    let services = &state.services;
    let (church, leader) = db.seed_church(services).await;

    // Two members with email, one guest without
    for _ in 0..2 {
        services
            .directory_service
            .create_member(church.id, helpers::test_data::member_request())
            .await
            .unwrap();
    }
    let mut guest = helpers::test_data::guest_request();
    guest.email = None;
    services.directory_service.create_guest(church.id, guest).await.unwrap();

    // Immediate send delivers to everyone with a usable address; delivery is
    // console-mode in tests so every attempt succeeds
    let report = services
        .announcement_service
        .send_now(
            church.id,
            leader.id,
            FlockKeeper::models::announcement::SendAnnouncementRequest {
                announcement_id: None,
                draft: Some(helpers::test_data::email_announcement()),
            },
        )
        .await
        .unwrap();
    assert_eq!(report.sent, 2);
    assert_eq!(report.failed, 0);

    let sent = services
        .announcement_service
        .get(church.id, report.announcement_id)
        .await
        .unwrap();
    assert_eq!(sent.sent_count, 2);
    assert!(sent.sent_at.is_some());

    // A draft scheduled in the past (written through the repository, since
    // the service refuses past times) is picked up by the dispatch loop
    let draft = services
        .announcement_service
        .create_draft(church.id, leader.id, helpers::test_data::email_announcement())
        .await
        .unwrap();
    services
        .db
        .announcements
        .schedule(church.id, draft.id, Utc::now() - Duration::minutes(5))
        .await
        .unwrap();

    let dispatched = services.announcement_service.run_scheduled_dispatch().await.unwrap();
    assert_eq!(dispatched, 1);

    let dispatched_row = services
        .announcement_service
        .get(church.id, draft.id)
        .await
        .unwrap();
    assert_eq!(dispatched_row.sent_count, 2);
}
