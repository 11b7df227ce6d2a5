mod common;

use std::time::Duration;

use common::{signed_in, FakeApi, USER_EMAIL};
use qrportal_client::{CreateQrCodePayload, EventCategory, QrCodeInfo};
use qrportal_console::{msg, ConsoleError, Level, ListQrReq, Phase};

const EMPLOYEE: u32 = 171;

fn o2bar(email: &str, coins: u32) -> CreateQrCodePayload {
    CreateQrCodePayload {
        info: QrCodeInfo::O2bar {
            email: email.into(),
        },
        description: None,
        coins,
    }
}

// ── List ──

#[tokio::test]
async fn first_page_of_twenty_five() {
    let (_, console) = signed_in(&[EMPLOYEE]).await;
    console.list_qr_codes(10, 0).await.unwrap();

    let qr = console.qr();
    assert_eq!(qr.qr_codes.len(), 10);
    assert_eq!(qr.total_count, 25);
    assert_eq!(qr.status.phase, Phase::Success);
    assert_eq!(console.page_view().page_count(), 3);
    assert_eq!(console.page_view().label(), "Showing 1-10 of 25 QR codes");
}

#[tokio::test]
async fn list_replaces_the_window() {
    let (_, console) = signed_in(&[EMPLOYEE]).await;
    console.list_qr_codes(10, 0).await.unwrap();
    console.go_to_page(2).await.unwrap();

    let qr = console.qr();
    assert_eq!(qr.offset, 20);
    assert_eq!(qr.page_index(), 2);
    let ids: Vec<_> = qr.qr_codes.iter().map(|q| q.qr_id.as_str()).collect();
    assert_eq!(ids, vec!["qr-21", "qr-22", "qr-23", "qr-24", "qr-25"]);
}

#[tokio::test(start_paused = true)]
async fn newer_list_wins_when_older_finishes_last() {
    let (api, console) = signed_in(&[EMPLOYEE]).await;
    api.delay_lists(&[Duration::from_millis(500), Duration::from_millis(10)]);

    let (first, second) = tokio::join!(console.list_qr_codes(10, 0), console.list_qr_codes(10, 10));

    assert_eq!(first, Err(ConsoleError::Cancelled));
    assert_eq!(second, Ok(()));
    let qr = console.qr();
    assert_eq!(qr.offset, 10);
    assert_eq!(qr.qr_codes[0].qr_id, "qr-11");
    assert!(console.take_notifications().is_empty());
}

#[tokio::test]
async fn far_page_number_gives_an_empty_window() {
    let (_, console) = signed_in(&[EMPLOYEE]).await;
    console.list_qr_codes(10, 0).await.unwrap();

    console.go_to_page(usize::MAX / 2).await.unwrap();

    let qr = console.qr();
    assert!(qr.qr_codes.is_empty());
    assert_eq!(qr.total_count, 25);
    assert!(!console.page_view().has_next());
}

#[tokio::test]
async fn page_size_change_returns_to_first_page() {
    let (_, console) = signed_in(&[EMPLOYEE]).await;
    console.list_qr_codes(10, 20).await.unwrap();
    console.set_page_size(5).await.unwrap();

    let view = console.page_view();
    assert_eq!((view.limit, view.offset), (5, 0));
    assert_eq!(console.qr().qr_codes.len(), 5);

    assert!(matches!(
        console.set_page_size(7).await,
        Err(ConsoleError::Validation(_))
    ));
}

#[tokio::test]
async fn list_failure_is_reported() {
    let (api, console) = signed_in(&[EMPLOYEE]).await;
    api.fail("list_qr_codes", 503);

    let err = console.list_qr_codes(10, 0).await.unwrap_err();
    assert_eq!(err, ConsoleError::Network(msg::FETCH_QR_CODES.into()));
    assert_eq!(console.qr().status.phase, Phase::Failed);

    let notes = console.take_notifications();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].level, Level::Error);
    assert_eq!(notes[0].message, msg::FETCH_QR_CODES);

    // Retry is a fresh call.
    api.clear_failures();
    console.refresh().await.unwrap();
    assert_eq!(console.qr().status.phase, Phase::Success);
}

#[tokio::test]
async fn unauthorized_list_ends_the_session() {
    let (api, console) = signed_in(&[EMPLOYEE]).await;
    api.fail("list_qr_codes", 401);

    let err = console.list_qr_codes(10, 0).await.unwrap_err();
    assert!(matches!(err, ConsoleError::Authorization(_)));
    assert!(!console.auth().is_authenticated());
    assert!(console.menu().paths.is_empty());
}

#[tokio::test]
async fn list_through_the_router() {
    let (_, console) = signed_in(&[EMPLOYEE]).await;
    console
        .flux()
        .emit(ListQrReq::PATH, ListQrReq { limit: 5, offset: 5 })
        .await;

    let qr = console.qr();
    assert_eq!(qr.qr_codes.len(), 5);
    assert_eq!(qr.qr_codes[0].qr_id, "qr-06");
}

// ── Create ──

#[tokio::test]
async fn create_returns_id_without_touching_window() {
    let (api, console) = signed_in(&[EMPLOYEE]).await;
    console.list_qr_codes(10, 0).await.unwrap();
    let before = console.qr();

    let qr_id = console.create_qr_code(o2bar("new@example.com", 5)).await.unwrap();

    let after = console.qr();
    assert_eq!(after.qr_codes, before.qr_codes);
    assert_eq!(after.total_count, 25);
    assert_eq!(after.last_created.as_deref(), Some(qr_id.as_str()));
    assert_eq!(api.qr_count(), 26);

    let notes = console.take_notifications();
    assert_eq!(notes[0].level, Level::Success);
    assert_eq!(notes[0].message, msg::QR_CREATED);

    console.refresh().await.unwrap();
    assert_eq!(console.qr().total_count, 26);
}

#[tokio::test]
async fn create_400_is_a_conflict() {
    let (api, console) = signed_in(&[EMPLOYEE]).await;
    api.fail("create_qr_code", 400);

    let err = console.create_qr_code(o2bar("a@b.com", 5)).await.unwrap_err();
    assert_eq!(err, ConsoleError::Conflict(msg::DUPLICATE_QR_CODE.into()));
    assert_eq!(console.qr().create.phase, Phase::Failed);
    assert_eq!(console.take_notifications()[0].message, msg::DUPLICATE_QR_CODE);
}

#[tokio::test]
async fn create_other_failures_are_generic() {
    let (api, console) = signed_in(&[EMPLOYEE]).await;

    api.fail("create_qr_code", 500);
    let err = console.create_qr_code(o2bar("a@b.com", 5)).await.unwrap_err();
    assert_eq!(err, ConsoleError::Network(msg::CREATE_QR_CODE.into()));

    api.fail("create_qr_code", 422);
    let err = console.create_qr_code(o2bar("a@b.com", 5)).await.unwrap_err();
    assert_eq!(err, ConsoleError::Rejected(msg::CREATE_QR_CODE.into()));
}

#[tokio::test]
async fn malformed_info_never_reaches_the_backend() {
    let (api, console) = signed_in(&[EMPLOYEE]).await;

    let err = console.create_qr_code(o2bar("not-an-email", 5)).await.unwrap_err();
    assert_eq!(err, ConsoleError::Validation("Invalid email".into()));
    assert!(!api.calls().contains(&"create_qr_code"));
}

#[tokio::test]
async fn form_submission() {
    let (_, console) = signed_in(&[EMPLOYEE]).await;
    console.load_event_types().await.unwrap();

    let mut form = console.create_form();
    assert_eq!(form.category, Some(EventCategory::O2bar));
    assert_eq!(form.email, USER_EMAIL);
    assert_eq!(form.coins, 5);

    form.email = "guest@example.com".into();
    form.description = "Booth visit".into();
    let qr_id = console.submit_qr_form(&form).await.unwrap();
    assert!(qr_id.starts_with("qr-"));

    form.coins = -3;
    let err = console.submit_qr_form(&form).await.unwrap_err();
    assert_eq!(err, ConsoleError::Validation("Coins must be a positive number".into()));
}

// ── Delete ──

#[tokio::test]
async fn delete_removes_exactly_one() {
    let (api, console) = signed_in(&[EMPLOYEE]).await;
    console.list_qr_codes(10, 0).await.unwrap();

    console.delete_qr_code("qr-03").await.unwrap();
    let qr = console.qr();
    assert_eq!(qr.qr_codes.len(), 9);
    assert_eq!(qr.total_count, 24);
    assert!(qr.qr_codes.iter().all(|q| q.qr_id != "qr-03"));
    assert!(qr.deleting.is_none());
    assert_eq!(api.qr_count(), 24);

    // Already gone: the backend refuses and nothing else moves.
    let err = console.delete_qr_code("qr-03").await.unwrap_err();
    assert_eq!(err, ConsoleError::Rejected(msg::DELETE_QR_CODE.into()));
    let qr = console.qr();
    assert_eq!(qr.total_count, 24);
    assert_eq!(qr.qr_codes.len(), 9);
    assert_eq!(qr.delete.phase, Phase::Failed);
}

#[tokio::test]
async fn only_the_creator_may_delete() {
    let (_, console) = signed_in(&[EMPLOYEE]).await;
    console.list_qr_codes(10, 0).await.unwrap();
    let qr = console.qr().qr_codes[0].clone();
    assert!(console.can_delete(&qr));

    let foreign = qrportal_client::QrCode {
        created_by: "someone@example.com".into(),
        ..qr
    };
    assert!(!console.can_delete(&foreign));
}

// ── Search ──

#[tokio::test]
async fn search_filters_loaded_page_only() {
    let (_, console) = signed_in(&[EMPLOYEE]).await;
    console.list_qr_codes(10, 0).await.unwrap();

    let found = console.search("USER1@");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].qr_id, "qr-01");

    // qr-25 exists but is not on this page.
    assert!(console.search("user25@").is_empty());
    assert_eq!(console.search("").len(), 10);
    assert!(!console.page_view().show_controls(true));
}

#[tokio::test]
async fn sign_in_only_fetches_privileges() {
    let api = FakeApi::new(&[EMPLOYEE]);
    let console = common::console(&api);
    console.sign_in(common::claims()).await.unwrap();
    assert_eq!(api.calls(), vec!["user_info"]);
}
