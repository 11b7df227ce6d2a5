mod common;

use common::signed_in;
use qrportal_client::EventCategory;
use qrportal_console::{
    msg, ConsoleError, CreateEventTypeReq, DeleteEventTypeReq, EventTypeForm, Level, Phase,
    UpdateEventTypeReq,
};

const GENERAL_ADMIN: u32 = 191;

fn update_coins(name: &str, coins: u32) -> UpdateEventTypeReq {
    UpdateEventTypeReq {
        name: name.into(),
        description: None,
        default_coins: Some(coins),
    }
}

#[tokio::test]
async fn list_loads_all_categories() {
    let (_, console) = signed_in(&[GENERAL_ADMIN]).await;
    console.load_event_types().await.unwrap();

    let slice = console.event_types();
    assert_eq!(slice.status.phase, Phase::Success);
    assert_eq!(slice.event_types.len(), 3);
    assert_eq!(slice.system().count(), 2);
    assert_eq!(slice.general().count(), 1);
}

// ── Create ──

#[tokio::test]
async fn create_is_always_general() {
    let (api, console) = signed_in(&[GENERAL_ADMIN]).await;
    console.load_event_types().await.unwrap();

    let created = console
        .create_event_type(CreateEventTypeReq {
            name: "  Raffle ".into(),
            description: Some("Prize draw".into()),
            default_coins: 7,
        })
        .await
        .unwrap();
    assert_eq!(created.event_type_name, "Raffle");
    assert_eq!(created.category, EventCategory::General);
    assert_eq!(
        api.stored_event_type("Raffle").unwrap().category,
        EventCategory::General
    );
    assert!(console.event_types().find("Raffle").is_some());
    assert_eq!(console.take_notifications()[0].message, msg::EVENT_TYPE_CREATED);
}

#[tokio::test]
async fn create_duplicate_is_a_conflict() {
    let (_, console) = signed_in(&[GENERAL_ADMIN]).await;
    let err = console
        .create_event_type(CreateEventTypeReq {
            name: "Swag".into(),
            description: None,
            default_coins: 1,
        })
        .await
        .unwrap_err();
    assert_eq!(err, ConsoleError::Conflict(msg::DUPLICATE_EVENT_TYPE.into()));
    assert_eq!(console.event_types().mutation.phase, Phase::Failed);
}

#[tokio::test]
async fn create_validates_before_calling() {
    let (api, console) = signed_in(&[GENERAL_ADMIN]).await;
    let form = EventTypeForm {
        name: "x".repeat(101),
        description: String::new(),
        default_coins: 1,
    };
    assert!(form.validate_create().is_err());

    let err = console
        .create_event_type(CreateEventTypeReq {
            name: "x".repeat(101),
            description: None,
            default_coins: 1,
        })
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ConsoleError::Validation("Event type name must be less than 100 characters".into())
    );
    assert!(!api.calls().contains(&"create_event_type"));
}

// ── Update ──

#[tokio::test]
async fn update_keeps_category() {
    let (api, console) = signed_in(&[GENERAL_ADMIN]).await;
    console.load_event_types().await.unwrap();

    let updated = console.update_event_type(update_coins("Swag", 9)).await.unwrap();
    assert_eq!(updated.category, EventCategory::General);
    assert_eq!(updated.default_coins, 9);

    let stored = console.event_types().find("Swag").cloned().unwrap();
    assert_eq!(stored.category, EventCategory::General);
    assert_eq!(stored.default_coins, 9);
    assert_eq!(api.stored_event_type("Swag").unwrap().category, EventCategory::General);
}

#[tokio::test]
async fn system_types_accept_coin_and_description_edits() {
    let (api, console) = signed_in(&[GENERAL_ADMIN]).await;
    console.load_event_types().await.unwrap();

    let updated = console
        .update_event_type(UpdateEventTypeReq {
            name: "SESSION".into(),
            description: Some("Attend a talk".into()),
            default_coins: None,
        })
        .await
        .unwrap();
    assert_eq!(updated.category, EventCategory::Session);
    assert_eq!(updated.default_coins, 10);
    assert_eq!(updated.description.as_deref(), Some("Attend a talk"));
    assert_eq!(api.stored_event_type("SESSION").unwrap().category, EventCategory::Session);
}

#[tokio::test]
async fn update_unknown_type_is_not_found() {
    let (api, console) = signed_in(&[GENERAL_ADMIN]).await;
    console.load_event_types().await.unwrap();

    let err = console
        .update_event_type(update_coins("Nope", 1))
        .await
        .unwrap_err();
    assert_eq!(err, ConsoleError::NotFound(msg::EVENT_TYPE_NOT_FOUND.into()));
    assert_eq!(console.event_types().mutation.phase, Phase::Failed);
    assert!(console.take_notifications().is_empty());
    assert!(!api.calls().contains(&"update_event_type"));
}

// ── Delete ──

#[tokio::test]
async fn system_types_cannot_be_deleted() {
    let (api, console) = signed_in(&[GENERAL_ADMIN]).await;
    console.load_event_types().await.unwrap();

    for name in ["SESSION", "O2BAR"] {
        let err = console.delete_event_type(name).await.unwrap_err();
        assert_eq!(err, ConsoleError::ReadOnly(msg::SYSTEM_EVENT_TYPE.into()));
    }
    assert!(!api.calls().contains(&"delete_event_type"));
    assert_eq!(console.event_types().event_types.len(), 3);

    let notes = console.take_notifications();
    assert_eq!(notes.len(), 2);
    assert!(notes.iter().all(|n| n.level == Level::Error));
}

#[tokio::test]
async fn delete_general_type() {
    let (api, console) = signed_in(&[GENERAL_ADMIN]).await;
    console.load_event_types().await.unwrap();

    console
        .flux()
        .emit(
            DeleteEventTypeReq::PATH,
            DeleteEventTypeReq {
                name: "Swag".into(),
            },
        )
        .await;

    assert!(console.event_types().find("Swag").is_none());
    assert!(api.stored_event_type("Swag").is_none());
    assert_eq!(console.take_notifications()[0].message, msg::EVENT_TYPE_DELETED);
}

#[tokio::test]
async fn list_failure_keeps_previous_entries() {
    let (api, console) = signed_in(&[GENERAL_ADMIN]).await;
    console.load_event_types().await.unwrap();
    api.fail("list_event_types", 500);

    let err = console.load_event_types().await.unwrap_err();
    assert_eq!(err, ConsoleError::Network(msg::FETCH_EVENT_TYPES.into()));
    let slice = console.event_types();
    assert_eq!(slice.status.phase, Phase::Failed);
    assert_eq!(slice.event_types.len(), 3);
}
