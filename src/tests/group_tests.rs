use crate::core::errors::WhoOwesError;
use crate::core::models::member::RESERVED_MEMBER_NAME;
use crate::tests::create_test_service;
use chrono::Utc;
use rust_decimal_macros::dec;
use std::sync::Arc;

#[tokio::test]
async fn test_create_group_with_reserved_member() {
    let service = create_test_service();

    let group = service.create_group("user-1", "  Trip  ").await.unwrap();

    assert_eq!(group.title, "Trip");
    assert_eq!(group.creator_user_id, "user-1");
    assert_eq!(group.members.len(), 1);
    assert_eq!(group.members[0].name, RESERVED_MEMBER_NAME);
    assert!(group.payments.is_empty());

    let stored = service.get_group_details("user-1", &group.id).await.unwrap();
    assert_eq!(stored.id, group.id);
}

#[tokio::test]
async fn test_create_group_rejects_blank_title() {
    let service = create_test_service();

    let result = service.create_group("user-1", "   ").await;
    assert!(matches!(result, Err(WhoOwesError::InvalidInput(field, _)) if field == "title"));
}

#[tokio::test]
async fn test_get_all_groups_returns_only_own_summaries() {
    let service = create_test_service();
    let trip = service.create_group("user-1", "Trip").await.unwrap();
    service.create_group("user-1", "Flat").await.unwrap();
    service.create_group("user-2", "Other").await.unwrap();

    let you = trip.members[0].id.clone();
    service.add_member("user-1", &trip.id, "Alice").await.unwrap();
    service
        .add_payment("user-1", &trip.id, &you, dec!(10), Utc::now(), "Taxi")
        .await
        .unwrap();

    let summaries = service.get_all_groups("user-1").await.unwrap();

    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].title, "Flat");
    assert_eq!(summaries[1].title, "Trip");
    assert_eq!(summaries[1].member_count, 2);
    assert_eq!(summaries[1].payment_count, 1);
}

#[tokio::test]
async fn test_group_access_is_limited_to_creator() {
    let service = create_test_service();
    let group = service.create_group("user-1", "Trip").await.unwrap();

    let result = service.get_group_details("user-2", &group.id).await;
    assert!(matches!(result, Err(WhoOwesError::NotGroupCreator(_))));

    let result = service.get_group_details("user-1", "missing").await;
    assert!(matches!(result, Err(WhoOwesError::GroupNotFound(_))));
}

#[tokio::test]
async fn test_delete_group() {
    let service = create_test_service();
    let group = service.create_group("user-1", "Trip").await.unwrap();

    service.delete_group("user-1", &group.id).await.unwrap();

    let result = service.get_group_details("user-1", &group.id).await;
    assert!(matches!(result, Err(WhoOwesError::GroupNotFound(_))));
}

#[tokio::test]
async fn test_delete_group_with_payments_is_rejected() {
    let service = create_test_service();
    let group = service.create_group("user-1", "Trip").await.unwrap();
    let you = group.members[0].id.clone();
    service
        .add_payment("user-1", &group.id, &you, dec!(1), Utc::now(), "Coffee")
        .await
        .unwrap();

    let result = service.delete_group("user-1", &group.id).await;
    assert!(matches!(result, Err(WhoOwesError::GroupHasPayments(_))));
}

#[tokio::test]
async fn test_add_member() {
    let service = create_test_service();
    let group = service.create_group("user-1", "Trip").await.unwrap();

    let member = service.add_member("user-1", &group.id, "  Alice ").await.unwrap();
    assert_eq!(member.name, "Alice");

    let group = service.get_group_details("user-1", &group.id).await.unwrap();
    assert_eq!(group.members.len(), 2);
    assert!(group.members.iter().any(|m| m.id == member.id));
}

#[tokio::test]
async fn test_add_member_rejects_invalid_names() {
    let service = create_test_service();
    let group = service.create_group("user-1", "Trip").await.unwrap();
    service.add_member("user-1", &group.id, "Alice").await.unwrap();

    let result = service.add_member("user-1", &group.id, " ").await;
    assert!(matches!(result, Err(WhoOwesError::InvalidInput(field, _)) if field == "name"));

    let result = service.add_member("user-1", &group.id, "you").await;
    assert!(matches!(result, Err(WhoOwesError::ReservedMemberName(_))));

    let result = service.add_member("user-1", &group.id, "ALICE").await;
    assert!(matches!(result, Err(WhoOwesError::DuplicateMemberName(_))));
}

#[tokio::test]
async fn test_remove_member() {
    let service = create_test_service();
    let group = service.create_group("user-1", "Trip").await.unwrap();
    let alice = service.add_member("user-1", &group.id, "Alice").await.unwrap();

    service.remove_member("user-1", &group.id, &alice.id).await.unwrap();

    let group = service.get_group_details("user-1", &group.id).await.unwrap();
    assert_eq!(group.members.len(), 1);
}

#[tokio::test]
async fn test_remove_member_rules() {
    let service = create_test_service();
    let group = service.create_group("user-1", "Trip").await.unwrap();
    let you = group.members[0].id.clone();
    let alice = service.add_member("user-1", &group.id, "Alice").await.unwrap();
    service
        .add_payment("user-1", &group.id, &alice.id, dec!(5), Utc::now(), "Snacks")
        .await
        .unwrap();

    let result = service.remove_member("user-1", &group.id, "missing").await;
    assert!(matches!(result, Err(WhoOwesError::MemberNotFound(_))));

    let result = service.remove_member("user-1", &group.id, &you).await;
    assert!(matches!(result, Err(WhoOwesError::CannotRemoveSelf)));

    let result = service.remove_member("user-1", &group.id, &alice.id).await;
    assert!(matches!(result, Err(WhoOwesError::MemberHasPayments(_))));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_duplicate_members_are_rejected() {
    let service = Arc::new(create_test_service());
    let group = service.create_group("user-1", "Trip").await.unwrap();

    let tasks: Vec<_> = (0..50)
        .map(|_| {
            let service = Arc::clone(&service);
            let group_id = group.id.clone();
            tokio::spawn(async move { service.add_member("user-1", &group_id, "Alice").await })
        })
        .collect();

    let mut added = 0;
    for task in tasks {
        match task.await.unwrap() {
            Ok(_) => added += 1,
            Err(WhoOwesError::DuplicateMemberName(_)) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }
    }
    assert_eq!(added, 1);

    let group = service.get_group_details("user-1", &group.id).await.unwrap();
    assert_eq!(group.members.len(), 2);
}

#[tokio::test]
async fn test_rejected_change_leaves_group_untouched() {
    let service = create_test_service();
    let group = service.create_group("user-1", "Trip").await.unwrap();
    service.add_member("user-1", &group.id, "Alice").await.unwrap();

    let result = service.add_member("user-2", &group.id, "Bob").await;
    assert!(matches!(result, Err(WhoOwesError::NotGroupCreator(_))));
    let result = service.add_member("user-1", &group.id, "alice").await;
    assert!(matches!(result, Err(WhoOwesError::DuplicateMemberName(_))));

    let group = service.get_group_details("user-1", &group.id).await.unwrap();
    let names: Vec<_> = group.members.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["You", "Alice"]);
}
