mod common;
use common::TestRegistry;
use registra::authz::{FALLBACK_TOKEN_TYPE, GRADUATED_TOKEN_TYPE, MatchingNotification};
use registra::{TokenClassifier, TokenParams};

#[tokio::test]
async fn parking_token_takes_its_notification_kind() -> anyhow::Result<()> {
    let registry = TestRegistry::new().await?;
    let item = registry.item().await?;
    registry
        .db
        .notifications()
        .create_parking(item.id, "theft", "abc123")
        .await?;
    let classifier = TokenClassifier::new(&registry.db);

    let classification = classifier
        .classify(
            &item,
            &TokenParams {
                parking_notification_retrieved: Some("abc123".into()),
                ..Default::default()
            },
        )
        .await?;

    assert_eq!(classification.token_type.as_deref(), Some("theft"));
    assert!(matches!(
        classification.matching_notification,
        Some(MatchingNotification::Parking(_))
    ));

    Ok(())
}

#[tokio::test]
async fn unresolvable_parking_token_falls_back() -> anyhow::Result<()> {
    let registry = TestRegistry::new().await?;
    let item = registry.item().await?;
    let classifier = TokenClassifier::new(&registry.db);

    let classification = classifier
        .classify(
            &item,
            &TokenParams {
                parking_notification_retrieved: Some("abc123".into()),
                ..Default::default()
            },
        )
        .await?;

    assert_eq!(classification.token_type.as_deref(), Some(FALLBACK_TOKEN_TYPE));
    assert!(classification.matching_notification.is_none());

    Ok(())
}

#[tokio::test]
async fn graduated_token_type_is_fixed_with_or_without_a_match() -> anyhow::Result<()> {
    let registry = TestRegistry::new().await?;
    let item = registry.item().await?;
    registry
        .db
        .notifications()
        .create_graduated(item.id, "grad-tok")
        .await?;
    let classifier = TokenClassifier::new(&registry.db);

    let matched = classifier
        .classify(
            &item,
            &TokenParams {
                graduated_notification_remaining: Some("grad-tok".into()),
                ..Default::default()
            },
        )
        .await?;
    assert_eq!(matched.token_type.as_deref(), Some(GRADUATED_TOKEN_TYPE));
    assert!(matches!(
        matched.matching_notification,
        Some(MatchingNotification::Graduated(_))
    ));

    // Existence only affects the matching record, never the type.
    let unmatched = classifier
        .classify(
            &item,
            &TokenParams {
                graduated_notification_remaining: Some("wrong-tok".into()),
                ..Default::default()
            },
        )
        .await?;
    assert_eq!(unmatched.token_type.as_deref(), Some(GRADUATED_TOKEN_TYPE));
    assert!(unmatched.matching_notification.is_none());

    Ok(())
}

#[tokio::test]
async fn no_token_yields_no_classification() -> anyhow::Result<()> {
    let registry = TestRegistry::new().await?;
    let item = registry.item().await?;
    let classifier = TokenClassifier::new(&registry.db);

    let classification = classifier.classify(&item, &TokenParams::default()).await?;
    assert!(!classification.token_present());
    assert!(classification.matching_notification.is_none());

    // Blank values count as absent.
    let classification = classifier
        .classify(
            &item,
            &TokenParams {
                parking_notification_retrieved: Some("   ".into()),
                ..Default::default()
            },
        )
        .await?;
    assert!(!classification.token_present());

    Ok(())
}

#[tokio::test]
async fn parking_channel_wins_over_graduated() -> anyhow::Result<()> {
    let registry = TestRegistry::new().await?;
    let item = registry.item().await?;
    registry
        .db
        .notifications()
        .create_parking(item.id, "appears_abandoned_notification", "park-tok")
        .await?;
    registry
        .db
        .notifications()
        .create_graduated(item.id, "grad-tok")
        .await?;
    let classifier = TokenClassifier::new(&registry.db);

    let classification = classifier
        .classify(
            &item,
            &TokenParams {
                parking_notification_retrieved: Some("park-tok".into()),
                graduated_notification_remaining: Some("grad-tok".into()),
                ..Default::default()
            },
        )
        .await?;

    assert_eq!(
        classification.token_type.as_deref(),
        Some("appears_abandoned_notification")
    );

    Ok(())
}

#[tokio::test]
async fn claim_token_exposes_claim_message() -> anyhow::Result<()> {
    let registry = TestRegistry::new().await?;
    let item = registry.item().await?;
    registry
        .db
        .ownerships()
        .create(
            item.id,
            None,
            Some("new-owner@example.org"),
            "claim-tok",
            Some("Enjoy the bike!"),
        )
        .await?;
    let classifier = TokenClassifier::new(&registry.db);

    let classification = classifier
        .classify(
            &item,
            &TokenParams {
                claim_token: Some("claim-tok".into()),
                ..Default::default()
            },
        )
        .await?;
    assert_eq!(classification.claim_message.as_deref(), Some("Enjoy the bike!"));
    // The side channel never classifies a token on its own.
    assert!(!classification.token_present());

    let wrong = classifier
        .classify(
            &item,
            &TokenParams {
                claim_token: Some("other-tok".into()),
                ..Default::default()
            },
        )
        .await?;
    assert!(wrong.claim_message.is_none());

    Ok(())
}

#[tokio::test]
async fn claim_message_rides_along_with_a_retrieval_token() -> anyhow::Result<()> {
    let registry = TestRegistry::new().await?;
    let item = registry.item().await?;
    registry
        .db
        .ownerships()
        .create(
            item.id,
            None,
            Some("new-owner@example.org"),
            "claim-tok",
            Some("See you at the shop"),
        )
        .await?;
    registry
        .db
        .notifications()
        .create_parking(item.id, "theft", "park-tok")
        .await?;
    let classifier = TokenClassifier::new(&registry.db);

    let classification = classifier
        .classify(
            &item,
            &TokenParams {
                claim_token: Some("claim-tok".into()),
                parking_notification_retrieved: Some("park-tok".into()),
                ..Default::default()
            },
        )
        .await?;

    assert_eq!(
        classification.claim_message.as_deref(),
        Some("See you at the shop")
    );
    assert_eq!(classification.token_type.as_deref(), Some("theft"));

    Ok(())
}
