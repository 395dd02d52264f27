mod common;
use common::TestRegistry;
use registra::{OrgScopeResolver, SessionContext};

#[tokio::test]
async fn force_blank_leaves_context_unchanged() -> anyhow::Result<()> {
    let registry = TestRegistry::new().await?;
    let home = registry.organization("Home Org").await?;
    let other = registry.organization("Other Org").await?;
    let user = registry
        .db
        .users()
        .create("member@example.org", false, Some(home.id))
        .await?;
    registry.db.organizations().add_member(user.id, home.id).await?;
    let resolver = OrgScopeResolver::new(&registry.db);

    // Context absent, authorized context, unauthorized context - all kept.
    for current in [None, Some(home.id), Some(other.id)] {
        let next = resolver.resolve(Some(&user), Some(other.id), current, true).await?;
        assert_eq!(next, current);
        let next = resolver.resolve(Some(&user), None, current, true).await?;
        assert_eq!(next, current);
    }

    Ok(())
}

#[tokio::test]
async fn requested_org_with_unauthorized_context_falls_back_to_default() -> anyhow::Result<()> {
    let registry = TestRegistry::new().await?;
    let home = registry.organization("Home Org").await?;
    let stale = registry.organization("Stale Org").await?;
    let child = registry.organization("Child Org").await?;
    let user = registry
        .db
        .users()
        .create("member@example.org", false, Some(home.id))
        .await?;
    registry.db.organizations().add_member(user.id, home.id).await?;
    let resolver = OrgScopeResolver::new(&registry.db);

    let next = resolver
        .resolve(Some(&user), Some(child.id), Some(stale.id), false)
        .await?;
    assert_eq!(next, Some(home.id));

    Ok(())
}

#[tokio::test]
async fn requested_org_with_authorized_context_keeps_it() -> anyhow::Result<()> {
    let registry = TestRegistry::new().await?;
    let home = registry.organization("Home Org").await?;
    let current = registry.organization("Current Org").await?;
    let child = registry.organization("Child Org").await?;
    let user = registry
        .db
        .users()
        .create("member@example.org", false, Some(home.id))
        .await?;
    registry.db.organizations().add_member(user.id, current.id).await?;
    let resolver = OrgScopeResolver::new(&registry.db);

    let next = resolver
        .resolve(Some(&user), Some(child.id), Some(current.id), false)
        .await?;
    assert_eq!(next, Some(current.id));

    Ok(())
}

#[tokio::test]
async fn stale_unauthorized_context_is_cleared_without_a_request() -> anyhow::Result<()> {
    let registry = TestRegistry::new().await?;
    let stale = registry.organization("Stale Org").await?;
    let user = registry.user("member@example.org").await?;
    let resolver = OrgScopeResolver::new(&registry.db);

    let next = resolver.resolve(Some(&user), None, Some(stale.id), false).await?;
    assert_eq!(next, None);

    // An authorized context survives.
    registry.db.organizations().add_member(user.id, stale.id).await?;
    let next = resolver.resolve(Some(&user), None, Some(stale.id), false).await?;
    assert_eq!(next, Some(stale.id));

    Ok(())
}

#[tokio::test]
async fn anonymous_request_leaves_context_unchanged() -> anyhow::Result<()> {
    let registry = TestRegistry::new().await?;
    let org = registry.organization("Some Org").await?;
    let resolver = OrgScopeResolver::new(&registry.db);

    let next = resolver.resolve(None, Some(org.id), Some(org.id), false).await?;
    assert_eq!(next, Some(org.id));

    Ok(())
}

#[tokio::test]
async fn caller_persists_resolved_scope_into_session() -> anyhow::Result<()> {
    let registry = TestRegistry::new().await?;
    let home = registry.organization("Home Org").await?;
    let stale = registry.organization("Stale Org").await?;
    let user = registry
        .db
        .users()
        .create("member@example.org", false, Some(home.id))
        .await?;
    registry.db.organizations().add_member(user.id, home.id).await?;
    let resolver = OrgScopeResolver::new(&registry.db);

    let mut session = SessionContext::new();
    session.set_organization(Some(stale.id));

    let next = resolver
        .resolve(Some(&user), Some(stale.id), session.organization(), false)
        .await?;
    session.set_organization(next);
    assert_eq!(session.organization(), Some(home.id));

    Ok(())
}
