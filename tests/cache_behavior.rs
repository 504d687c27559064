//! TTL and fail-closed behavior of the mapping cache, observed through the
//! full handler path.

use std::time::Duration;

use edge_router::edge::EdgeDecision;

mod common;

use common::{apiv_request, mapping, test_router, test_router_with_ttl};

#[tokio::test]
async fn test_requests_within_ttl_share_one_fetch() {
    let router = test_router(vec![mapping("v1", "origin-a.example.com", None)]);

    for _ in 0..5 {
        router.handler.handle(apiv_request(Some("v1"))).await.unwrap();
    }
    assert_eq!(router.store.fetch_count(), 1);

    // Still inside the window: one second short of the TTL.
    router.clock.advance(Duration::from_secs(299));
    router.handler.handle(apiv_request(Some("v1"))).await.unwrap();
    assert_eq!(router.store.fetch_count(), 1);
}

#[tokio::test]
async fn test_expired_set_is_refetched() {
    let router = test_router_with_ttl(
        vec![mapping("v1", "origin-a.example.com", None)],
        Duration::from_secs(60),
    );

    router.handler.handle(apiv_request(Some("v1"))).await.unwrap();
    router.clock.advance(Duration::from_secs(60));
    router.handler.handle(apiv_request(Some("v1"))).await.unwrap();
    assert_eq!(router.store.fetch_count(), 2);
}

#[tokio::test]
async fn test_updated_mappings_visible_after_expiry() {
    let router = test_router_with_ttl(
        vec![mapping("v1", "origin-a.example.com", None)],
        Duration::from_secs(60),
    );

    router.handler.handle(apiv_request(Some("v1"))).await.unwrap();

    // The table is rewritten externally; the old generation still serves
    // until its TTL elapses.
    router
        .store
        .set_mappings(vec![mapping("v1", "origin-b.example.com", None)]);
    let decision = router.handler.handle(apiv_request(Some("v1"))).await.unwrap();
    let EdgeDecision::Forward(out) = decision else {
        panic!("expected forward");
    };
    assert_eq!(
        out.origin.unwrap().custom.unwrap().domain_name,
        "origin-a.example.com"
    );

    router.clock.advance(Duration::from_secs(61));
    let decision = router.handler.handle(apiv_request(Some("v1"))).await.unwrap();
    let EdgeDecision::Forward(out) = decision else {
        panic!("expected forward");
    };
    assert_eq!(
        out.origin.unwrap().custom.unwrap().domain_name,
        "origin-b.example.com"
    );
}

#[tokio::test]
async fn test_empty_table_is_never_cached() {
    let router = test_router(Vec::new());

    router.handler.handle(apiv_request(Some("v1"))).await.unwrap();
    router.handler.handle(apiv_request(Some("v1"))).await.unwrap();
    // Both lookups went to the store; an empty scan is not a generation.
    assert_eq!(router.store.fetch_count(), 2);
}

#[tokio::test]
async fn test_failed_fetch_is_never_cached() {
    let router = test_router(vec![mapping("v1", "origin-a.example.com", None)]);
    router.store.set_failing(true);

    router.handler.handle(apiv_request(Some("v1"))).await.unwrap();
    router.handler.handle(apiv_request(Some("v1"))).await.unwrap();
    assert_eq!(router.store.fetch_count(), 2);

    router.store.set_failing(false);
    let decision = router.handler.handle(apiv_request(Some("v1"))).await.unwrap();
    assert!(matches!(decision, EdgeDecision::Forward(_)));
    assert_eq!(router.store.fetch_count(), 3);
}
