//! Cache-then-fetch behavior of the forecast store.

mod common;

use common::{Harness, ScriptedGeocoder};
use std::time::Duration;
use weather_dashboard::{FetchError, Location, Unit};

fn paris() -> Location {
    Location::new(48.8566, 2.3522, "Paris, Île-de-France, France")
}

#[tokio::test]
async fn test_second_call_within_ttl_hits_cache() {
    let harness = Harness::new(ScriptedGeocoder::default());
    let mut store = harness.store();

    let first = store.get_forecast(&paris(), Unit::Celsius).await.unwrap();
    harness.clock.advance(Duration::from_secs(299));
    let second = store.get_forecast(&paris(), Unit::Celsius).await.unwrap();

    assert_eq!(harness.source.call_count(), 1);
    assert_eq!(first.fetched_at_millis, second.fetched_at_millis);
    assert_eq!(first.payload, second.payload);
}

#[tokio::test]
async fn test_expired_entry_is_refetched_and_restamped() {
    let harness = Harness::new(ScriptedGeocoder::default());
    let mut store = harness.store();

    let first = store.get_forecast(&paris(), Unit::Celsius).await.unwrap();
    harness.clock.advance(Duration::from_secs(300));
    let second = store.get_forecast(&paris(), Unit::Celsius).await.unwrap();

    assert_eq!(harness.source.call_count(), 2);
    assert_eq!(second.fetched_at_millis - first.fetched_at_millis, 300_000);
    assert_eq!(store.cache().len(), 1);
}

#[tokio::test]
async fn test_unit_is_part_of_the_key() {
    let harness = Harness::new(ScriptedGeocoder::default());
    let mut store = harness.store();

    store.get_forecast(&paris(), Unit::Celsius).await.unwrap();
    store.get_forecast(&paris(), Unit::Fahrenheit).await.unwrap();
    store.get_forecast(&paris(), Unit::Celsius).await.unwrap();
    store.get_forecast(&paris(), Unit::Fahrenheit).await.unwrap();

    let calls = harness.source.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].2, Unit::Celsius);
    assert_eq!(calls[1].2, Unit::Fahrenheit);
}

#[tokio::test]
async fn test_name_does_not_affect_the_key() {
    let harness = Harness::new(ScriptedGeocoder::default());
    let mut store = harness.store();

    store.get_forecast(&paris(), Unit::Celsius).await.unwrap();
    let renamed = Location::new(48.8566, 2.3522, "48.86, 2.35");
    store.get_forecast(&renamed, Unit::Celsius).await.unwrap();

    assert_eq!(harness.source.call_count(), 1);
}

#[tokio::test]
async fn test_failed_fetch_leaves_cache_untouched() {
    let harness = Harness::new(ScriptedGeocoder::default());
    let mut store = harness.store();

    let first = store.get_forecast(&paris(), Unit::Celsius).await.unwrap();
    harness.clock.advance(Duration::from_secs(600));
    harness.source.set_failing(true);

    let err = store.get_forecast(&paris(), Unit::Celsius).await.unwrap_err();
    assert!(matches!(err, FetchError::Status(_)));

    let key = weather_dashboard::cache::CacheKey::new(&paris(), Unit::Celsius);
    let kept = store.cache().get(&key).unwrap();
    assert_eq!(kept.fetched_at_millis, first.fetched_at_millis);

    // No fresh entry, so the next call goes upstream again
    harness.source.set_failing(false);
    store.get_forecast(&paris(), Unit::Celsius).await.unwrap();
    assert_eq!(harness.source.call_count(), 3);
}
