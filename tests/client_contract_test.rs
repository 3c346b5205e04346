//! Contract tests for the Plex client adapter
//!
//! Exercises the adapter against the stateful fake backend: the
//! boolean/empty failure contract, result reshaping, and the
//! watched/collection mutations.

mod common;

use common::{catalog, client_over, movie, FakeBackend, FakeState};

#[tokio::test]
async fn test_connection_succeeds_against_live_backend() {
    let client = client_over(FakeBackend::new(catalog()));
    assert!(client.test_connection().await);
}

#[tokio::test]
async fn test_connection_fails_closed_when_backend_errors() {
    let client = client_over(FakeBackend::unreachable());
    assert!(!client.test_connection().await);
}

#[tokio::test]
async fn test_server_info_none_on_failure() {
    let client = client_over(FakeBackend::unreachable());
    assert!(client.get_server_info().await.is_none());
}

#[tokio::test]
async fn test_server_info_fields_mapped() {
    let client = client_over(FakeBackend::new(catalog()));

    let info = client.get_server_info().await.unwrap();
    assert_eq!(info.friendly_name, "Test Server");
    assert_eq!(info.machine_identifier, "fake-machine");
    assert_eq!(info.platform, "Linux");
}

#[tokio::test]
async fn test_libraries_carry_counts() {
    let client = client_over(FakeBackend::new(catalog()));

    let libraries = client.get_libraries().await;
    assert_eq!(libraries.len(), 2);
    assert_eq!(libraries[0].title, "Movies");
    assert_eq!(libraries[0].count, 3);
    assert_eq!(libraries[1].kind, "show");
}

#[tokio::test]
async fn test_libraries_empty_on_failure() {
    let client = client_over(FakeBackend::unreachable());
    assert!(client.get_libraries().await.is_empty());
}

#[tokio::test]
async fn test_unreadable_section_count_degrades_to_zero() {
    let mut state = catalog();
    state.section_counts.remove("2");
    let client = client_over(FakeBackend::new(state));

    let libraries = client.get_libraries().await;
    assert_eq!(libraries.len(), 2);
    assert_eq!(libraries[1].count, 0);
}

#[tokio::test]
async fn test_statistics_aggregate_by_type() {
    let client = client_over(FakeBackend::new(catalog()));

    let stats = client.get_library_statistics().await.unwrap();
    assert_eq!(stats.total_items, 4);
    assert_eq!(stats.by_type.get("movie"), Some(&3));
    assert_eq!(stats.by_type.get("show"), Some(&1));
    assert_eq!(stats.libraries.len(), 2);
}

#[tokio::test]
async fn test_search_truncates_and_preserves_order() {
    let client = client_over(FakeBackend::new(catalog()));

    let results = client.search("matrix", 2).await;
    assert_eq!(results.len(), 2);
    // Backend order survives the reshaping
    assert_eq!(results[0].title, "The Matrix");
    assert_eq!(results[1].title, "The Matrix Reloaded");
    assert_eq!(results[0].rating_key, "101");
    assert_eq!(results[0].key, "/library/metadata/101");
}

#[tokio::test]
async fn test_search_empty_on_failure() {
    let client = client_over(FakeBackend::unreachable());
    assert!(client.search("matrix", 5).await.is_empty());
}

#[tokio::test]
async fn test_search_in_library_filters_by_section_and_type() {
    let client = client_over(FakeBackend::new(catalog()));

    // Section 2 holds only the show
    let results = client.search_in_library("matrix", "2", "", 20).await;
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].title, "The Matrix Defenders");

    // Type filter keeps movies out of a show query
    let results = client.search_in_library("matrix", "1", "show", 20).await;
    assert!(results.is_empty());

    // Unknown type string means no filter
    let results = client.search_in_library("matrix", "1", "hologram", 20).await;
    assert_eq!(results.len(), 2);
}

#[tokio::test]
async fn test_find_item_returns_first_hit() {
    let client = client_over(FakeBackend::new(catalog()));

    let item = client.find_item("inception").await.unwrap();
    assert_eq!(item.rating_key, "103");

    assert!(client.find_item("nonexistent").await.is_none());
}

#[tokio::test]
async fn test_sessions_reshaped_with_defaults() {
    let mut state = catalog();
    state.sessions = vec![plex_assistant_core::plex::wire::Metadata {
        title: Some("Blade Runner".to_string()),
        kind: Some("movie".to_string()),
        duration: Some(7_080_000),
        view_offset: Some(120_000),
        user: Some(plex_assistant_core::plex::wire::User {
            title: "alice".to_string(),
        }),
        ..Default::default()
    }];
    let client = client_over(FakeBackend::new(state));

    let sessions = client.get_currently_playing().await;
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].user, "alice");
    assert_eq!(sessions[0].view_offset, 120_000);
}

#[tokio::test]
async fn test_playlists_reshaped() {
    let client = client_over(FakeBackend::new(catalog()));

    let playlists = client.get_playlists().await;
    assert_eq!(playlists.len(), 1);
    assert_eq!(playlists[0].title, "Friday Night");
    assert_eq!(playlists[0].item_count, 2);
}

#[tokio::test]
async fn test_create_playlist_with_no_items_fails() {
    let backend = FakeBackend::new(catalog());
    let client = client_over(backend.clone());

    let outcome = client.create_playlist("Favorites", &[], "").await;
    assert!(!outcome.success);
    assert!(outcome.error.is_some());
    // Nothing was created
    assert_eq!(backend.state.lock().unwrap().playlists.len(), 1);
}

#[tokio::test]
async fn test_create_playlist_resolves_titles() {
    let backend = FakeBackend::new(catalog());
    let client = client_over(backend.clone());

    let items = vec!["Inception".to_string(), "The Matrix".to_string()];
    let outcome = client.create_playlist("Favorites", &items, "").await;

    assert!(outcome.success);
    assert_eq!(outcome.title.as_deref(), Some("Favorites"));
    assert_eq!(outcome.item_count, Some(2));
    assert_eq!(backend.state.lock().unwrap().playlists.len(), 2);
}

#[tokio::test]
async fn test_create_playlist_with_unresolvable_items_fails() {
    let backend = FakeBackend::new(catalog());
    let client = client_over(backend.clone());

    let items = vec!["No Such Film".to_string()];
    let outcome = client.create_playlist("Favorites", &items, "").await;

    assert!(!outcome.success);
    assert_eq!(backend.state.lock().unwrap().playlists.len(), 1);
}

#[tokio::test]
async fn test_watched_state_roundtrip() {
    let backend = FakeBackend::new(catalog());
    let client = client_over(backend.clone());

    assert!(client.set_watched("/library/metadata/101").await);
    let item = client.find_item("The Matrix").await.unwrap();
    assert!(item.watched);

    assert!(client.set_unwatched("/library/metadata/101").await);
    let item = client.find_item("The Matrix").await.unwrap();
    assert!(!item.watched);
}

#[tokio::test]
async fn test_set_watched_twice_does_not_fail() {
    let client = client_over(FakeBackend::new(catalog()));

    assert!(client.set_watched("101").await);
    assert!(client.set_watched("101").await);
}

#[tokio::test]
async fn test_set_watched_unknown_key_returns_false() {
    let client = client_over(FakeBackend::new(catalog()));
    assert!(!client.set_watched("/library/metadata/999").await);
}

#[tokio::test]
async fn test_collection_membership_roundtrip() {
    let backend = FakeBackend::new(catalog());
    let client = client_over(backend.clone());

    assert!(client.add_to_collection("101", "Favorites").await);
    assert!(backend.collections_of("101").contains("Favorites"));

    assert!(client.remove_from_collection("101", "Favorites").await);
    assert!(!backend.collections_of("101").contains("Favorites"));
}

#[tokio::test]
async fn test_collection_on_unknown_item_returns_false() {
    let client = client_over(FakeBackend::new(catalog()));

    assert!(!client.add_to_collection("999", "Favorites").await);
    assert!(!client.remove_from_collection("999", "Favorites").await);
}

#[tokio::test]
async fn test_typed_layer_surfaces_reasons() {
    let state = FakeState {
        fail_all: true,
        ..Default::default()
    };
    let client = client_over(FakeBackend::new(state));

    // The try_* layer keeps the error the public surface swallows
    let err = client.try_search("matrix", 5).await.unwrap_err();
    assert!(err.to_string().contains("network down"));
}

#[tokio::test]
async fn test_summary_truncation_applied_in_search() {
    let mut state = catalog();
    let mut long_movie = movie("104", "Matrix Documentary");
    long_movie.summary = Some("m".repeat(1000));
    state.items.push(long_movie);
    let client = client_over(FakeBackend::new(state));

    let results = client.search("Matrix Documentary", 5).await;
    assert_eq!(results[0].summary.as_ref().unwrap().chars().count(), 200);
}
