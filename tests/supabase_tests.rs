// Supabase adapter tests against a mock PostgREST server

use massage_finder::core::apply_filters;
use massage_finder::models::{
    Coordinate, FilterSpec, ListingStatus, ReviewEdit, ReviewStatus, ReviewSubmission,
    ReviewTarget, ServiceCategory,
};
use massage_finder::services::{SupabaseClient, SupabaseError};
use mockito::Matcher;

fn client_for(server: &mockito::ServerGuard) -> SupabaseClient {
    SupabaseClient::new(server.url(), "anon_key".to_string(), 5).unwrap()
}

#[tokio::test]
async fn test_fetch_therapists_normalizes_rows() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/rest/v1/therapists")
        .match_query(Matcher::UrlEncoded("select".into(), "*".into()))
        .match_header("apikey", "anon_key")
        .match_header("authorization", "Bearer anon_key")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[
                {"id": "t1", "name": "Made", "is_online": true, "status": "active",
                 "rating": 4.7, "massage_types": ["balinese"], "lat": -8.67, "lng": 115.21},
                {"id": "t2", "name": null, "is_online": false, "status": "pending",
                 "rating": null, "massage_types": null, "lat": null, "lng": null},
                {"name": "row without an id"}
            ]"#,
        )
        .create_async()
        .await;

    let therapists = client_for(&server).fetch_therapists().await.unwrap();
    mock.assert_async().await;

    assert_eq!(therapists.len(), 2, "malformed row skipped");
    assert_eq!(therapists[0].id, "t1");
    assert_eq!(therapists[0].category, ServiceCategory::Home);
    assert_eq!(therapists[0].coordinate, Some(Coordinate::new(-8.67, 115.21)));
    assert_eq!(therapists[1].rating, 0.0);
    assert_eq!(therapists[1].status, ListingStatus::Pending);
    assert!(therapists[1].coordinate.is_none());

    // The default browse filters hide the pending listing
    let visible = apply_filters(&therapists, &FilterSpec::default(), None);
    assert_eq!(visible.len(), 1);
}

#[tokio::test]
async fn test_fetch_places_reads_opening_hours() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/rest/v1/places")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[{"id": "p1", "name": "Frangipani Spa", "is_online": true, "status": "active",
                 "rating": 4.4, "services": ["hot-stone"], "lat": -8.7, "lng": 115.17,
                 "opening_hours": {"monday": {"open": "09:00", "close": "21:00"}}}]"#,
        )
        .create_async()
        .await;

    let places = client_for(&server).fetch_places().await.unwrap();

    assert_eq!(places.len(), 1);
    assert_eq!(places[0].category, ServiceCategory::Places);
    let hours = places[0].opening_hours.as_ref().unwrap();
    assert!(hours.monday.is_some());
    assert!(hours.tuesday.is_none());
}

#[tokio::test]
async fn test_unauthorized_key() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/rest/v1/places")
        .match_query(Matcher::Any)
        .with_status(401)
        .with_body(r#"{"message": "Invalid API key"}"#)
        .create_async()
        .await;

    let result = client_for(&server).fetch_places().await;
    assert!(matches!(result, Err(SupabaseError::Unauthorized)));
}

#[tokio::test]
async fn test_server_error_carries_status_and_body() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/rest/v1/therapists")
        .match_query(Matcher::Any)
        .with_status(503)
        .with_body("maintenance")
        .create_async()
        .await;

    match client_for(&server).fetch_therapists().await {
        Err(SupabaseError::ApiError { status, body }) => {
            assert_eq!(status, 503);
            assert_eq!(body, "maintenance");
        }
        other => panic!("unexpected result: {:?}", other.map(|r| r.len())),
    }
}

#[tokio::test]
async fn test_fetch_reviews_filters_by_target() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/rest/v1/reviews")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("target_id".into(), "eq.t1".into()),
            Matcher::UrlEncoded("order".into(), "created_at.desc".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[{"id": "r1", "target_id": "t1", "target_type": "therapist",
                 "customer_name": "Ayu", "customer_whatsapp": "+628123",
                 "rating": 5, "comment": "Wonderful", "status": "approved",
                 "created_at": "2024-07-01T10:00:00Z"}]"#,
        )
        .create_async()
        .await;

    let reviews = client_for(&server).fetch_reviews("t1").await.unwrap();
    mock.assert_async().await;

    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0].status, ReviewStatus::Approved);
    assert_eq!(reviews[0].target_type, ReviewTarget::Therapist);
}

#[tokio::test]
async fn test_submit_review_inserts_pending() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/rest/v1/reviews")
        .match_header("prefer", "return=representation")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "target_id": "p1",
            "target_type": "place",
            "rating": 4,
            "status": "pending"
        })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[{"id": "r9", "target_id": "p1", "target_type": "place",
                 "customer_name": "Budi", "customer_whatsapp": "08123456789",
                 "rating": 4, "comment": "Clean and calm", "status": "pending",
                 "created_at": "2024-07-02T08:30:00Z"}]"#,
        )
        .create_async()
        .await;

    let submission = ReviewSubmission {
        customer_name: "Budi".to_string(),
        customer_whatsapp: "08123456789".to_string(),
        rating: 4,
        comment: "Clean and calm".to_string(),
    };

    let review = client_for(&server)
        .submit_review("p1", ReviewTarget::Place, &submission)
        .await
        .unwrap();
    mock.assert_async().await;

    assert_eq!(review.id, "r9");
    assert_eq!(review.status, ReviewStatus::Pending);
}

#[tokio::test]
async fn test_invalid_review_never_reaches_the_api() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/rest/v1/reviews")
        .expect(0)
        .create_async()
        .await;

    let submission = ReviewSubmission {
        customer_name: "Budi".to_string(),
        customer_whatsapp: "08123456789".to_string(),
        rating: 9,
        comment: "Too good".to_string(),
    };

    let result = client_for(&server)
        .submit_review("p1", ReviewTarget::Place, &submission)
        .await;

    assert!(matches!(result, Err(SupabaseError::ValidationError(_))));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_update_review_status() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("PATCH", "/rest/v1/reviews")
        .match_query(Matcher::UrlEncoded("id".into(), "eq.r1".into()))
        .match_body(Matcher::Json(serde_json::json!({"status": "approved"})))
        .with_status(204)
        .create_async()
        .await;

    client_for(&server)
        .update_review_status("r1", ReviewStatus::Approved)
        .await
        .unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_update_listing_status_targets_category_table() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("PATCH", "/rest/v1/therapists")
        .match_query(Matcher::UrlEncoded("id".into(), "eq.t1".into()))
        .match_header("apikey", "anon_key")
        .match_body(Matcher::Json(serde_json::json!({"status": "blocked"})))
        .with_status(204)
        .create_async()
        .await;

    client_for(&server)
        .update_listing_status(ServiceCategory::Home, "t1", ListingStatus::Blocked)
        .await
        .unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_set_available_patches_online_flag() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("PATCH", "/rest/v1/places")
        .match_query(Matcher::UrlEncoded("id".into(), "eq.p1".into()))
        .match_body(Matcher::Json(serde_json::json!({"is_online": false})))
        .with_status(204)
        .create_async()
        .await;

    client_for(&server)
        .set_available(ServiceCategory::Places, "p1", false)
        .await
        .unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_delete_review() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("DELETE", "/rest/v1/reviews")
        .match_query(Matcher::UrlEncoded("id".into(), "eq.r1".into()))
        .with_status(204)
        .create_async()
        .await;

    client_for(&server).delete_review("r1").await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_update_review_writes_only_edited_fields() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("PATCH", "/rest/v1/reviews")
        .match_query(Matcher::UrlEncoded("id".into(), "eq.r1".into()))
        .match_body(Matcher::Json(serde_json::json!({"comment": "Edited", "rating": 4})))
        .with_status(204)
        .create_async()
        .await;

    let edit = ReviewEdit {
        comment: Some("Edited".to_string()),
        rating: Some(4),
        status: None,
    };
    client_for(&server).update_review("r1", &edit).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_invalid_or_empty_review_edit_never_reaches_api() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("PATCH", "/rest/v1/reviews")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = client_for(&server);

    let empty = client.update_review("r1", &ReviewEdit::default()).await;
    assert!(matches!(empty, Err(SupabaseError::EmptyUpdate)));

    let bad_rating = ReviewEdit {
        rating: Some(0),
        ..ReviewEdit::default()
    };
    let invalid = client.update_review("r1", &bad_rating).await;
    assert!(matches!(invalid, Err(SupabaseError::ValidationError(_))));

    mock.assert_async().await;
}
