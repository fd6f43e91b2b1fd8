use crate::handlers::{
    category_threads, generate_content_handler, health_check, index_card_qr_handler,
    list_categories, sparrow_handler, thread_detail, validate_membership_handler,
};
use axum::{Router, routing::get, routing::post};

/// Creates and configures all application routes
pub fn create_routes() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/sparrow", post(sparrow_handler))
        .route("/api/content/generate", post(generate_content_handler))
        .route("/api/forums", get(list_categories))
        .route("/api/forums/{slug}", get(category_threads))
        .route("/api/forums/{slug}/threads/{thread_id}", get(thread_detail))
        .route("/api/index-card/qr", post(index_card_qr_handler))
        .route("/api/membership/validate", post(validate_membership_handler))
}

#[cfg(test)]
mod tests {
    use crate::app::{AppState, create_router};
    use crate::companion::testing::ScriptedGenerator;
    use crate::forum::ForumStore;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use chrono::Utc;
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn router(reply: &str) -> axum::Router {
        create_router(AppState::new(
            ScriptedGenerator::replying(reply),
            ForumStore::seeded(Utc::now()),
        ))
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_sparrow_route() {
        let request = Request::post("/api/sparrow")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({"query": "How do I join?", "currentPage": "/"}).to_string(),
            ))
            .unwrap();

        let response = router("Head to membership.\nSuggestion: View Membership (URL: /membership)")
            .oneshot(request)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({
                "response": "Head to membership.",
                "suggestedAction": {"label": "View Membership", "url": "/membership"}
            })
        );
    }

    async fn post_sparrow(body: Value) -> (StatusCode, Value) {
        let request = Request::post("/api/sparrow")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = router("Happy to help!").oneshot(request).await.unwrap();
        (response.status(), body_json(response).await)
    }

    #[tokio::test]
    async fn test_sparrow_route_tolerates_mistyped_fields() {
        for body in [json!({"query": null}), json!({"query": 5}), json!({})] {
            let (status, reply) = post_sparrow(body).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(
                reply,
                json!({"response": "Please provide a query.", "suggestedAction": null})
            );
        }

        let (status, reply) = post_sparrow(json!({"query": "hi", "currentPage": 7})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(reply["response"], "Happy to help!");
    }

    #[tokio::test]
    async fn test_membership_route_reports_field_errors() {
        let request = Request::post("/api/membership/validate")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({
                    "email": "ana@example.com",
                    "phoneNumber": "12345",
                    "section": "LFAU322A002",
                    "studentId": "UA202301963",
                    "subOrgMembership": true,
                    "selectedSubOrg": "none"
                })
                .to_string(),
            ))
            .unwrap();

        let response = router("").oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "VALIDATION_ERROR");
        let fields: Vec<&str> = body["fields"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|f| f["field"].as_str())
            .collect();
        assert_eq!(fields, vec!["phoneNumber", "selectedSubOrg"]);
    }

    #[tokio::test]
    async fn test_unknown_category_is_404() {
        let request = Request::get("/api/forums/nope").body(Body::empty()).unwrap();
        let response = router("").oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_forum_listing_route() {
        let request = Request::get("/api/forums").body(Body::empty()).unwrap();
        let response = router("").oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let categories = body_json(response).await;
        assert_eq!(categories.as_array().map(Vec::len), Some(10));
        assert_eq!(categories[0]["slug"], "hw-help");
    }
}
