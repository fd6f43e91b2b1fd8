use crate::app::AppState;
use crate::companion::SparrowOutput;
use crate::companion::content::{GenerateContentInput, GenerateContentOutput};
use crate::companion::prompt::SparrowInput;
use crate::error::{AppError, AppResult};
use crate::forum::ForumCategory;
use crate::membership::{MembershipApplication, MembershipQuote};
use crate::models::{CategoryResponse, HealthResponse, PostView, ThreadResponse};
use crate::qr::{IndexCardQr, IndexCardRequest};
use axum::{
    Extension,
    extract::{Json, Path},
    response::Json as ResponseJson,
};
use tracing::{debug, info};

/// Health check handler
/// Returns the service status and health information
pub async fn health_check() -> AppResult<ResponseJson<HealthResponse>> {
    debug!("Health check endpoint called");

    let response = HealthResponse::ok();

    info!("Health check successful");
    Ok(ResponseJson(response))
}

/// Sparrow companion handler
/// Always answers with displayable text, failures included
pub async fn sparrow_handler(
    Extension(state): Extension<AppState>,
    Json(payload): Json<SparrowInput>,
) -> AppResult<ResponseJson<SparrowOutput>> {
    info!("Sparrow endpoint called with query: {}", payload.query);

    let output = state.companion.respond(payload).await;

    info!("Sparrow response ready");
    Ok(ResponseJson(output))
}

/// Admin content generation handler
pub async fn generate_content_handler(
    Extension(state): Extension<AppState>,
    Json(payload): Json<GenerateContentInput>,
) -> AppResult<ResponseJson<GenerateContentOutput>> {
    info!(
        "Content generation endpoint called for {} about: {}",
        payload.content_type, payload.topic
    );

    Ok(ResponseJson(state.content.generate(payload).await))
}

pub async fn list_categories(
    Extension(state): Extension<AppState>,
) -> AppResult<ResponseJson<Vec<ForumCategory>>> {
    debug!("Listing forum categories");
    Ok(ResponseJson(state.forum.categories().to_vec()))
}

pub async fn category_threads(
    Extension(state): Extension<AppState>,
    Path(slug): Path<String>,
) -> AppResult<ResponseJson<CategoryResponse>> {
    let category = state
        .forum
        .category_by_slug(&slug)
        .ok_or_else(|| AppError::NotFound(format!("Category '{}' not found", slug)))?;

    let threads = state
        .forum
        .threads_for_category(&category.id)
        .into_iter()
        .cloned()
        .collect::<Vec<_>>();
    info!("Category '{}' has {} threads", slug, threads.len());

    Ok(ResponseJson(CategoryResponse {
        category: category.clone(),
        threads,
    }))
}

pub async fn thread_detail(
    Extension(state): Extension<AppState>,
    Path((slug, thread_id)): Path<(String, String)>,
) -> AppResult<ResponseJson<ThreadResponse>> {
    let forum = &state.forum;
    let category = forum
        .category_by_slug(&slug)
        .ok_or_else(|| AppError::NotFound(format!("Category '{}' not found", slug)))?;
    let thread = forum
        .thread_by_id(&thread_id)
        .filter(|thread| thread.category_id == category.id)
        .ok_or_else(|| AppError::NotFound("Thread not found.".to_string()))?;

    let posts = forum
        .posts_for_thread(&thread.id)
        .into_iter()
        .map(|post| PostView {
            post: post.clone(),
            author: forum.user_by_id(&post.author_id).cloned(),
        })
        .collect();

    Ok(ResponseJson(ThreadResponse {
        category: category.clone(),
        thread: thread.clone(),
        author: forum.user_by_id(&thread.author_id).cloned(),
        posts,
    }))
}

/// Index-card QR handler
/// Builds a qrserver.com image link for the submitted scores
pub async fn index_card_qr_handler(
    Json(payload): Json<IndexCardRequest>,
) -> AppResult<ResponseJson<IndexCardQr>> {
    if !payload.is_valid() {
        return Err(AppError::ValidationError(
            "Please fill in Student ID, Surname, and Firstname.".to_string(),
        ));
    }

    let qr = payload.to_qr();
    info!("Generated index card QR link for {}", payload.student_id);
    Ok(ResponseJson(qr))
}

/// Membership application handler
/// Returns the fee total, or every field problem at once
pub async fn validate_membership_handler(
    Json(payload): Json<MembershipApplication>,
) -> AppResult<ResponseJson<MembershipQuote>> {
    info!("Membership validation called for {}", payload.student_id);

    let quote = payload.validate().map_err(|errors| {
        info!("Membership application rejected on {} fields", errors.len());
        AppError::InvalidFields(errors)
    })?;

    info!("Membership application accepted, total {}", quote.total_amount);
    Ok(ResponseJson(quote))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::companion::SuggestedAction;
    use crate::companion::content::ContentType;
    use crate::companion::testing::ScriptedGenerator;
    use crate::forum::ForumStore;
    use chrono::Utc;

    fn state(reply: &str) -> AppState {
        AppState::new(
            ScriptedGenerator::replying(reply),
            ForumStore::seeded(Utc::now()),
        )
    }

    #[tokio::test]
    async fn test_health_check() {
        let result = health_check().await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_sparrow_handler_query_suggestion() {
        let state = state("Try the forums!\nSuggestion: Ask in Forums (QUERY: best study tips)");
        let request = SparrowInput::new("How do I study better?");

        let ResponseJson(output) = sparrow_handler(Extension(state), Json(request))
            .await
            .unwrap();
        assert_eq!(output.response, "Try the forums!");
        assert_eq!(
            output.suggested_action,
            Some(SuggestedAction::Query {
                label: "Ask in Forums".to_string(),
                query: "best study tips".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_sparrow_handler_empty_query_is_not_an_error() {
        let request = SparrowInput::new("");
        let ResponseJson(output) = sparrow_handler(Extension(state("unused")), Json(request))
            .await
            .unwrap();
        assert_eq!(output.response, "Please provide a query.");
    }

    #[tokio::test]
    async fn test_generate_content_handler() {
        let request = GenerateContentInput {
            content_type: ContentType::SubOrgDescription,
            topic: "Web Arachnids".to_string(),
            key_points: vec![],
            tone: Default::default(),
            length: Default::default(),
        };
        let ResponseJson(output) =
            generate_content_handler(Extension(state(" Web dev, together. ")), Json(request))
                .await
                .unwrap();
        assert_eq!(output.generated_content, "Web dev, together.");
    }

    #[tokio::test]
    async fn test_category_threads() {
        let ResponseJson(page) =
            category_threads(Extension(state("")), Path("announcements".to_string()))
                .await
                .unwrap();
        assert_eq!(page.category.title, "Announcements");
        assert_eq!(page.threads.len(), 1);
        assert!(page.threads[0].is_sticky);

        let missing = category_threads(Extension(state("")), Path("nope".to_string())).await;
        assert!(matches!(missing, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_thread_detail() {
        let ResponseJson(page) = thread_detail(
            Extension(state("")),
            Path(("hw-help".to_string(), "thread1".to_string())),
        )
        .await
        .unwrap();
        assert_eq!(page.posts.len(), 4);
        assert_eq!(page.author.map(|u| u.name), Some("Ronald Z.".to_string()));
        assert_eq!(
            page.posts[1].author.as_ref().map(|u| u.id.as_str()),
            Some("user1")
        );
    }

    #[tokio::test]
    async fn test_thread_detail_rejects_wrong_category() {
        let result = thread_detail(
            Extension(state("")),
            Path(("resources".to_string(), "thread1".to_string())),
        )
        .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_validate_membership_handler() {
        let application = MembershipApplication {
            email: "ana@example.com".to_string(),
            phone_number: "+639171234567".to_string(),
            section: "LFAU322A002".to_string(),
            student_id: "UA202301963".to_string(),
            ces_membership: true,
            icso_membership: true,
            ..Default::default()
        };
        let ResponseJson(quote) = validate_membership_handler(Json(application))
            .await
            .unwrap();
        assert_eq!(quote.total_amount, 40);

        let result = validate_membership_handler(Json(MembershipApplication::default())).await;
        match result {
            Err(AppError::InvalidFields(errors)) => assert_eq!(errors.len(), 5),
            _ => panic!("expected field errors"),
        }
    }

    #[tokio::test]
    async fn test_index_card_qr_validation() {
        let result = index_card_qr_handler(Json(IndexCardRequest::default())).await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));

        let request = IndexCardRequest {
            student_id: "UA1".to_string(),
            surname: "Rizal".to_string(),
            firstname: "Jose".to_string(),
            ..Default::default()
        };
        let ResponseJson(qr) = index_card_qr_handler(Json(request)).await.unwrap();
        assert_eq!(qr.data, "ID:UA1;S:RIZAL;F:JOSE;Q:;R:;P:;A:");
    }
}
