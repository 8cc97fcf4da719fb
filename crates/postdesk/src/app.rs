use axum::{
    http::{header, Method},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    handlers::{
        health::livez,
        posts::{create_post, delete_post, get_all_posts, get_post, update_post},
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/posts", get(get_all_posts))
        .route("/post", post(create_post))
        .route(
            "/post/{postId}",
            get(get_post).put(update_post).delete(delete_post),
        )
        .route("/livez", get(livez))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        response::Response,
    };
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn send(app: &Router, method: &str, uri: &str, body: impl Into<Body>) -> Response {
        app.clone()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .header("Content-Type", "application/json")
                    .body(body.into())
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_livez() {
        let app = create_app(AppState::in_memory());

        let response = send(&app, "GET", "/livez", Body::empty()).await;

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_get_all_posts_empty() {
        let app = create_app(AppState::in_memory());

        let response = send(&app, "GET", "/posts", Body::empty()).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );

        let json = body_json(response).await;
        assert_eq!(json["message"], "Successfully retrieved all posts.");
        assert_eq!(json["data"], json!([]));
    }

    #[tokio::test]
    async fn test_get_missing_post() {
        let app = create_app(AppState::in_memory());

        let response = send(&app, "GET", "/post/unknown", Body::empty()).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["data"], json!({}));
    }

    #[tokio::test]
    async fn test_create_update_delete_post() {
        let app = create_app(AppState::in_memory());

        // Create
        let response = send(
            &app,
            "POST",
            "/post",
            json!({"postId": "p1", "title": "Hello"}).to_string(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await["message"],
            "Successfully created post."
        );

        // Update
        let response = send(&app, "PUT", "/post/p1", r#"{"title":"Hi"}"#).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await["updateResult"]["attributes"],
            json!({"title": "Hi"})
        );

        let response = send(&app, "GET", "/post/p1", Body::empty()).await;
        let json = body_json(response).await;
        assert_eq!(json["data"], json!({"postId": "p1", "title": "Hi"}));
        assert_eq!(json["rawData"]["title"], json!({"S": "Hi"}));

        // Delete
        let response = send(&app, "DELETE", "/post/p1", Body::empty()).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await["message"],
            "Successfully deleted post."
        );

        let response = send(&app, "GET", "/posts", Body::empty()).await;
        assert_eq!(body_json(response).await["data"], json!([]));
    }

    #[tokio::test]
    async fn test_malformed_body_returns_failure_envelope() {
        let app = create_app(AppState::in_memory());

        let response = send(&app, "POST", "/post", "{not json").await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );

        let json = body_json(response).await;
        assert_eq!(json["message"], "Failed to create post.");
        assert!(json["errorMsg"].is_string());
        assert!(json["errorStack"].is_string());
    }

    #[tokio::test]
    async fn test_non_utf8_body_returns_failure_envelope() {
        let app = create_app(AppState::in_memory());

        let response = send(&app, "PUT", "/post/p1", vec![0xffu8, 0xfe, 0x00]).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await["message"],
            "Failed to update post."
        );
    }

    #[tokio::test]
    async fn test_oversized_body_returns_failure_envelope() {
        let app = create_app(AppState::in_memory());
        let body = vec![b' '; 3 * 1024 * 1024];

        let response = send(&app, "POST", "/post", body).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );

        let json = body_json(response).await;
        assert_eq!(json["message"], "Failed to create post.");
        assert!(json["errorMsg"]
            .as_str()
            .unwrap()
            .starts_with("Invalid request"));
        assert!(json["errorStack"].is_string());
    }

    #[tokio::test]
    async fn test_undecodable_post_id_returns_failure_envelope() {
        let app = create_app(AppState::in_memory());

        for (method, uri, message) in [
            ("GET", "/post/%FF", "Failed to get post."),
            ("DELETE", "/post/%FF%FE", "Failed to delete post."),
            ("PUT", "/post/%FF", "Failed to update post."),
        ] {
            let response = send(&app, method, uri, r#"{"title":"Hi"}"#).await;

            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(
                response.headers().get(header::CONTENT_TYPE).unwrap(),
                "application/json"
            );

            let json = body_json(response).await;
            assert_eq!(json["message"], message);
            assert!(json["errorMsg"].as_str().unwrap().contains("postId"));
        }
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let app = create_app(AppState::in_memory());

        let response = send(&app, "GET", "/nope", Body::empty()).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
