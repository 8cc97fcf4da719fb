//! Post handlers.
//!
//! Each handler collects path parameters and the raw body into an
//! `Invocation` and hands it to the post service. Extractor rejections
//! (undecodable path, unreadable or oversized body) are turned into the
//! operation's failure envelope, so every response keeps the same shape.

use std::collections::HashMap;

use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, PathRejection},
        Path, State,
    },
};

use postdesk_core::post::{Invocation, RequestError};

use super::EnvelopeResponse;
use crate::service::Operation;
use crate::state::AppState;

type PathParams = Result<Path<HashMap<String, String>>, PathRejection>;
type RawBody = Result<Bytes, BytesRejection>;

/// Build an invocation from the extracted request parts.
fn invocation(params: PathParams, body: RawBody) -> Result<Invocation, RequestError> {
    let Path(path_parameters) =
        params.map_err(|rejection| RequestError::InvalidRequest(rejection.body_text()))?;
    let body = body.map_err(|rejection| RequestError::InvalidRequest(rejection.body_text()))?;

    Ok(Invocation {
        path_parameters,
        body: body.to_vec(),
    })
}

fn no_path() -> PathParams {
    Ok(Path(HashMap::new()))
}

fn no_body() -> RawBody {
    Ok(Bytes::new())
}

/// Get a post (GET /post/{postId}).
pub async fn get_post(State(state): State<AppState>, params: PathParams) -> EnvelopeResponse {
    match invocation(params, no_body()) {
        Ok(invocation) => state.posts.get_post(&invocation).await.into(),
        Err(error) => state.posts.reject(Operation::Get, error).into(),
    }
}

/// List all posts (GET /posts).
pub async fn get_all_posts(State(state): State<AppState>) -> EnvelopeResponse {
    state.posts.get_all_posts(&Invocation::new()).await.into()
}

/// Create a post (POST /post).
pub async fn create_post(State(state): State<AppState>, body: RawBody) -> EnvelopeResponse {
    match invocation(no_path(), body) {
        Ok(invocation) => state.posts.create_post(&invocation).await.into(),
        Err(error) => state.posts.reject(Operation::Create, error).into(),
    }
}

/// Update a post (PUT /post/{postId}).
pub async fn update_post(
    State(state): State<AppState>,
    params: PathParams,
    body: RawBody,
) -> EnvelopeResponse {
    match invocation(params, body) {
        Ok(invocation) => state.posts.update_post(&invocation).await.into(),
        Err(error) => state.posts.reject(Operation::Update, error).into(),
    }
}

/// Delete a post (DELETE /post/{postId}).
pub async fn delete_post(State(state): State<AppState>, params: PathParams) -> EnvelopeResponse {
    match invocation(params, no_body()) {
        Ok(invocation) => state.posts.delete_post(&invocation).await.into(),
        Err(error) => state.posts.reject(Operation::Delete, error).into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invocation_from_parts() {
        let mut params = HashMap::new();
        params.insert("postId".to_string(), "p1".to_string());

        let invocation =
            invocation(Ok(Path(params)), Ok(Bytes::from_static(b"{}"))).unwrap();

        assert_eq!(invocation.post_id().unwrap(), "p1");
        assert_eq!(invocation.body, b"{}".to_vec());
    }

    #[test]
    fn test_invocation_without_parts() {
        let invocation = invocation(no_path(), no_body()).unwrap();
        assert_eq!(invocation, Invocation::new());
    }
}
