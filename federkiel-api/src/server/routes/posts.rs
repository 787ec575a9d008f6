use crate::server::{Result, ServerError, ServerRouter, form::Form, json::Json};
use axum::extract::State;
use axum_extra::routing::{RouterExt, TypedPath};
use federkiel_common::model::post::{PostCollection, PostContent};
use federkiel_store::store::PostStore;
use serde::Deserialize;
use std::sync::Arc;

pub fn routes() -> ServerRouter {
    ServerRouter::new()
        .typed_get(get_posts)
        .typed_post(create_post)
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/posts", rejection(ServerError))]
struct PostsPath();

async fn get_posts(
    PostsPath(): PostsPath,
    State(store): State<Arc<PostStore>>,
) -> Result<Json<PostCollection>> {
    let posts = store.load().await?;

    Ok(Json(posts))
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize)]
struct CreatePostForm {
    #[serde(default)]
    blogspot: String,
}

async fn create_post(
    PostsPath(): PostsPath,
    State(store): State<Arc<PostStore>>,
    Form(form): Form<CreatePostForm>,
) -> Result<Json<PostCollection>> {
    // Rejects a missing or empty field before any storage I/O happens.
    let content = PostContent::new(form.blogspot)?;

    let post = store.append(content).await?;

    Ok(Json(PostCollection::from(post)))
}
