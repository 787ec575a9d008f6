use federkiel_common::model::{
    PostId,
    post::{Post, PostCollection, PostContent},
};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

pub type Result<T, E = StoreError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read posts: {0}")]
    Read(#[source] std::io::Error),
    #[error("Stored posts are not a valid collection: {0}")]
    Format(#[from] serde_json::Error),
    #[error("Failed to save posts: {0}")]
    Write(#[source] std::io::Error),
}

/// Durable storage of the post collection as one JSON document at a fixed
/// path.
///
/// The store itself holds no state besides the path; every `load` and `save`
/// is a one-shot operation against the file.
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct PostStore {
    path: PathBuf,
}

impl PostStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Seeds the storage file with an empty collection if it does not exist
    /// yet, so a fresh deployment serves `{}` instead of a read error.
    pub async fn ensure_exists(&self) -> Result<()> {
        if tokio::fs::try_exists(&self.path)
            .await
            .map_err(StoreError::Read)?
        {
            return Ok(());
        }

        debug!(path = %self.path.display(), "Seeding empty post collection");
        self.save(&PostCollection::new()).await
    }

    /// Reads the full collection from storage.
    pub async fn load(&self) -> Result<PostCollection> {
        let bytes = tokio::fs::read(&self.path).await.map_err(StoreError::Read)?;
        let posts = serde_json::from_slice(&bytes)?;
        Ok(posts)
    }

    /// Overwrites storage with the complete collection. Full replace, not an
    /// append; the caller must already have merged any new entry. On a write
    /// failure the previous on-disk state is unspecified.
    pub async fn save(&self, posts: &PostCollection) -> Result<()> {
        let bytes = serde_json::to_vec(posts)?;
        tokio::fs::write(&self.path, bytes)
            .await
            .map_err(StoreError::Write)
    }

    /// Loads the collection, inserts `content` under a freshly generated id,
    /// and saves the result, returning the created post.
    ///
    /// The read-modify-write is unsynchronized: two concurrent appends may
    /// both load the same snapshot, and the save that lands second discards
    /// the other's entry (lost update). Same-millisecond appends collide on
    /// the id and resolve last-write-wins.
    pub async fn append(&self, content: PostContent) -> Result<Post> {
        let mut posts = self.load().await?;
        debug!(count = posts.len(), content = content.get(), "Appending post");

        let id = PostId::now();
        posts.insert(id, content.clone());
        self.save(&posts).await?;
        debug!(count = posts.len(), %id, "Saved posts");

        Ok(Post { id, content })
    }
}
