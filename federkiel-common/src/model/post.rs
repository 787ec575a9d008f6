use crate::model::PostId;
use serde::{Deserialize, Deserializer, Serialize, de::Error};
use std::collections::BTreeMap;
use thiserror::Error;

/// One accepted submission.
#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize)]
pub struct Post {
    pub id: PostId,
    pub content: PostContent,
}

#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash, Serialize)]
#[serde(transparent)]
pub struct PostContent(String);

#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash, Error)]
#[error("The post content is empty")]
pub struct InvalidPostContentError;

impl PostContent {
    pub fn new(content: String) -> Result<Self, InvalidPostContentError> {
        if content.is_empty() {
            Err(InvalidPostContentError)
        } else {
            Ok(PostContent(content))
        }
    }

    #[must_use]
    pub fn get(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl<'de> Deserialize<'de> for PostContent {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let inner = String::deserialize(deserializer)?;
        PostContent::new(inner).map_err(|_| {
            Error::invalid_value(serde::de::Unexpected::Str(""), &"a non-empty string")
        })
    }
}

/// The full mapping of all stored posts, serialized as one JSON object
/// (`{"1699999999999": "hello world"}`; empty collection is `{}`).
#[derive(Clone, Eq, PartialEq, Debug, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct PostCollection(BTreeMap<PostId, PostContent>);

impl PostCollection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts one entry. On a key collision the previous content is
    /// displaced and returned (last-write-wins).
    pub fn insert(&mut self, id: PostId, content: PostContent) -> Option<PostContent> {
        self.0.insert(id, content)
    }

    #[must_use]
    pub fn get(&self, id: PostId) -> Option<&PostContent> {
        self.0.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (PostId, &PostContent)> {
        self.0.iter().map(|(id, content)| (*id, content))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Post> for PostCollection {
    /// The single-entry collection `{ id: content }`, the shape a create
    /// request is answered with.
    fn from(post: Post) -> Self {
        let mut posts = Self::new();
        posts.insert(post.id, post.content);
        posts
    }
}

#[cfg(test)]
mod tests {
    use crate::model::{
        PostId,
        post::{Post, PostCollection, PostContent},
    };

    fn content(s: &str) -> PostContent {
        PostContent::new(s.to_owned()).unwrap()
    }

    #[test]
    fn content_rejects_the_empty_string() {
        assert!(PostContent::new(String::new()).is_err());
        assert!(serde_json::from_str::<PostContent>("\"\"").is_err());
        assert_eq!(content("a").get(), "a");
    }

    #[test]
    fn collection_serializes_as_a_string_keyed_object() {
        let mut posts = PostCollection::new();
        posts.insert(PostId::from_unix_millis(1_699_999_999_999), content("hello world"));

        assert_eq!(
            serde_json::to_string(&posts).unwrap(),
            r#"{"1699999999999":"hello world"}"#
        );
    }

    #[test]
    fn empty_collection_is_an_empty_object() {
        assert_eq!(serde_json::to_string(&PostCollection::new()).unwrap(), "{}");

        let posts: PostCollection = serde_json::from_str("{}").unwrap();
        assert!(posts.is_empty());
    }

    #[test]
    fn insert_on_colliding_id_displaces_the_previous_content() {
        let id = PostId::from_unix_millis(1_699_999_999_999);
        let mut posts = PostCollection::new();

        assert_eq!(posts.insert(id, content("first")), None);
        assert_eq!(posts.insert(id, content("second")), Some(content("first")));

        assert_eq!(posts.len(), 1);
        assert_eq!(posts.get(id), Some(&content("second")));
    }

    #[test]
    fn single_entry_collection_from_post() {
        let post = Post {
            id: PostId::from_unix_millis(42),
            content: content("hi"),
        };

        let posts = PostCollection::from(post);
        assert_eq!(serde_json::to_string(&posts).unwrap(), r#"{"42":"hi"}"#);
    }
}
