//! Purpose: Wire model for the remote posts resource.
//! Exports: `Post`, `Draft`, `PostPatch`, `UpdatedFields`.
//! Role: Serde types shared by the client and the store.
//! Invariants: Field names on the wire are `id`, `userId`, `title`, `body`.
//! Invariants: `Post::apply` never changes the entity's id.

use serde::{Deserialize, Serialize};

/// A post as the remote service stores it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    #[serde(rename = "userId", default)]
    pub user_id: u64,
    pub title: String,
    pub body: String,
}

/// A creation payload: a post without a server-assigned id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Draft {
    pub title: String,
    pub body: String,
    #[serde(rename = "userId", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
}

impl Draft {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            user_id: None,
        }
    }
}

/// A partial update payload; absent fields are left out of the request body.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PostPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(rename = "userId", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
}

impl PostPatch {
    pub fn text(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            body: Some(body.into()),
            user_id: None,
        }
    }
}

/// Fields an update response may carry besides the id.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct UpdatedFields {
    #[serde(rename = "userId")]
    pub user_id: Option<u64>,
    pub title: Option<String>,
    pub body: Option<String>,
}

impl Post {
    /// Merge response fields into this entity; absent fields stay as they are.
    pub fn apply(&mut self, fields: UpdatedFields) {
        if let Some(user_id) = fields.user_id {
            self.user_id = user_id;
        }
        if let Some(title) = fields.title {
            self.title = title;
        }
        if let Some(body) = fields.body {
            self.body = body;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Draft, Post, PostPatch, UpdatedFields};

    fn post() -> Post {
        Post {
            id: 3,
            user_id: 9,
            title: "before".to_string(),
            body: "old body".to_string(),
        }
    }

    #[test]
    fn apply_merges_present_fields_only() {
        let mut post = post();
        post.apply(UpdatedFields {
            user_id: None,
            title: Some("after".to_string()),
            body: None,
        });
        assert_eq!(post.id, 3);
        assert_eq!(post.user_id, 9);
        assert_eq!(post.title, "after");
        assert_eq!(post.body, "old body");
    }

    #[test]
    fn apply_with_empty_fields_is_identity() {
        let mut post = post();
        post.apply(UpdatedFields::default());
        assert_eq!(post, self::post());
    }

    #[test]
    fn post_round_trips_wire_names() {
        let json = r#"{"id":1,"userId":2,"title":"a","body":"b"}"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.user_id, 2);
        let out = serde_json::to_value(&post).unwrap();
        assert_eq!(out["userId"], 2);
    }

    #[test]
    fn draft_omits_absent_user_id() {
        let value = serde_json::to_value(Draft::new("t", "b")).unwrap();
        assert!(value.get("userId").is_none());
        assert!(value.get("id").is_none());
    }

    #[test]
    fn patch_serializes_only_present_fields() {
        let patch = PostPatch {
            body: Some("new".to_string()),
            ..PostPatch::default()
        };
        let value = serde_json::to_value(&patch).unwrap();
        assert_eq!(value.as_object().unwrap().len(), 1);
        assert_eq!(value["body"], "new");
    }
}
