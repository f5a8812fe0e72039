//! Purpose: Client-side state store for the post collection.
//! Exports: `Store`, `OpId`, `Operation`, `OpStatus`, `ErrorStyle`.
//! Role: Owns the in-memory posts plus a per-operation status registry;
//! each operation performs one remote call and reconciles the collection.
//! Invariants: A failed operation never touches `posts`.
//! Invariants: Status records are scoped per operation and never overwritten
//! by a later operation; the displayed error always comes from the latest one.

use crate::api::remote::RemoteClient;
use crate::core::error::Error;
use crate::core::post::{Draft, Post, PostPatch};
use tracing::{debug, warn};

pub type OpId = u64;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Operation {
    Fetch,
    Add,
    Update,
    Delete,
}

impl Operation {
    /// The fixed operation message surfaced under `ErrorStyle::Fixed`.
    fn failure_message(self) -> &'static str {
        match self {
            Operation::Fetch => "Failed to fetch posts",
            Operation::Add => "Failed to add post",
            Operation::Update => "Failed to update post",
            Operation::Delete => "Failed to delete post",
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum OpStatus {
    Pending,
    Done,
    Failed(String),
}

/// How much of the underlying failure the store surfaces.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ErrorStyle {
    /// One fixed message per operation, with no cause attached.
    #[default]
    Fixed,
    /// Fixed message plus the underlying error (kind, status).
    Detailed,
}

#[derive(Clone, Debug)]
struct OpRecord {
    id: OpId,
    operation: Operation,
    status: OpStatus,
}

pub struct Store {
    client: RemoteClient,
    error_style: ErrorStyle,
    posts: Vec<Post>,
    ops: Vec<OpRecord>,
    next_op: OpId,
}

impl Store {
    pub fn new(client: RemoteClient) -> Self {
        Self {
            client,
            error_style: ErrorStyle::default(),
            posts: Vec::new(),
            ops: Vec::new(),
            next_op: 1,
        }
    }

    pub fn with_error_style(mut self, style: ErrorStyle) -> Self {
        self.error_style = style;
        self
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn post(&self, id: u64) -> Option<&Post> {
        self.posts.iter().find(|post| post.id == id)
    }

    pub fn status(&self, op: OpId) -> Option<&OpStatus> {
        self.ops
            .iter()
            .find(|record| record.id == op)
            .map(|record| &record.status)
    }

    /// True while any operation is still pending.
    pub fn is_loading(&self) -> bool {
        self.ops
            .iter()
            .any(|record| record.status == OpStatus::Pending)
    }

    /// The latest operation's failure message, if it failed. Starting a new
    /// operation therefore clears the displayed error without erasing the
    /// older records.
    pub fn last_error(&self) -> Option<&str> {
        match self.ops.last().map(|record| &record.status) {
            Some(OpStatus::Failed(message)) => Some(message.as_str()),
            _ => None,
        }
    }

    /// Replace the collection wholesale with the server's, in server order.
    pub fn fetch(&mut self) -> OpId {
        let op = self.begin(Operation::Fetch);
        match self.client.posts() {
            Ok(posts) => {
                debug!(count = posts.len(), "fetched posts");
                self.posts = posts;
                self.finish(op, None);
            }
            Err(err) => self.finish(op, Some(err)),
        }
        op
    }

    /// Create from a draft and append the server-returned entity.
    pub fn add(&mut self, draft: Draft) -> OpId {
        let op = self.begin(Operation::Add);
        match self.client.create_post(&draft) {
            Ok(post) => {
                debug!(id = post.id, "added post");
                self.posts.push(post);
                self.finish(op, None);
            }
            Err(err) => self.finish(op, Some(err)),
        }
        op
    }

    /// Update the entity with matching id, merging the response fields into
    /// it. Other entities are untouched; a response for an id with no local
    /// counterpart changes nothing.
    pub fn update(&mut self, id: u64, patch: PostPatch) -> OpId {
        let op = self.begin(Operation::Update);
        match self.client.update_post(id, &patch) {
            Ok(fields) => {
                if let Some(post) = self.posts.iter_mut().find(|post| post.id == id) {
                    post.apply(fields);
                }
                self.finish(op, None);
            }
            Err(err) => self.finish(op, Some(err)),
        }
        op
    }

    /// Remove the entity with matching id, preserving the order of the rest.
    pub fn delete(&mut self, id: u64) -> OpId {
        let op = self.begin(Operation::Delete);
        match self.client.delete_post(id) {
            Ok(()) => {
                self.posts.retain(|post| post.id != id);
                self.finish(op, None);
            }
            Err(err) => self.finish(op, Some(err)),
        }
        op
    }

    fn begin(&mut self, operation: Operation) -> OpId {
        let id = self.next_op;
        self.next_op += 1;
        self.ops.push(OpRecord {
            id,
            operation,
            status: OpStatus::Pending,
        });
        id
    }

    fn finish(&mut self, op: OpId, error: Option<Error>) {
        let style = self.error_style;
        let Some(record) = self.ops.iter_mut().find(|record| record.id == op) else {
            return;
        };
        record.status = match error {
            None => OpStatus::Done,
            Some(err) => {
                warn!(op, operation = ?record.operation, %err, "operation failed");
                OpStatus::Failed(failure_text(style, record.operation, &err))
            }
        };
    }
}

fn failure_text(style: ErrorStyle, operation: Operation, err: &Error) -> String {
    match style {
        ErrorStyle::Fixed => operation.failure_message().to_string(),
        ErrorStyle::Detailed => format!("{}: {err}", operation.failure_message()),
    }
}
