//! Purpose: Internal modules backing the public `api` surface.
//! Exports: `error`, `post`, `store`.
//! Role: Implementation detail; external callers go through `api`.

pub mod error;
pub mod post;
pub mod store;
