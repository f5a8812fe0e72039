//! Purpose: Shared library crate used by the `postdeck` CLI and tests.
//! Exports: `api` (models, remote client, store, errors) and `shell` (the view).
//! Role: Internal library backing the binary; not yet a stable public SDK.
//! Invariants: `api` and `shell` are the supported entry points; `core` layout may change.

pub mod api;
pub(crate) mod core;
pub mod shell;
