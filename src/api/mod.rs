//! Purpose: Define the stable public API boundary for postdeck.
//! Exports: Models, remote client, store, and error types used by the CLI and tests.
//! Role: The only public path to the client and store; internals stay in `core`.

pub(crate) mod remote;

#[doc(hidden)]
pub use crate::core::error::to_exit_code;
pub use crate::core::error::{Error, ErrorKind};
pub use crate::core::post::{Draft, Post, PostPatch, UpdatedFields};
pub use crate::core::store::{ErrorStyle, OpId, OpStatus, Operation, Store};
pub use remote::{DEFAULT_BASE_URL, RemoteClient};
