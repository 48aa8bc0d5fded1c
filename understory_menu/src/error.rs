// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Usage errors reported by the registration and nonce operations.
//!
//! None of these are fatal. The logging entry points
//! ([`attach`](crate::controller::ContextMenu::attach) and friends) write the
//! [`Display`](core::fmt::Display) text through `log::error!` and leave state
//! untouched; the `try_*` variants return the error instead.

use alloc::string::String;

/// A rejected registration or configuration call.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum MenuError {
    /// No element in the document matches the selector.
    #[error("target element {0} not found")]
    TargetNotFound(String),
    /// The selector already has a registration.
    #[error("target element {0} already has a context menu assigned. Use update() or delete() instead.")]
    AlreadyAttached(String),
    /// `delete` was called for a selector without a registration.
    #[error("no context menu for target element {0} found")]
    NotAttached(String),
    /// The registered element left the document; its registration was purged.
    #[error("target element {0} does not exist (anymore)")]
    TargetRemoved(String),
    /// The stylesheet was already installed, so the nonce can no longer apply.
    #[error("set_nonce() must be called before the first menu is shown")]
    NonceTooLate,
}
