//! The mutation policy.
//!
//! Reads are always open. Writes are decided per request from the
//! [`Caller`], the kind of [`Mutation`], and the two deployment switches in
//! [`PolicyConfig`]. The policy is a plain value so it can be tested apart
//! from any store or handler.

use std::fmt;

use tracing::warn;

use assethub_core::config::PolicyConfig;
use assethub_core::error::AppError;
use assethub_core::types::id::UserId;

/// The identity behind a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Caller {
    /// No credentials were presented.
    #[default]
    Anonymous,
    /// A verified user.
    User(UserId),
}

impl Caller {
    /// The user ID, if authenticated.
    pub fn user_id(&self) -> Option<UserId> {
        match self {
            Self::Anonymous => None,
            Self::User(id) => Some(*id),
        }
    }

    /// Whether the caller presented valid credentials.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::User(_))
    }
}

/// A state-changing operation subject to the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    /// Create a directory. `sidebar` is the caller-supplied sidebar-item flag.
    CreateDirectory { sidebar: bool },
    /// Delete a directory subtree.
    DeleteDirectory,
    /// Reparent a directory.
    MoveDirectory,
    /// Upload a new chain root.
    CreateFile,
    /// Supersede a chain's latest record.
    ReviseFile,
    /// Delete a whole chain.
    DeleteFile,
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::CreateDirectory { .. } => "create directory",
            Self::DeleteDirectory => "delete directory",
            Self::MoveDirectory => "move directory",
            Self::CreateFile => "create file",
            Self::ReviseFile => "revise file",
            Self::DeleteFile => "delete file",
        };
        f.write_str(name)
    }
}

/// Decides whether a caller may perform a mutation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MutationPolicy {
    allow_anonymous_delete: bool,
    allow_sidebar_create: bool,
}

impl MutationPolicy {
    /// A policy that requires authentication for every mutation.
    pub fn strict() -> Self {
        Self::default()
    }

    /// Whether `caller` may perform `mutation`.
    pub fn permits(&self, caller: &Caller, mutation: Mutation) -> bool {
        if caller.is_authenticated() {
            return true;
        }
        match mutation {
            Mutation::CreateDirectory { sidebar } => sidebar && self.allow_sidebar_create,
            Mutation::DeleteDirectory => self.allow_anonymous_delete,
            Mutation::MoveDirectory
            | Mutation::CreateFile
            | Mutation::ReviseFile
            | Mutation::DeleteFile => false,
        }
    }

    /// Like [`permits`](Self::permits), returning `Unauthorized` on denial.
    pub fn authorize(&self, caller: &Caller, mutation: Mutation) -> Result<(), AppError> {
        if self.permits(caller, mutation) {
            Ok(())
        } else {
            warn!(%mutation, "Anonymous mutation denied");
            Err(AppError::unauthorized(format!(
                "Authentication is required to {mutation}"
            )))
        }
    }
}

impl From<&PolicyConfig> for MutationPolicy {
    fn from(config: &PolicyConfig) -> Self {
        Self {
            allow_anonymous_delete: config.allow_anonymous_delete,
            allow_sidebar_create: config.allow_sidebar_create,
        }
    }
}
