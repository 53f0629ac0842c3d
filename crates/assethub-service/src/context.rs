//! Request context carrying the resolved caller.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use assethub_auth::Caller;
use assethub_core::types::id::UserId;

/// Context for the current request.
///
/// Built by the API layer and passed into every mutating service method so
/// that the operation knows *who* is acting.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// The caller, anonymous or authenticated.
    pub caller: Caller,
    /// Correlation id for log lines.
    pub request_id: Uuid,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(caller: Caller) -> Self {
        Self {
            caller,
            request_id: Uuid::new_v4(),
            request_time: Utc::now(),
        }
    }

    /// Context for an unauthenticated request.
    pub fn anonymous() -> Self {
        Self::new(Caller::Anonymous)
    }

    /// Context for an authenticated user.
    pub fn user(user_id: UserId) -> Self {
        Self::new(Caller::User(user_id))
    }

    /// The acting user, if any.
    pub fn user_id(&self) -> Option<UserId> {
        self.caller.user_id()
    }
}
