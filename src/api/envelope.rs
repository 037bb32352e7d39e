//! Uniform response envelope shared by every resource endpoint

use serde::Serialize;

/// Which envelope field carries the caller identity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    User,
    CreatedBy,
    UpdatedBy,
    DeletedBy,
    SearchedBy,
}

/// `{success, data?, message, error?}` plus the caller identity under one of
/// `user`, `createdBy`, `updatedBy`, `deletedBy` or `searchedBy`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub searched_by: Option<String>,
}

impl<T> ApiResponse<T> {
    fn new(success: bool, data: Option<T>, message: String, error: Option<String>) -> Self {
        Self {
            success,
            data,
            message,
            error,
            user: None,
            created_by: None,
            updated_by: None,
            deleted_by: None,
            searched_by: None,
        }
    }

    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self::new(true, Some(data), message.into(), None)
    }

    pub fn with_actor(mut self, actor: Actor, identity: impl Into<String>) -> Self {
        let identity = Some(identity.into());
        match actor {
            Actor::User => self.user = identity,
            Actor::CreatedBy => self.created_by = identity,
            Actor::UpdatedBy => self.updated_by = identity,
            Actor::DeletedBy => self.deleted_by = identity,
            Actor::SearchedBy => self.searched_by = identity,
        }
        self
    }
}

impl ApiResponse<()> {
    /// Success without a payload
    pub fn done(message: impl Into<String>) -> Self {
        Self::new(true, None, message.into(), None)
    }

    pub fn failure(message: impl Into<String>, error: Option<String>) -> Self {
        Self::new(false, None, message.into(), error)
    }
}
