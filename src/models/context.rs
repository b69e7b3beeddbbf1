use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::TournamentError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Coach,
    Viewer,
}

/// Caller identity passed explicitly into every service operation.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub user_id: Uuid,
    pub tenant_id: Uuid,
    pub role: UserRole,
}

impl RequestContext {
    pub fn new(user_id: Uuid, tenant_id: Uuid, role: UserRole) -> Self {
        Self { user_id, tenant_id, role }
    }

    /// Tenant filter for reads and edits. Admins see every tenant.
    pub fn tenant_scope(&self) -> Option<Uuid> {
        match self.role {
            UserRole::Admin => None,
            _ => Some(self.tenant_id),
        }
    }

    pub fn can_manage(&self) -> bool {
        matches!(self.role, UserRole::Admin | UserRole::Coach)
    }

    pub fn require_manager(&self) -> Result<(), TournamentError> {
        if self.can_manage() {
            Ok(())
        } else {
            tracing::warn!("User {} ({:?}) attempted a write operation", self.user_id, self.role);
            Err(TournamentError::Forbidden("Insufficient privileges".into()))
        }
    }
}
