//! Request-scoped identity.
//!
//! Every service operation receives the acting employee explicitly through a
//! [`RequestContext`]; nothing in the engine reads an ambient "current user".

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, Role, normalize_employee_id};

/// Who is performing an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    /// The acting employee's identifier, trimmed.
    pub actor_id: String,
    /// The acting employee's role.
    pub role: Role,
}

impl RequestContext {
    /// Creates a context for `actor_id` acting with `role`.
    ///
    /// ```
    /// use paytrack_engine::context::RequestContext;
    /// use paytrack_engine::models::Role;
    ///
    /// let ctx = RequestContext::new(" u001 ", Role::Worker);
    /// assert_eq!(ctx.actor_id, "u001");
    /// assert!(ctx.require_admin("view payroll").is_err());
    /// ```
    pub fn new(actor_id: &str, role: Role) -> Self {
        Self {
            actor_id: normalize_employee_id(actor_id).to_string(),
            role,
        }
    }

    /// Creates a context acting as `employee`.
    pub fn for_employee(employee: &Employee) -> Self {
        Self::new(&employee.id, employee.role)
    }

    /// Fails with [`EngineError::Forbidden`] unless the actor is an admin.
    pub fn require_admin(&self, action: &str) -> EngineResult<()> {
        match self.role {
            Role::Admin => Ok(()),
            Role::Worker => Err(EngineError::Forbidden {
                actor_id: self.actor_id.clone(),
                action: action.to_string(),
            }),
        }
    }
}
