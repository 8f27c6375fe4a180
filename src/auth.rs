//! Operator authorization
//!
//! Broadcasting is privileged. Rather than a module-level constant of admin
//! IDs, the check is an injected policy: the command layer receives an
//! [`AuthorizationPolicy`] at construction time, so deployments can swap it
//! and tests can exercise both outcomes.

use crate::types::RecipientId;
use std::collections::HashSet;

/// Decides whether a caller may issue operator commands
pub trait AuthorizationPolicy: Send + Sync {
    /// Whether this platform user is an operator
    fn is_operator(&self, caller: RecipientId) -> bool;
}

/// Any capability-check closure is a policy
impl<F> AuthorizationPolicy for F
where
    F: Fn(RecipientId) -> bool + Send + Sync,
{
    fn is_operator(&self, caller: RecipientId) -> bool {
        self(caller)
    }
}

/// Fixed allow-list of operator identifiers
#[derive(Clone, Debug, Default)]
pub struct AllowList {
    operators: HashSet<RecipientId>,
}

impl AllowList {
    /// Build an allow-list from the given operator identifiers
    pub fn new(operators: impl IntoIterator<Item = RecipientId>) -> Self {
        Self {
            operators: operators.into_iter().collect(),
        }
    }
}

impl AuthorizationPolicy for AllowList {
    fn is_operator(&self, caller: RecipientId) -> bool {
        self.operators.contains(&caller)
    }
}
