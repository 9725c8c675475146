use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditAction {
    Create,
    UpdateStatus,
    Delete,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Create => "CREATE",
            AuditAction::UpdateStatus => "UPDATE_STATUS",
            AuditAction::Delete => "DELETE",
        }
    }
}

/// Append-only record written in the same transaction as the change it describes.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditEntry {
    pub action: AuditAction,
    pub resource: &'static str,
    pub resource_id: Uuid,
    pub actor_id: Option<Uuid>,
    pub metadata: serde_json::Value,
}

impl AuditEntry {
    pub fn tenant(
        action: AuditAction,
        tenant_id: Uuid,
        actor_id: Option<Uuid>,
        metadata: serde_json::Value,
    ) -> Self {
        Self {
            action,
            resource: "tenant",
            resource_id: tenant_id,
            actor_id,
            metadata,
        }
    }
}
