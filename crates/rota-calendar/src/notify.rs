//! "Notify staff" confirmation.
//!
//! Nothing is sent. The receipt echoes who would be told and how.

use serde::{Deserialize, Serialize};

use rota_core::{NotifyMethod, Role, StaffMember};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotifyRequest {
    pub method: NotifyMethod,
    /// Selected roles; the dialog starts with everyone ticked.
    pub staff: Vec<Role>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotifyReceipt {
    pub method: NotifyMethod,
    pub recipients: Vec<String>,
    /// "Everyone", or "N Selected".
    pub summary: String,
    pub delivered: bool,
}

/// Build the receipt for a selection against the current roster.
/// Roles not on the roster are dropped.
pub fn confirm(request: &NotifyRequest, roster: &[StaffMember]) -> NotifyReceipt {
    let recipients: Vec<&StaffMember> = roster
        .iter()
        .filter(|s| request.staff.contains(&s.role))
        .collect();

    let summary = if !roster.is_empty() && recipients.len() == roster.len() {
        "Everyone".to_string()
    } else {
        format!("{} Selected", recipients.len())
    };

    NotifyReceipt {
        method: request.method,
        recipients: recipients.iter().map(|s| s.name.clone()).collect(),
        summary,
        delivered: false,
    }
}
