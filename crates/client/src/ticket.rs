//! Ticket summary used when splitting a support ticket.
//!
//! Field values are read from JSON (camelCase keys) and rendered into the
//! fixed "Split from original ticket:" block. Missing fields render empty.

use serde::{Deserialize, Serialize};

use crate::actions::text::collapse_whitespace;

/// Fields copied from an existing ticket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TicketInfo {
    pub requester: Option<String>,
    pub assignee: Option<String>,
    pub ccs: Vec<String>,
    pub ticket_type: Option<String>,
    pub primary_product_component: Option<String>,
    pub related_product_components: Vec<String>,
    pub impact: Option<String>,
    pub datadog_org_id: Option<String>,
    pub language_requested: Option<String>,
    pub tier: Option<String>,
    pub user_region: Option<String>,
    pub url: Option<String>,
}

impl TicketInfo {
    /// Render the summary block, trimmed.
    pub fn format_summary(&self) -> String {
        fn field(value: &Option<String>) -> &str {
            value.as_deref().unwrap_or("")
        }

        let region = self
            .user_region
            .as_deref()
            .map(collapse_whitespace)
            .unwrap_or_default();

        let lines = [
            "Split from original ticket:".to_string(),
            format!("- Requester: {}", field(&self.requester)),
            format!("- Assignee: {}", field(&self.assignee)),
            format!("- CCs: {}", self.ccs.join(", ")),
            format!("- Ticket Type: {}", field(&self.ticket_type)),
            format!(
                "- Primary Product Component: {}",
                field(&self.primary_product_component)
            ),
            format!(
                "- Related Product Components: {}",
                self.related_product_components.join(", ")
            ),
            format!("- Impact: {}", field(&self.impact)),
            format!("- Datadog Org ID: {}", field(&self.datadog_org_id)),
            format!("- Language Requested: {}", field(&self.language_requested)),
            format!("- Tier: {}", field(&self.tier)),
            format!("- User Region: {}", region),
            format!("- Ticket URL: {}", field(&self.url)),
        ];

        lines.join("\n").trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_summary() {
        let info: TicketInfo = serde_json::from_str(
            r#"{
                "requester": "Aiko Tanaka",
                "assignee": "Sam Lee",
                "ccs": ["a@example.com", "b@example.com"],
                "ticketType": "Question",
                "primaryProductComponent": "APM",
                "relatedProductComponents": ["Logs", "RUM"],
                "impact": "Low",
                "datadogOrgId": "12345",
                "languageRequested": "Japanese",
                "tier": "Enterprise",
                "userRegion": "  Asia\n   Pacific ",
                "url": "https://support.example.com/tickets/42"
            }"#,
        )
        .unwrap();

        let summary = info.format_summary();
        assert!(summary.starts_with("Split from original ticket:\n- Requester: Aiko Tanaka\n"));
        assert!(summary.contains("- CCs: a@example.com, b@example.com\n"));
        assert!(summary.contains("- Related Product Components: Logs, RUM\n"));
        assert!(summary.contains("- User Region: Asia Pacific\n"));
        assert!(summary.ends_with("- Ticket URL: https://support.example.com/tickets/42"));
        assert_eq!(summary.lines().count(), 13);
    }

    #[test]
    fn test_empty_fields_render_blank() {
        let summary = TicketInfo::default().format_summary();
        assert!(summary.contains("- Requester: \n"));
        assert!(summary.contains("- CCs: \n"));
        assert!(summary.ends_with("- Ticket URL:"));
    }
}
