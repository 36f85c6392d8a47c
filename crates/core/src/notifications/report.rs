//! HTML rendering for change and error reports.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use super::notifications_model::ErrorReport;
use crate::changes::ChangeSet;
use crate::subscriptions::{format_minor_units, SubscriptionRecord};
use crate::utils::format_report_timestamp;

/// Escapes text for inclusion in an HTML body.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn subscription_line(record: &SubscriptionRecord) -> String {
    format!(
        "<li>{} (ID: {}) - {} {}</li>",
        escape_html(&record.name),
        record.id,
        record.formatted_price(),
        escape_html(&record.currency)
    )
}

fn push_section(body: &mut String, title: &str, lines: Vec<String>) {
    if lines.is_empty() {
        return;
    }
    body.push_str(&format!("<h3>{}:</h3><ul>", title));
    for line in lines {
        body.push_str(&line);
    }
    body.push_str("</ul>");
}

/// Renders the human-readable change report.
///
/// An empty change set still renders, with an explicit "no changes" line.
pub fn render_change_report(changes: &ChangeSet, generated_at: DateTime<Utc>, tz: Tz) -> String {
    let mut body = String::from("<h2>Step In Subscription Changes Detected</h2>");
    body.push_str(&format!(
        "<p>Generated at: {}</p>",
        format_report_timestamp(generated_at, tz)
    ));

    push_section(
        &mut body,
        "New Subscriptions",
        changes.added.iter().map(subscription_line).collect(),
    );
    push_section(
        &mut body,
        "Removed Subscriptions",
        changes.removed.iter().map(subscription_line).collect(),
    );
    push_section(
        &mut body,
        "Price Changes",
        changes
            .price_changes
            .iter()
            .map(|change| {
                format!(
                    "<li>{} (ID: {}): {} -> {} {}</li>",
                    escape_html(&change.name),
                    change.id,
                    format_minor_units(change.old_price),
                    format_minor_units(change.new_price),
                    escape_html(&change.currency)
                )
            })
            .collect(),
    );

    if changes.is_empty() {
        body.push_str("<p>No changes detected.</p>");
    }
    body
}

/// Renders the administrator alert for a failed run.
pub fn render_error_report(report: &ErrorReport, tz: Tz) -> String {
    let mut body = String::from("<h2>Step In API Error Alert</h2>");
    body.push_str(
        "<p>An error occurred while fetching subscription data from Step In API.</p>",
    );
    body.push_str("<h3>Error Details:</h3><ul>");
    body.push_str(&format!("<li>Message: {}</li>", escape_html(&report.message)));
    body.push_str(&format!(
        "<li>Time: {}</li>",
        format_report_timestamp(report.occurred_at, tz)
    ));
    if let Some(status) = report.status {
        body.push_str(&format!("<li>Status: {}</li>", status));
    }
    if let Some(detail) = &report.detail {
        body.push_str(&format!("<li>Data: {}</li>", escape_html(detail)));
    }
    body.push_str("</ul>");
    body
}
