//! CSV export endpoint

use std::sync::Arc;

use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
};
use chrono::{DateTime, Utc};

use crate::api::state::AppState;
use crate::types::ExportRow;

const CSV_HEADER: [&str; 8] = [
    "ID",
    "Name",
    "RSVP Status",
    "Display Status",
    "RSVP Timestamp",
    "Waitlist Position",
    "Paid",
    "Checked In",
];

/// GET /export/csv - Download every participant as CSV
pub async fn export_csv(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let body = render_csv(&state.roster.export_snapshot());
    let disposition = format!("attachment; filename={}", export_filename(Utc::now()));

    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
}

/// `rsvp_export_YYYYMMDD_HHMMSS.csv`
pub fn export_filename(now: DateTime<Utc>) -> String {
    format!("rsvp_export_{}.csv", now.format("%Y%m%d_%H%M%S"))
}

pub fn render_csv(rows: &[ExportRow]) -> String {
    let mut out = String::new();
    push_record(&mut out, CSV_HEADER.iter().map(|h| h.to_string()));

    for row in rows {
        let yes_no = |flag: bool| (if flag { "YES" } else { "NO" }).to_string();
        push_record(
            &mut out,
            [
                row.id.to_string(),
                row.name.clone(),
                row.rsvp_status.clone(),
                row.display_status.clone(),
                row.rsvp_timestamp.clone(),
                row.waitlist_position.map(|p| p.to_string()).unwrap_or_default(),
                yes_no(row.paid),
                yes_no(row.checked_in),
            ]
            .into_iter(),
        );
    }
    out
}

fn push_record(out: &mut String, fields: impl Iterator<Item = String>) {
    for (index, field) in fields.enumerate() {
        if index > 0 {
            out.push(',');
        }
        if field.contains(|c: char| matches!(c, ',' | '"' | '\n' | '\r')) {
            out.push('"');
            out.push_str(&field.replace('"', "\"\""));
            out.push('"');
        } else {
            out.push_str(&field);
        }
    }
    out.push('\n');
}
