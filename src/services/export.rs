//! Export service implementation
//!
//! Builds spreadsheet-compatible CSV files for the dashboard's download
//! buttons. Fields are quoted per RFC 4180 so names containing commas or
//! quotes survive the round trip into a spreadsheet.

use crate::models::convert::Convert;
use crate::models::guest::Guest;
use crate::models::member::Member;
use crate::models::new_member::NewMember;

#[derive(Debug, Clone, Default)]
pub struct ExportService;

impl ExportService {
    pub fn new() -> Self {
        Self
    }

    /// Escape one CSV field
    fn escape(field: &str) -> String {
        if field.contains(',') || field.contains('"') || field.contains('\n') {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }

    fn row(fields: &[String]) -> String {
        fields
            .iter()
            .map(|f| Self::escape(f))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// CSV export of converts, including their pipeline stage label
    pub fn converts_csv(&self, converts: &[Convert]) -> String {
        let mut out = String::from(
            "First Name,Last Name,Email,Phone,Decision Date,Stage,Notes\n",
        );
        for convert in converts {
            out.push_str(&Self::row(&[
                convert.first_name.clone(),
                convert.last_name.clone(),
                convert.email.clone().unwrap_or_default(),
                convert.phone.clone().unwrap_or_default(),
                convert.decision_date.to_string(),
                convert.stage.label().to_string(),
                convert.notes.clone().unwrap_or_default(),
            ]));
            out.push('\n');
        }
        out
    }

    /// CSV export of new members, including their pipeline stage label
    pub fn new_members_csv(&self, members: &[NewMember]) -> String {
        let mut out = String::from(
            "First Name,Last Name,Email,Phone,Joined Date,Stage,Notes\n",
        );
        for member in members {
            out.push_str(&Self::row(&[
                member.first_name.clone(),
                member.last_name.clone(),
                member.email.clone().unwrap_or_default(),
                member.phone.clone().unwrap_or_default(),
                member.joined_date.to_string(),
                member.stage.label().to_string(),
                member.notes.clone().unwrap_or_default(),
            ]));
            out.push('\n');
        }
        out
    }

    /// CSV export of the member directory
    pub fn members_csv(&self, members: &[Member]) -> String {
        let mut out = String::from("First Name,Last Name,Email,Phone,Membership Date\n");
        for member in members {
            out.push_str(&Self::row(&[
                member.first_name.clone(),
                member.last_name.clone(),
                member.email.clone().unwrap_or_default(),
                member.phone.clone().unwrap_or_default(),
                member.membership_date.to_string(),
            ]));
            out.push('\n');
        }
        out
    }

    /// CSV export of guests
    pub fn guests_csv(&self, guests: &[Guest]) -> String {
        let mut out = String::from("First Name,Last Name,Email,Phone,Visit Date,Invited By\n");
        for guest in guests {
            out.push_str(&Self::row(&[
                guest.first_name.clone(),
                guest.last_name.clone(),
                guest.email.clone().unwrap_or_default(),
                guest.phone.clone().unwrap_or_default(),
                guest.visit_date.to_string(),
                guest.invited_by.clone().unwrap_or_default(),
            ]));
            out.push('\n');
        }
        out
    }

    /// Attachment filename for an export
    pub fn filename(&self, church_slug: &str, entity: &str) -> String {
        format!("{}-{}.csv", church_slug, entity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::FollowUpStage;
    use chrono::{NaiveDate, Utc};

    fn convert(first: &str, last: &str, notes: Option<&str>) -> Convert {
        Convert {
            id: 1,
            church_id: 1,
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: Some("person@example.org".to_string()),
            phone: None,
            decision_date: NaiveDate::from_ymd_opt(2025, 3, 2).unwrap(),
            stage: FollowUpStage::Contacted,
            assigned_leader_id: None,
            notes: notes.map(String::from),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_header_and_row_counts() {
        let service = ExportService::new();
        let csv = service.converts_csv(&[convert("Ana", "Reyes", None)]);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("First Name,Last Name"));
        assert!(lines[1].contains("Ana"));
        assert!(lines[1].contains("Contacted"));
    }

    #[test]
    fn test_fields_with_commas_are_quoted() {
        let service = ExportService::new();
        let csv = service.converts_csv(&[convert("Ana", "Reyes, Jr.", None)]);
        assert!(csv.contains("\"Reyes, Jr.\""));
    }

    #[test]
    fn test_quotes_are_doubled() {
        let service = ExportService::new();
        let csv = service.converts_csv(&[convert("Ana", "Reyes", Some("said \"call later\""))]);
        assert!(csv.contains("\"said \"\"call later\"\"\""));
    }

    #[test]
    fn test_empty_optional_fields_render_empty() {
        let service = ExportService::new();
        let mut c = convert("Ana", "Reyes", None);
        c.email = None;
        let csv = service.converts_csv(&[c]);
        let row = csv.lines().nth(1).unwrap();
        assert!(row.contains("Ana,Reyes,,,"));
    }

    #[test]
    fn test_filename() {
        let service = ExportService::new();
        assert_eq!(
            service.filename("grace-chapel", "converts"),
            "grace-chapel-converts.csv"
        );
    }
}
