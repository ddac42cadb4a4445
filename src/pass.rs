//! Entry passes built from a validated form.
//!
//! [`ScanPayload`] is the compact JSON the gate scanner reads; its text is what
//! gets handed to the image encoder. [`EntryPass`] is the record displayed
//! alongside the image.

use anyhow::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::config::SiteConfig;
use crate::form::{phone_digits, ValidForm};
use crate::models::EntryDirection;

/// Payload encoded into the scannable image. Key names are fixed by the gate system.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanPayload {
    pub car_no: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub user_nm: String,
    pub phone_no: String,
    pub gubun: String,
}

impl ScanPayload {
    /// Compact JSON text for the encoder.
    pub fn to_text(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Display record shown with the generated image.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryPass {
    pub vehicle_number: String,
    pub driver_name: String,
    pub driver_phone: String,
    pub entry_exit_type: EntryDirection,
    pub timestamp: String,
    pub id: String,
    #[serde(skip)]
    pub issued_at: DateTime<Utc>,
}

/// Build the scan payload for a validated form.
pub fn build_payload(form: &ValidForm, site: &SiteConfig) -> ScanPayload {
    ScanPayload {
        car_no: form.vehicle_number.clone(),
        kind: site.payload_type.clone(),
        user_nm: form.driver_name.clone(),
        phone_no: phone_digits(&form.driver_phone),
        gubun: form.direction.wire_code().to_string(),
    }
}

/// Build the display record, stamped with `now`.
pub fn issue_pass(form: &ValidForm, site: &SiteConfig, now: DateTime<Utc>) -> EntryPass {
    EntryPass {
        vehicle_number: form.vehicle_number.clone(),
        driver_name: form.driver_name.clone(),
        driver_phone: form.driver_phone.clone(),
        entry_exit_type: form.direction,
        timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        id: pass_id(&site.pass_id_prefix, now),
        issued_at: now,
    }
}

/// `{prefix}_{unix-millis}_{9 random lowercase alphanumerics}`.
fn pass_id(prefix: &str, now: DateTime<Utc>) -> String {
    let random = uuid::Uuid::new_v4().simple().to_string();
    format!("{}_{}_{}", prefix, now.timestamp_millis(), &random[..9])
}

/// File name suggested when the pass image is saved.
pub fn download_file_name(pass: &EntryPass, site: &SiteConfig) -> String {
    format!(
        "qr_code_{}_{}.{}",
        pass.vehicle_number,
        pass.issued_at.timestamp_millis(),
        site.image_extension
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FormConfig, SiteConfig};
    use crate::form::{validate_form, EntryForm};
    use crate::plate::validator::PlateValidator;
    use chrono::TimeZone;

    fn valid_form(direction: EntryDirection) -> ValidForm {
        let form = EntryForm {
            vehicle_number: "12가3456".to_string(),
            driver_name: "김철수".to_string(),
            driver_phone: "010-9876-5432".to_string(),
            direction: Some(direction),
            privacy_consent: true,
        };
        let validator = PlateValidator::new().unwrap();
        validate_form(&form, &validator, &FormConfig::default()).unwrap()
    }

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_payload_fields() {
        let payload = build_payload(&valid_form(EntryDirection::Exit), &SiteConfig::default());
        assert_eq!(payload.car_no, "12가3456");
        assert_eq!(payload.kind, "userInput");
        assert_eq!(payload.user_nm, "김철수");
        assert_eq!(payload.phone_no, "01098765432");
        assert_eq!(payload.gubun, "out");
    }

    #[test]
    fn test_payload_text_keys() {
        let payload = build_payload(&valid_form(EntryDirection::Entry), &SiteConfig::default());
        let text = payload.to_text().unwrap();
        assert_eq!(
            text,
            r#"{"carNo":"12가3456","type":"userInput","userNm":"김철수","phoneNo":"01098765432","gubun":"in"}"#
        );
    }

    #[test]
    fn test_issue_pass() {
        let now = fixed_time();
        let pass = issue_pass(&valid_form(EntryDirection::Entry), &SiteConfig::default(), now);
        assert_eq!(pass.timestamp, "2024-03-01T09:30:00.000Z");
        assert_eq!(pass.driver_phone, "010-9876-5432");

        let prefix = format!("qr_{}_", now.timestamp_millis());
        assert!(pass.id.starts_with(&prefix));
        let suffix = &pass.id[prefix.len()..];
        assert_eq!(suffix.len(), 9);
        assert!(suffix.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));

        let json = serde_json::to_value(&pass).unwrap();
        assert_eq!(json["entryExitType"], "entry");
        assert!(json.get("issuedAt").is_none());
    }

    #[test]
    fn test_download_file_name() {
        let now = fixed_time();
        let site = SiteConfig::default();
        let pass = issue_pass(&valid_form(EntryDirection::Entry), &site, now);
        assert_eq!(
            download_file_name(&pass, &site),
            format!("qr_code_12가3456_{}.png", now.timestamp_millis())
        );
    }
}
