//! Entry-form field validation.
//!
//! Every field is checked and all failures are returned together so the form
//! layer can show each message inline next to its field.

use crate::config::FormConfig;
use crate::models::{EntryDirection, PlateDetails};
use crate::plate::validator::PlateValidator;

/// Raw values as typed into the registration form.
#[derive(Debug, Clone, Default)]
pub struct EntryForm {
    pub vehicle_number: String,
    pub driver_name: String,
    pub driver_phone: String,
    pub direction: Option<EntryDirection>,
    pub privacy_consent: bool,
}

/// A form that passed every check, with the plate already decoded.
#[derive(Debug, Clone)]
pub struct ValidForm {
    pub vehicle_number: String,
    pub driver_name: String,
    /// Phone as displayed, `010-1234-5678` style when it has 11 digits.
    pub driver_phone: String,
    pub direction: EntryDirection,
    pub plate: PlateDetails,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    VehicleNumber,
    DriverName,
    DriverPhone,
    Direction,
    PrivacyConsent,
}

impl std::fmt::Display for FormField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormField::VehicleNumber => write!(f, "차량번호"),
            FormField::DriverName => write!(f, "기사 이름"),
            FormField::DriverPhone => write!(f, "기사 전화번호"),
            FormField::Direction => write!(f, "입차/출차 구분"),
            FormField::PrivacyConsent => write!(f, "개인정보 동의"),
        }
    }
}

/// A single field's failure and the message to show beside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: FormField,
    pub message: String,
}

impl FieldError {
    fn new(field: FormField, message: impl Into<String>) -> Self {
        FieldError {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a submitted form, collecting every failing field.
pub fn validate_form(
    form: &EntryForm,
    validator: &PlateValidator,
    config: &FormConfig,
) -> Result<ValidForm, Vec<FieldError>> {
    let mut errors = Vec::new();

    let plate = if form.vehicle_number.is_empty() {
        errors.push(FieldError::new(FormField::VehicleNumber, "차량번호를 입력해주세요"));
        None
    } else {
        match validator.classify(&form.vehicle_number) {
            Ok(details) => Some(details),
            Err(err) => {
                errors.push(FieldError::new(FormField::VehicleNumber, err.to_string()));
                None
            }
        }
    };

    if let Some(message) = check_driver_name(&form.driver_name, config) {
        errors.push(FieldError::new(FormField::DriverName, message));
    }

    if let Some(message) = check_driver_phone(&form.driver_phone, config) {
        errors.push(FieldError::new(FormField::DriverPhone, message));
    }

    if form.direction.is_none() {
        errors.push(FieldError::new(FormField::Direction, "입차/출차를 선택해주세요"));
    }

    if !form.privacy_consent {
        errors.push(FieldError::new(
            FormField::PrivacyConsent,
            "개인정보 수집 및 활용에 동의해주세요",
        ));
    }

    match (plate, form.direction) {
        (Some(plate), Some(direction)) if errors.is_empty() => Ok(ValidForm {
            vehicle_number: form.vehicle_number.clone(),
            driver_name: form.driver_name.clone(),
            driver_phone: format_phone(&form.driver_phone),
            direction,
            plate,
        }),
        _ => Err(errors),
    }
}

fn check_driver_name(name: &str, config: &FormConfig) -> Option<String> {
    let len = name.chars().count();
    if len == 0 {
        Some("기사 이름을 입력해주세요".to_string())
    } else if len < config.name_min_len {
        Some(format!("기사 이름을 {}자 이상 입력해주세요", config.name_min_len))
    } else if len > config.name_max_len {
        Some(format!("기사 이름은 {}자 이하로 입력해주세요", config.name_max_len))
    } else {
        None
    }
}

fn check_driver_phone(phone: &str, config: &FormConfig) -> Option<String> {
    if phone.is_empty() {
        return Some("기사 전화번호를 입력해주세요".to_string());
    }
    let digits = phone_digits(phone);
    if digits.len() != config.phone_digits || !digits.starts_with(&config.phone_prefix) {
        return Some("올바른 전화번호 형식을 입력해주세요 (예: 010-1234-5678)".to_string());
    }
    None
}

/// Keep only the ASCII digits of a phone number.
pub fn phone_digits(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Render an 11-digit mobile number as `XXX-XXXX-XXXX`; anything else is returned as-is.
pub fn format_phone(raw: &str) -> String {
    let digits = phone_digits(raw);
    if digits.len() != 11 {
        return raw.to_string();
    }
    format!("{}-{}-{}", &digits[..3], &digits[3..7], &digits[7..])
}
