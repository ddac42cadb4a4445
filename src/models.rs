use serde::{Deserialize, Serialize};

/// The six structurally distinct Korean plate layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlateFormat {
    New,
    Old,
    Eco,
    Diplomatic,
    Usfk,
    Temporary,
}

impl PlateFormat {
    /// Matching order used by the validator. `New` must stay ahead of `Eco`.
    pub const ALL: [PlateFormat; 6] = [
        PlateFormat::New,
        PlateFormat::Old,
        PlateFormat::Eco,
        PlateFormat::Diplomatic,
        PlateFormat::Usfk,
        PlateFormat::Temporary,
    ];

    /// Korean category name shown next to a recognised plate.
    pub fn label(&self) -> &'static str {
        match self {
            PlateFormat::New => "신형",
            PlateFormat::Old => "구형",
            PlateFormat::Eco => "친환경차",
            PlateFormat::Diplomatic => "외교관/영사관",
            PlateFormat::Usfk => "미군",
            PlateFormat::Temporary => "임시",
        }
    }
}

impl std::fmt::Display for PlateFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlateFormat::New => write!(f, "new"),
            PlateFormat::Old => write!(f, "old"),
            PlateFormat::Eco => write!(f, "eco"),
            PlateFormat::Diplomatic => write!(f, "diplomatic"),
            PlateFormat::Usfk => write!(f, "usfk"),
            PlateFormat::Temporary => write!(f, "temporary"),
        }
    }
}

/// Marker syllable on diplomatic-series plates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiplomaticKind {
    Diplomat,
    Consulate,
    InternationalOrg,
    JointForces,
}

impl DiplomaticKind {
    pub fn from_marker(marker: char) -> Option<Self> {
        match marker {
            '외' => Some(DiplomaticKind::Diplomat),
            '영' => Some(DiplomaticKind::Consulate),
            '국' => Some(DiplomaticKind::InternationalOrg),
            '합' => Some(DiplomaticKind::JointForces),
            _ => None,
        }
    }
}

/// Vehicle category derived from a plate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleType {
    /// Taxi, bus and other for-hire use.
    Commercial,
    Freight,
    /// Private passenger car.
    General,
    Special,
    Electric,
    UsMilitary,
    TemporaryRegistration,
    Diplomatic(DiplomaticKind),
    Other,
}

impl std::fmt::Display for VehicleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VehicleType::Commercial => write!(f, "영업용 (택시, 버스 등)"),
            VehicleType::Freight => write!(f, "화물용"),
            VehicleType::General => write!(f, "일반용 (승용차)"),
            VehicleType::Special => write!(f, "특수용도"),
            VehicleType::Electric => write!(f, "전기차/수소차"),
            VehicleType::UsMilitary => write!(f, "미군 차량"),
            VehicleType::TemporaryRegistration => write!(f, "임시 등록"),
            VehicleType::Diplomatic(DiplomaticKind::Diplomat) => write!(f, "외교관"),
            VehicleType::Diplomatic(DiplomaticKind::Consulate) => write!(f, "영사관"),
            VehicleType::Diplomatic(DiplomaticKind::InternationalOrg) => write!(f, "국제기구"),
            VehicleType::Diplomatic(DiplomaticKind::JointForces) => write!(f, "합참"),
            VehicleType::Other => write!(f, "기타"),
        }
    }
}

impl Serialize for VehicleType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Sub-fields decoded from a recognised plate, shaped per format.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PlateDetails {
    #[serde(rename_all = "camelCase")]
    New {
        region: String,
        number: String,
        use_code: char,
        serial_number: String,
        vehicle_type: VehicleType,
    },
    #[serde(rename_all = "camelCase")]
    Old {
        use_code: char,
        class_number: String,
        serial_number: String,
        vehicle_type: VehicleType,
    },
    #[serde(rename_all = "camelCase")]
    Eco {
        number: String,
        use_code: char,
        serial_number: String,
        vehicle_type: VehicleType,
    },
    #[serde(rename_all = "camelCase")]
    Diplomatic {
        diplomatic_type: char,
        number: String,
        vehicle_type: VehicleType,
    },
    #[serde(rename_all = "camelCase")]
    Usfk { vehicle_type: VehicleType },
    #[serde(rename_all = "camelCase")]
    Temporary {
        number: String,
        use_code: char,
        serial_number: String,
        vehicle_type: VehicleType,
    },
}

impl PlateDetails {
    pub fn format(&self) -> PlateFormat {
        match self {
            PlateDetails::New { .. } => PlateFormat::New,
            PlateDetails::Old { .. } => PlateFormat::Old,
            PlateDetails::Eco { .. } => PlateFormat::Eco,
            PlateDetails::Diplomatic { .. } => PlateFormat::Diplomatic,
            PlateDetails::Usfk { .. } => PlateFormat::Usfk,
            PlateDetails::Temporary { .. } => PlateFormat::Temporary,
        }
    }

    pub fn vehicle_type(&self) -> VehicleType {
        match self {
            PlateDetails::New { vehicle_type, .. }
            | PlateDetails::Old { vehicle_type, .. }
            | PlateDetails::Eco { vehicle_type, .. }
            | PlateDetails::Diplomatic { vehicle_type, .. }
            | PlateDetails::Usfk { vehicle_type }
            | PlateDetails::Temporary { vehicle_type, .. } => *vehicle_type,
        }
    }
}

/// Why a plate string was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlateError {
    Empty,
    UnrecognizedFormat,
}

impl std::fmt::Display for PlateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlateError::Empty => write!(f, "번호판을 입력해주세요."),
            PlateError::UnrecognizedFormat => write!(f, "유효하지 않은 번호판 형식입니다."),
        }
    }
}

/// Flat validation record handed to the form layer and the JSON report.
///
/// Built only from a `Result<PlateDetails, PlateError>`, so exactly one of
/// `details` / `error` is set and `is_valid` mirrors `details`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<PlateFormat>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_label: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<PlateDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<Result<PlateDetails, PlateError>> for ValidationResult {
    fn from(outcome: Result<PlateDetails, PlateError>) -> Self {
        match outcome {
            Ok(details) => {
                let format = details.format();
                ValidationResult {
                    is_valid: true,
                    format: Some(format),
                    type_label: Some(format.label()),
                    details: Some(details),
                    error: None,
                }
            }
            Err(err) => ValidationResult {
                is_valid: false,
                format: None,
                type_label: None,
                details: None,
                error: Some(err.to_string()),
            },
        }
    }
}

/// One row of a `check` run.
#[derive(Debug, Clone, Serialize)]
pub struct PlateCheck {
    pub input: String,
    pub result: ValidationResult,
}

/// Whether the vehicle is arriving or leaving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryDirection {
    Entry,
    Exit,
}

impl EntryDirection {
    /// Code expected by the gate scanner.
    pub fn wire_code(&self) -> &'static str {
        match self {
            EntryDirection::Entry => "in",
            EntryDirection::Exit => "out",
        }
    }
}

impl std::fmt::Display for EntryDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryDirection::Entry => write!(f, "입차"),
            EntryDirection::Exit => write!(f, "출차"),
        }
    }
}
