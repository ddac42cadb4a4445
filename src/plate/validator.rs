use anyhow::Result;
use regex::{Captures, Regex};

use crate::models::{PlateDetails, PlateError, PlateFormat, ValidationResult, VehicleType};
use crate::plate::table::ClassificationTable;

/// Current plates (2006~): region + class digits + use-code + serial, e.g. `서울12가3456`.
/// The region is required so that bare `12가3456` falls through to [`ECO`].
const NEW: &str = r"^([가-힣]{2,3})([0-9]{2,3})([가-힣])([0-9]{4})$";
/// Legacy plates: `가12-3456`.
const OLD: &str = r"^([가-힣])([0-9]{2})-([0-9]{4})$";
/// Electric / hydrogen plates (2021~): `12가3456`, `123가3456`.
const ECO: &str = r"^([0-9]{2,3})([가-힣])([0-9]{4})$";
/// Diplomatic series: `외1234`, `영123`.
const DIPLOMATIC: &str = r"^(외|영|국|합)([0-9]{3,4})$";
/// US Forces Korea: `K12345`.
const USFK: &str = r"^K[0-9]{5}$";
/// Temporary registration: `임시123가3456`.
const TEMPORARY: &str = r"^임시([0-9]{2,3})([가-힣])([0-9]{4})$";

const TEMPORARY_MARKER: &str = "임시";

fn pattern_source(format: PlateFormat) -> &'static str {
    match format {
        PlateFormat::New => NEW,
        PlateFormat::Old => OLD,
        PlateFormat::Eco => ECO,
        PlateFormat::Diplomatic => DIPLOMATIC,
        PlateFormat::Usfk => USFK,
        PlateFormat::Temporary => TEMPORARY,
    }
}

/// Korean license-plate validator.
///
/// Holds the compiled per-format patterns, a combined alternation used by
/// [`PlateValidator::is_valid`], and the use-code table. Build it once and
/// share it by reference; it never mutates after construction.
pub struct PlateValidator {
    table: ClassificationTable,
    patterns: Vec<(PlateFormat, Regex)>,
    full_pattern: Regex,
}

impl PlateValidator {
    /// Compile the patterns against the default use-code table.
    pub fn new() -> Result<Self> {
        Self::with_table(ClassificationTable::default())
    }

    pub fn with_table(table: ClassificationTable) -> Result<Self> {
        let mut patterns = Vec::with_capacity(PlateFormat::ALL.len());
        for format in PlateFormat::ALL {
            patterns.push((format, Regex::new(pattern_source(format))?));
        }

        let alternation: Vec<String> = PlateFormat::ALL
            .iter()
            .map(|f| format!("(?:{})", pattern_source(*f)))
            .collect();
        let full_pattern = Regex::new(&alternation.join("|"))?;

        Ok(PlateValidator {
            table,
            patterns,
            full_pattern,
        })
    }

    /// Per-format pattern sources, in matching order.
    pub fn patterns(&self) -> Vec<(PlateFormat, &str)> {
        self.patterns
            .iter()
            .map(|(format, re)| (*format, re.as_str()))
            .collect()
    }

    /// Classify a plate string into its decoded details.
    ///
    /// Formats are tried in [`PlateFormat::ALL`] order and the first match wins.
    pub fn classify(&self, raw: &str) -> std::result::Result<PlateDetails, PlateError> {
        if raw.is_empty() {
            return Err(PlateError::Empty);
        }

        let plate = clean(raw);
        self.patterns
            .iter()
            .find_map(|(format, re)| {
                let caps = re.captures(&plate)?;
                self.decode(*format, &caps)
            })
            .ok_or(PlateError::UnrecognizedFormat)
    }

    /// Validate a plate string. Never panics; failures are reported in the result.
    pub fn validate(&self, raw: &str) -> ValidationResult {
        self.classify(raw).into()
    }

    /// Boolean-only check against the combined pattern.
    pub fn is_valid(&self, raw: &str) -> bool {
        if raw.is_empty() {
            return false;
        }
        self.full_pattern.is_match(&clean(raw))
    }

    fn decode(&self, format: PlateFormat, caps: &Captures<'_>) -> Option<PlateDetails> {
        let details = match format {
            PlateFormat::New => {
                // `임시` has the shape of a region but marks a temporary plate
                if &caps[1] == TEMPORARY_MARKER {
                    return None;
                }
                let use_code = syllable(caps, 3)?;
                PlateDetails::New {
                    region: caps[1].to_string(),
                    number: caps[2].to_string(),
                    use_code,
                    serial_number: caps[4].to_string(),
                    vehicle_type: self.table.vehicle_type(use_code),
                }
            }
            PlateFormat::Old => {
                let use_code = syllable(caps, 1)?;
                PlateDetails::Old {
                    use_code,
                    class_number: caps[2].to_string(),
                    serial_number: caps[3].to_string(),
                    vehicle_type: self.table.vehicle_type(use_code),
                }
            }
            PlateFormat::Eco => PlateDetails::Eco {
                number: caps[1].to_string(),
                use_code: syllable(caps, 2)?,
                serial_number: caps[3].to_string(),
                vehicle_type: VehicleType::Electric,
            },
            PlateFormat::Diplomatic => {
                let marker = syllable(caps, 1)?;
                PlateDetails::Diplomatic {
                    diplomatic_type: marker,
                    number: caps[2].to_string(),
                    vehicle_type: self.table.diplomatic_type(marker),
                }
            }
            PlateFormat::Usfk => PlateDetails::Usfk {
                vehicle_type: VehicleType::UsMilitary,
            },
            PlateFormat::Temporary => PlateDetails::Temporary {
                number: caps[1].to_string(),
                use_code: syllable(caps, 2)?,
                serial_number: caps[3].to_string(),
                vehicle_type: VehicleType::TemporaryRegistration,
            },
        };
        Some(details)
    }
}

/// Drop every whitespace character; stray spaces are common in typed or OCR'd plates.
fn clean(raw: &str) -> String {
    raw.chars().filter(|c| !c.is_whitespace()).collect()
}

fn syllable(caps: &Captures<'_>, group: usize) -> Option<char> {
    caps.get(group)?.as_str().chars().next()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> PlateValidator {
        PlateValidator::new().unwrap()
    }

    #[test]
    fn test_new_format() {
        let result = validator().validate("서울12가3456");
        assert!(result.is_valid);
        assert_eq!(result.format, Some(PlateFormat::New));
        assert_eq!(result.type_label, Some("신형"));
        assert_eq!(
            result.details,
            Some(PlateDetails::New {
                region: "서울".to_string(),
                number: "12".to_string(),
                use_code: '가',
                serial_number: "3456".to_string(),
                vehicle_type: VehicleType::Freight,
            })
        );
        assert!(result.error.is_none());
    }

    #[test]
    fn test_new_format_three_digit_class() {
        let result = validator().validate("경기123하4567");
        assert_eq!(result.format, Some(PlateFormat::New));
        let details = result.details.unwrap();
        assert_eq!(details.vehicle_type(), VehicleType::General);
        assert!(matches!(details, PlateDetails::New { use_code: '하', .. }));
    }

    #[test]
    fn test_new_format_commercial() {
        let details = validator().classify("부산34바5678").unwrap();
        assert_eq!(details.vehicle_type(), VehicleType::Commercial);
        assert_eq!(details.vehicle_type().to_string(), "영업용 (택시, 버스 등)");
    }

    #[test]
    fn test_old_format() {
        let result = validator().validate("가12-3456");
        assert_eq!(result.format, Some(PlateFormat::Old));
        assert_eq!(
            result.details,
            Some(PlateDetails::Old {
                use_code: '가',
                class_number: "12".to_string(),
                serial_number: "3456".to_string(),
                vehicle_type: VehicleType::Freight,
            })
        );
    }

    #[test]
    fn test_old_format_requires_hyphen() {
        let result = validator().validate("가123456");
        assert!(!result.is_valid);
    }

    #[test]
    fn test_regionless_plate_is_eco() {
        let result = validator().validate("12가3456");
        assert_eq!(result.format, Some(PlateFormat::Eco));
        assert_eq!(result.type_label, Some("친환경차"));
        assert_eq!(
            result.details,
            Some(PlateDetails::Eco {
                number: "12".to_string(),
                use_code: '가',
                serial_number: "3456".to_string(),
                vehicle_type: VehicleType::Electric,
            })
        );
    }

    #[test]
    fn test_eco_vehicle_type_ignores_use_code() {
        let details = validator().classify("123아4567").unwrap();
        assert_eq!(details.format(), PlateFormat::Eco);
        assert_eq!(details.vehicle_type().to_string(), "전기차/수소차");
    }

    #[test]
    fn test_diplomatic_format() {
        let result = validator().validate("외1234");
        assert_eq!(result.format, Some(PlateFormat::Diplomatic));
        assert_eq!(
            result.details,
            Some(PlateDetails::Diplomatic {
                diplomatic_type: '외',
                number: "1234".to_string(),
                vehicle_type: VehicleType::Diplomatic(crate::models::DiplomaticKind::Diplomat),
            })
        );
        assert_eq!(result.details.unwrap().vehicle_type().to_string(), "외교관");

        let consulate = validator().classify("영123").unwrap();
        assert_eq!(consulate.vehicle_type().to_string(), "영사관");
    }

    #[test]
    fn test_usfk_format() {
        let result = validator().validate("K12345");
        assert_eq!(result.format, Some(PlateFormat::Usfk));
        assert_eq!(
            result.details,
            Some(PlateDetails::Usfk {
                vehicle_type: VehicleType::UsMilitary
            })
        );
        assert!(!validator().validate("k12345").is_valid);
        assert!(!validator().validate("K1234").is_valid);
    }

    #[test]
    fn test_temporary_format() {
        let result = validator().validate("임시123가4567");
        assert_eq!(result.format, Some(PlateFormat::Temporary));
        assert_eq!(
            result.details,
            Some(PlateDetails::Temporary {
                number: "123".to_string(),
                use_code: '가',
                serial_number: "4567".to_string(),
                vehicle_type: VehicleType::TemporaryRegistration,
            })
        );
    }

    #[test]
    fn test_temporary_marker_is_not_a_region() {
        let result = validator().validate("임시12가3456");
        assert_eq!(result.format, Some(PlateFormat::Temporary));
        assert_eq!(result.type_label, Some("임시"));

        // a longer region that merely starts with the marker is still a region
        let result = validator().validate("임시가12가3456");
        assert_eq!(result.format, Some(PlateFormat::New));
    }

    #[test]
    fn test_empty_input() {
        let result = validator().validate("");
        assert!(!result.is_valid);
        assert_eq!(result.error.as_deref(), Some("번호판을 입력해주세요."));
        assert!(result.format.is_none());
    }

    #[test]
    fn test_whitespace_only_is_bad_format() {
        let result = validator().validate("   ");
        assert_eq!(result.error.as_deref(), Some("유효하지 않은 번호판 형식입니다."));
    }

    #[test]
    fn test_malformed_inputs() {
        let v = validator();
        for input in [
            "잘못된번호판",
            "1가3456",
            "12가345",
            "12가34567",
            "서울특별시12가3456",
            "외12",
            "외12345",
            "K123456",
            "임시12가345",
            "ABC1234",
            "１２가３４５６",
        ] {
            let result = v.validate(input);
            assert!(!result.is_valid, "{input} should be rejected");
            assert_eq!(result.error.as_deref(), Some("유효하지 않은 번호판 형식입니다."));
            assert!(result.details.is_none());
        }
    }

    #[test]
    fn test_whitespace_is_ignored() {
        let v = validator();
        assert_eq!(v.validate(" 12 가 3456 "), v.validate("12가3456"));
        assert_eq!(v.validate("서울 12가\t3456"), v.validate("서울12가3456"));
        assert_eq!(v.validate("가12 - 3456"), v.validate("가12-3456"));
        assert_eq!(v.validate("임시 123 가 4567"), v.validate("임시123가4567"));
    }

    #[test]
    fn test_validate_is_idempotent() {
        let v = validator();
        for input in ["서울12가3456", "잘못된번호판", "", "K12345"] {
            assert_eq!(v.validate(input), v.validate(input));
        }
    }

    #[test]
    fn test_is_valid_agrees_with_validate() {
        let v = validator();
        for input in [
            "",
            " ",
            "서울12가3456",
            "서울 12 가 3456",
            "가12-3456",
            "12가3456",
            "외1234",
            "합123",
            "K12345",
            "임시12가3456",
            "잘못된번호판",
            "12가345",
            "서울12가3456K12345",
            "K12345외1234",
            "외1234\n",
        ] {
            assert_eq!(
                v.is_valid(input),
                v.validate(input).is_valid,
                "disagreement on {input:?}"
            );
        }
    }

    #[test]
    fn test_patterns_in_matching_order() {
        let v = validator();
        let formats: Vec<PlateFormat> = v.patterns().iter().map(|(f, _)| *f).collect();
        assert_eq!(formats, PlateFormat::ALL.to_vec());
        assert_eq!(v.patterns()[4].1, USFK);
    }

    #[test]
    fn test_shared_across_threads() {
        let v = validator();
        std::thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(|_| s.spawn(|| v.validate("서울12가3456").is_valid))
                .collect();
            for handle in handles {
                assert!(handle.join().unwrap());
            }
        });
    }
}
