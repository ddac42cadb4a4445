use crate::models::{DiplomaticKind, VehicleType};

/// Use-code syllables grouped by vehicle use.
///
/// The groups overlap on purpose (every freight code is also a passenger
/// code), so [`ClassificationTable::vehicle_type`] resolves a code by checking
/// the groups in a fixed order: commercial, freight, general, special.
#[derive(Debug, Clone)]
pub struct ClassificationTable {
    pub general: &'static [char],
    pub commercial: &'static [char],
    pub freight: &'static [char],
    pub special: &'static [char],
}

const GENERAL: &[char] = &[
    '가', '나', '다', '라', '마', '거', '너', '더', '러', '머', '버', '서', '어', '저', '고', '노',
    '도', '로', '모', '보', '소', '오', '조', '구', '누', '두', '루', '무', '부', '수', '우', '주',
    '하', '허', '호',
];

const COMMERCIAL: &[char] = &['아', '바', '사', '자'];

const FREIGHT: &[char] = &[
    '가', '나', '다', '라', '마', '거', '너', '더', '러', '머', '버', '서', '어', '저',
];

const SPECIAL: &[char] = &['외', '영', '국', '합'];

impl Default for ClassificationTable {
    fn default() -> Self {
        ClassificationTable {
            general: GENERAL,
            commercial: COMMERCIAL,
            freight: FREIGHT,
            special: SPECIAL,
        }
    }
}

impl ClassificationTable {
    /// Classify a use-code syllable. Unlisted syllables are [`VehicleType::Other`].
    pub fn vehicle_type(&self, use_code: char) -> VehicleType {
        if self.commercial.contains(&use_code) {
            VehicleType::Commercial
        } else if self.freight.contains(&use_code) {
            VehicleType::Freight
        } else if self.general.contains(&use_code) {
            VehicleType::General
        } else if self.special.contains(&use_code) {
            VehicleType::Special
        } else {
            VehicleType::Other
        }
    }

    /// Label a diplomatic-series marker.
    pub fn diplomatic_type(&self, marker: char) -> VehicleType {
        match DiplomaticKind::from_marker(marker) {
            Some(kind) => VehicleType::Diplomatic(kind),
            None => VehicleType::Other,
        }
    }
}
