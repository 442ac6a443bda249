//! Region name normalization: uppercase, then plain-ASCII transliteration.

use crate::record::ShapeRecord;
use std::fmt;
use tracing::warn;
use unidecode::unidecode_char;

/// Table placeholder for characters with no ASCII form.
const UNKNOWN: &str = "[?]";

/// A character that had no ASCII form. Never fatal on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransliterationWarning {
    pub record: usize,
    pub character: char,
    /// What the table put in its place: `""` or `"[?]"`.
    pub replacement: &'static str,
}

impl fmt::Display for TransliterationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "record {}: no ASCII transliteration for {:?} (U+{:04X}), replaced with {:?}",
            self.record, self.character, self.character as u32, self.replacement
        )
    }
}

fn is_unmappable(ch: char, mapped: &str) -> bool {
    !ch.is_ascii() && (mapped.is_empty() || mapped.contains(UNKNOWN))
}

/// Returns the normalized name and every character the table could not map,
/// paired with its replacement. The name is exactly the table applied to the
/// uppercased text.
pub fn normalize_name(text: &str) -> (String, Vec<(char, &'static str)>) {
    let upper = text.to_uppercase();
    let mut out = String::with_capacity(upper.len());
    let mut unmapped = Vec::new();
    for ch in upper.chars() {
        let mapped = unidecode_char(ch);
        if is_unmappable(ch, mapped) {
            unmapped.push((ch, mapped));
        }
        out.push_str(mapped);
    }
    (out, unmapped)
}

pub fn region_name(text: &str) -> String {
    normalize_name(text).0
}

pub fn stage4(records: &mut [ShapeRecord]) -> Vec<TransliterationWarning> {
    let mut warnings = Vec::new();
    for (i, record) in records.iter_mut().enumerate() {
        let (name, unmapped) = normalize_name(&record.administrative_region);
        for (character, replacement) in unmapped {
            let warning = TransliterationWarning {
                record: i,
                character,
                replacement,
            };
            warn!("{}", warning);
            warnings.push(warning);
        }
        record.administrative_region = name;
    }
    warnings
}
