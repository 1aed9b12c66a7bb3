use crate::error::RenameError;

// 19 characters bare, up to 21 when the reader wraps the value in quotes.
const CREATION_DATE_LEN: std::ops::RangeInclusive<usize> = 19..=21;
const CREATION_DATE_SHAPE: &[u8; 19] = b"DDDD:DD:DD DD:DD:DD";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataRecord {
    pub raw_creation_date: String,
    pub original_name: String,
}

impl MetadataRecord {
    pub fn new(raw_creation_date: impl Into<String>, original_name: impl Into<String>) -> Self {
        Self {
            raw_creation_date: raw_creation_date.into(),
            original_name: original_name.into(),
        }
    }

    /// `'2011:01:30 13:11:02'` + `IMG.JPG` becomes `20110130_131102_IMG.JPG`.
    ///
    /// Every colon is removed, including the ones separating date parts.
    pub fn target_name(&self) -> Result<String, RenameError> {
        let prefix = compact_creation_date(&self.raw_creation_date)?;
        Ok(format!("{}{}", prefix, self.original_name))
    }
}

pub fn compact_creation_date(raw: &str) -> Result<String, RenameError> {
    let invalid = |reason: String| RenameError::MetadataValidation {
        value: raw.to_string(),
        reason,
    };

    let len = raw.chars().count();
    if !CREATION_DATE_LEN.contains(&len) {
        return Err(invalid(format!("{len} characters, expected 19 to 21")));
    }

    let unquoted = raw.replace('\'', "");
    if !matches_shape(&unquoted) {
        return Err(invalid("expected YYYY:MM:DD HH:MM:SS".to_string()));
    }

    let mut out = unquoted.replace(':', "").replace(' ', "_");
    out.push('_');
    Ok(out)
}

fn matches_shape(value: &str) -> bool {
    value.len() == CREATION_DATE_SHAPE.len()
        && value
            .bytes()
            .zip(CREATION_DATE_SHAPE.iter())
            .all(|(byte, expected)| match expected {
                b'D' => byte.is_ascii_digit(),
                other => byte == *other,
            })
}

#[cfg(test)]
mod tests {
    use super::{compact_creation_date, MetadataRecord};
    use crate::error::RenameError;

    #[test]
    fn quoted_value_produces_documented_name() {
        let record = MetadataRecord::new("'2011:01:30 13:11:02'", "IMG_7559_mini.JPG");
        assert_eq!(
            record.target_name().expect("valid date"),
            "20110130_131102_IMG_7559_mini.JPG"
        );
    }

    #[test]
    fn bare_value_produces_same_prefix() {
        let record = MetadataRecord::new("2011:01:30 13:11:02", "IMG_7559_mini.JPG");
        assert_eq!(
            record.target_name().expect("valid date"),
            "20110130_131102_IMG_7559_mini.JPG"
        );
    }

    #[test]
    fn all_colons_are_removed() {
        let prefix = compact_creation_date("1999:12:31 23:59:58").expect("valid date");
        assert!(!prefix.contains(':'));
        assert_eq!(prefix, "19991231_235958_");
    }

    #[test]
    fn short_value_is_rejected() {
        let err = compact_creation_date("2011:01:30").expect_err("too short");
        match err {
            RenameError::MetadataValidation { value, reason } => {
                assert_eq!(value, "2011:01:30");
                assert!(reason.contains("10 characters"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn long_value_is_rejected_without_truncation() {
        let raw = "'2011:01:30 13:11:02.123'";
        match compact_creation_date(raw) {
            Err(RenameError::MetadataValidation { value, reason }) => {
                assert_eq!(value, raw);
                assert!(reason.contains("25 characters"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn empty_value_is_rejected() {
        assert!(compact_creation_date("").is_err());
    }

    #[test]
    fn blank_unknown_date_is_rejected() {
        let err = compact_creation_date("    :  :     :  :  ").expect_err("blank date");
        assert!(matches!(err, RenameError::MetadataValidation { .. }));
    }

    #[test]
    fn same_length_values_that_are_not_dates_are_rejected() {
        for raw in [
            "2011-01-30T13:11:02",
            "abcdefghijklmnopqrs",
            "2011:01:30 13:11:0x",
            "'2011:01:30 13:11'",
        ] {
            assert!(
                matches!(
                    compact_creation_date(raw),
                    Err(RenameError::MetadataValidation { .. })
                ),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn trailing_padding_is_rejected_so_prefix_width_is_fixed() {
        assert!(compact_creation_date("2011:01:30 13:11:02 ").is_err());
        assert!(compact_creation_date(" 2011:01:30 13:11:02").is_err());
        let prefix = compact_creation_date("'2011:01:30 13:11:02'").expect("quoted date");
        assert_eq!(prefix.len(), 16);
    }
}
