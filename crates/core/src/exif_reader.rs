use crate::error::RenameError;
use crate::metadata::MetadataRecord;
use exif::{In, Reader, Tag, Value};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

pub const CREATION_DATE_TAG: Tag = Tag::DateTimeDigitized;

/// A non-ASCII creation-date field is a validation error, not `None`.
pub fn read_creation_date(path: &Path) -> Result<Option<String>, RenameError> {
    let file = File::open(path).map_err(|source| RenameError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    let mut buf = BufReader::new(file);
    let exif = match Reader::new().read_from_container(&mut buf) {
        Ok(exif) => exif,
        Err(exif::Error::NotFound(_)) => return Ok(None),
        Err(source) => {
            return Err(RenameError::MetadataExtraction {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let Some(field) = exif.get_field(CREATION_DATE_TAG, In::PRIMARY) else {
        return Ok(None);
    };
    let raw = match &field.value {
        Value::Ascii(parts) => parts
            .first()
            .map(|bytes| String::from_utf8_lossy(bytes).to_string())
            .unwrap_or_default(),
        other => {
            return Err(RenameError::MetadataValidation {
                value: format!("{other:?}"),
                reason: "creation date is not an ASCII value".to_string(),
            })
        }
    };
    debug!(path = %path.display(), raw, "creation date found");
    Ok(Some(raw))
}

pub fn extract_creation_timestamp(path: &Path) -> Result<Option<String>, RenameError> {
    let Some(raw) = read_creation_date(path)? else {
        return Ok(None);
    };
    let record = MetadataRecord::new(raw, file_name_of(path));
    record.target_name().map(Some)
}

pub(crate) fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default()
}
