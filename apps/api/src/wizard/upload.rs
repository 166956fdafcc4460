//! Resume file intake: the typed rejection reasons of the file picker and the
//! multipart reader that turns a request into a file descriptor.
//!
//! Only metadata survives; the bytes are read to measure the file and dropped.

use axum::extract::multipart::{Multipart, MultipartError};
use axum::http::StatusCode;
use serde::Serialize;

use crate::errors::AppError;

pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

pub const PDF: &str = "application/pdf";
pub const DOCX: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const DOC: &str = "application/msword";

/// Accepted mime types with the extension that also identifies each one.
pub const ACCEPTED_TYPES: &[(&str, &str)] = &[(PDF, ".pdf"), (DOCX, ".docx"), (DOC, ".doc")];

/// Why the file picker refused a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FileRejection {
    TooLarge,
    InvalidType,
}

impl FileRejection {
    pub const fn code(self) -> &'static str {
        match self {
            FileRejection::TooLarge => "FILE_TOO_LARGE",
            FileRejection::InvalidType => "FILE_INVALID_TYPE",
        }
    }

    pub const fn message(self) -> &'static str {
        match self {
            FileRejection::TooLarge => "File is too large. Please choose a file under 10MB.",
            FileRejection::InvalidType => "Invalid file type. Please upload a PDF or DOCX file.",
        }
    }
}

impl std::fmt::Display for FileRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// What the picker hands over: name, byte size and declared mime type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHandle {
    pub name: String,
    pub size: u64,
    pub mime_type: String,
}

/// Checks type first, then size, and returns the canonical mime type.
///
/// A generic declared type (e.g. `application/octet-stream`) is accepted when
/// the file extension identifies an accepted type.
pub fn validate(file: &FileHandle) -> Result<&'static str, FileRejection> {
    let declared = file.mime_type.trim().to_ascii_lowercase();
    let lower_name = file.name.to_ascii_lowercase();
    let mime = ACCEPTED_TYPES
        .iter()
        .find(|(mime, _)| *mime == declared)
        .or_else(|| ACCEPTED_TYPES.iter().find(|(_, ext)| lower_name.ends_with(ext)))
        .map(|(mime, _)| *mime)
        .ok_or(FileRejection::InvalidType)?;

    if file.size > MAX_UPLOAD_BYTES {
        return Err(FileRejection::TooLarge);
    }
    Ok(mime)
}

/// Reads the `file` field of a multipart body. Returns `None` when the body
/// carries no such field.
pub async fn read_file_field(multipart: &mut Multipart) -> Result<Option<FileHandle>, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some("file") {
            continue;
        }
        let name = field.file_name().unwrap_or("resume").to_string();
        let mime_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let data = field.bytes().await.map_err(multipart_error)?;
        return Ok(Some(FileHandle {
            name,
            size: data.len() as u64,
            mime_type,
        }));
    }
    Ok(None)
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::UnsupportedFile(FileRejection::TooLarge)
    } else {
        AppError::Validation(format!("Malformed upload: {}", e.body_text()))
    }
}
