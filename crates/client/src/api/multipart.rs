//! Multipart form bodies
//!
//! Upload endpoints take multipart bodies: batch file uploads under the
//! `files` field, a single image attachment under `image`, plus ordinary
//! text fields. Forms are described as plain data here and only converted
//! into a `reqwest` form at dispatch time, so they stay buildable and
//! inspectable without touching the network.

use scholarkg_domain::constants::{MULTIPART_FILES_FIELD, MULTIPART_IMAGE_FIELD};
use scholarkg_domain::{ApiError, ApiResult};

/// One file to upload.
#[derive(Debug, Clone)]
pub struct FilePayload {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub mime: Option<String>,
}

impl FilePayload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self { file_name: file_name.into(), bytes, mime: None }
    }

    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = Some(mime.into());
        self
    }
}

#[derive(Debug, Clone)]
enum FormPart {
    Text { name: String, value: String },
    File { name: String, payload: FilePayload },
}

/// A multipart form described as plain data.
#[derive(Debug, Clone, Default)]
pub struct MultipartForm {
    parts: Vec<FormPart>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a text field.
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push(FormPart::Text { name: name.into(), value: value.into() });
        self
    }

    /// Append one file under an explicit field name.
    pub fn file(mut self, name: impl Into<String>, payload: FilePayload) -> Self {
        self.parts.push(FormPart::File { name: name.into(), payload });
        self
    }

    /// Append files under the batch-upload field (`files`).
    pub fn files(mut self, payloads: impl IntoIterator<Item = FilePayload>) -> Self {
        for payload in payloads {
            self.parts.push(FormPart::File { name: MULTIPART_FILES_FIELD.into(), payload });
        }
        self
    }

    /// Append a single image attachment (`image`).
    pub fn image(self, payload: FilePayload) -> Self {
        self.file(MULTIPART_IMAGE_FIELD, payload)
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Field names in insertion order, for inspection.
    pub fn field_names(&self) -> Vec<&str> {
        self.parts
            .iter()
            .map(|part| match part {
                FormPart::Text { name, .. } | FormPart::File { name, .. } => name.as_str(),
            })
            .collect()
    }

    /// Convert into a `reqwest` multipart form at dispatch time.
    pub(crate) fn into_form(self) -> ApiResult<reqwest::multipart::Form> {
        let mut form = reqwest::multipart::Form::new();
        for part in self.parts {
            form = match part {
                FormPart::Text { name, value } => form.text(name, value),
                FormPart::File { name, payload } => {
                    let mut file_part = reqwest::multipart::Part::bytes(payload.bytes)
                        .file_name(payload.file_name);
                    if let Some(mime) = payload.mime {
                        file_part = file_part
                            .mime_str(&mime)
                            .map_err(|err| ApiError::Config(format!("invalid mime type: {err}")))?;
                    }
                    form.part(name, file_part)
                }
            };
        }
        Ok(form)
    }
}
