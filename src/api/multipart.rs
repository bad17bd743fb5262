//! Multipart Form Parsing
//!
//! The admin UI submits every create/update as `multipart/form-data` so text
//! fields and image files arrive together. This collects a request into a
//! simple form value the handlers can query.

use axum::extract::Multipart;
use std::collections::HashMap;

use crate::utils::{AppError, AppResult};

/// An uploaded file from a multipart request
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Form field the file arrived under
    pub field: String,
    /// Client-supplied filename
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Collected multipart form: text fields by name plus uploaded files
#[derive(Debug, Default)]
pub struct MultipartForm {
    fields: HashMap<String, String>,
    files: Vec<UploadedFile>,
}

impl MultipartForm {
    /// Drain a multipart request into memory
    pub async fn parse(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();

            match field.file_name().map(|s| s.to_string()) {
                Some(filename) => {
                    let bytes = field.bytes().await?.to_vec();
                    form.files.push(UploadedFile {
                        field: name,
                        filename,
                        bytes,
                    });
                }
                None => {
                    let value = field.text().await?;
                    form.fields.insert(name, value);
                }
            }
        }

        Ok(form)
    }

    /// Text field by name
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(|s| s.as_str())
    }

    /// Text field that must be present and non-empty after trimming
    pub fn required_field(&self, name: &str) -> AppResult<&str> {
        match self.field(name).map(str::trim) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(AppError::validation(format!("{name} is required"))),
        }
    }

    /// All files uploaded under the given field name
    pub fn files(&self, field: &str) -> impl Iterator<Item = &UploadedFile> {
        self.files.iter().filter(move |f| f.field == field)
    }

    /// First file uploaded under the given field name
    pub fn file(&self, field: &str) -> Option<&UploadedFile> {
        self.files(field).next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_lookup() {
        let mut form = MultipartForm::default();
        form.fields.insert("name".to_string(), "  Shoes ".to_string());
        form.fields.insert("empty".to_string(), "   ".to_string());

        assert_eq!(form.required_field("name").unwrap(), "Shoes");
        assert!(form.required_field("empty").is_err());
        assert!(form.required_field("missing").is_err());
    }

    #[test]
    fn files_filter_by_field() {
        let mut form = MultipartForm::default();
        form.files.push(UploadedFile {
            field: "images".to_string(),
            filename: "a.jpg".to_string(),
            bytes: vec![1],
        });
        form.files.push(UploadedFile {
            field: "image".to_string(),
            filename: "b.jpg".to_string(),
            bytes: vec![2],
        });

        assert_eq!(form.files("images").count(), 1);
        assert_eq!(form.file("image").unwrap().filename, "b.jpg");
        assert!(form.file("other").is_none());
    }
}
