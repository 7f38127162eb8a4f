use crate::RestError;
use bytes::Bytes;
use mime::Mime;
use mime_guess::MimeGuess;
use reqwest::multipart;
use serde::Serialize;
use serde_json::Value;
use std::path::Path;

/// Serialize a document, removing the given server-managed fields
///
/// A field is either a top-level member name (`"id"`) or a dotted path into
/// nested objects (`"source.self"`).
pub fn json_without<T: Serialize + ?Sized>(
    document: &T,
    fields: &[&str],
) -> Result<Value, RestError> {
    let mut json = serde_json::to_value(document).map_err(RestError::Serialize)?;
    strip_fields(&mut json, fields);
    Ok(json)
}

pub fn strip_fields(json: &mut Value, fields: &[&str]) {
    for field in fields {
        remove_path(json, field);
    }
}

fn remove_path(json: &mut Value, path: &str) {
    let Value::Object(object) = json else {
        return;
    };
    match path.split_once('.') {
        None => {
            object.remove(path);
        }
        Some((head, tail)) => {
            if let Some(nested) = object.get_mut(head) {
                remove_path(nested, tail)
            }
        }
    }
}

/// The payload of a request
#[derive(Debug, Clone)]
pub enum RequestBody {
    Json(Value),
    Bytes { content: Bytes, mime: Mime },
    Multipart(MultipartForm),
}

/// A named part of a multipart form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormPart {
    name: String,
    content: Bytes,
    mime: Mime,
    file_name: Option<String>,
}

impl FormPart {
    pub fn new(name: impl Into<String>, content: impl Into<Bytes>, mime: Mime) -> Self {
        FormPart {
            name: name.into(),
            content: content.into(),
            mime,
            file_name: None,
        }
    }

    /// A part holding a JSON document
    pub fn json<T: Serialize + ?Sized>(
        name: impl Into<String>,
        value: &T,
    ) -> Result<Self, RestError> {
        let content = serde_json::to_vec(value).map_err(RestError::Serialize)?;
        Ok(FormPart::new(name, content, mime::APPLICATION_JSON))
    }

    /// A part holding the content of a local file
    ///
    /// The mime type is guessed from the file extension.
    pub async fn from_path(
        name: impl Into<String>,
        path: impl AsRef<Path>,
    ) -> Result<Self, RestError> {
        let path = path.as_ref();
        let content = tokio::fs::read(path).await.map_err(|source| RestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mime = MimeGuess::from_path(path).first_or_octet_stream();
        let part = FormPart::new(name, content, mime);
        Ok(match path.file_name().and_then(|name| name.to_str()) {
            Some(file_name) => part.with_file_name(file_name),
            None => part,
        })
    }

    pub fn with_file_name(self, file_name: impl Into<String>) -> Self {
        FormPart {
            file_name: Some(file_name.into()),
            ..self
        }
    }

    pub fn with_mime(self, mime: Mime) -> Self {
        FormPart { mime, ..self }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime(&self) -> &Mime {
        &self.mime
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn content(&self) -> &Bytes {
        &self.content
    }

    fn into_part(self) -> Result<(String, multipart::Part), RestError> {
        let mut part = multipart::Part::bytes(self.content.to_vec())
            .mime_str(self.mime.as_ref())
            .map_err(|_| RestError::InvalidMediaType(self.mime.to_string()))?;
        if let Some(file_name) = self.file_name {
            part = part.file_name(file_name);
        }
        Ok((self.name, part))
    }
}

/// Dataset used to build a `reqwest::multipart::Form` when the request is sent
///
/// `reqwest::multipart::Form` is neither `Clone` nor inspectable,
/// hence this intermediate representation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartForm {
    parts: Vec<FormPart>,
}

impl MultipartForm {
    pub fn new() -> Self {
        MultipartForm::default()
    }

    pub fn part(mut self, part: FormPart) -> Self {
        self.parts.push(part);
        self
    }

    pub fn parts(&self) -> &[FormPart] {
        &self.parts
    }

    pub fn part_names(&self) -> Vec<&str> {
        self.parts.iter().map(FormPart::name).collect()
    }

    pub(crate) fn into_form(self) -> Result<multipart::Form, RestError> {
        let mut form = multipart::Form::new();
        for part in self.parts {
            let (name, part) = part.into_part()?;
            form = form.part(name, part);
        }
        Ok(form)
    }
}
