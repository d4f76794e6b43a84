use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};

use crate::error::ThumbnailError;

const SCHEME: &str = "data:";
const BASE64_MARKER: &str = ";base64";

/// `data:<mime>;base64,<payload>` string, the form produced by
/// `FileReader.readAsDataURL` and `canvas.toDataURL`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct DataUrl(String);

impl DataUrl {
    pub fn from_bytes(mime: &str, bytes: &[u8]) -> Self {
        Self(format!("{SCHEME}{mime}{BASE64_MARKER},{}", STANDARD.encode(bytes)))
    }

    pub fn parse(text: impl Into<String>) -> Result<Self, ThumbnailError> {
        let text = text.into();
        match text.strip_prefix(SCHEME) {
            Some(rest) if rest.contains(',') => Ok(Self(text)),
            _ => Err(ThumbnailError::InvalidDataUrl),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn header(&self) -> &str {
        let rest = &self.0[SCHEME.len()..];
        rest.split(',').next().unwrap_or_default()
    }

    pub fn mime(&self) -> &str {
        self.header().split(';').next().unwrap_or_default()
    }

    /// Payload bytes. Only base64 payloads are supported, which is all the
    /// browser hands back for binary files.
    pub fn decode(&self) -> Result<Vec<u8>, ThumbnailError> {
        if !self.header().ends_with(BASE64_MARKER) {
            return Err(ThumbnailError::InvalidDataUrl);
        }
        let payload = self.0.split_once(',').map(|(_, p)| p).unwrap_or_default();
        STANDARD
            .decode(payload.trim())
            .map_err(|_| ThumbnailError::InvalidDataUrl)
    }
}

impl TryFrom<String> for DataUrl {
    type Error = ThumbnailError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<DataUrl> for String {
    fn from(url: DataUrl) -> Self {
        url.0
    }
}
