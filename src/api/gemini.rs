//! Wire types for the Gemini `generateContent` endpoint.
//!
//! Response types are lenient: every field is optional so that a response
//! missing part of the expected shape still parses and the caller decides
//! what is missing.

use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_DESCRIBE_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_RENDER_MODEL: &str = "gemini-2.0-flash-preview-image-generation";

/// `{base}/{model}:generateContent?key={api_key}`
pub fn generate_content_url(base_url: &str, model: &str, api_key: &str) -> String {
    format!(
        "{}/{}:generateContent?key={}",
        base_url.trim_end_matches('/'),
        model,
        api_key
    )
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Content {
    pub role: String,
    pub parts: Vec<RequestPart>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RequestPart {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

impl GenerateContentRequest {
    /// Single user turn with a text prompt only.
    pub fn text(prompt: impl Into<String>) -> Self {
        Self::user(vec![RequestPart::Text { text: prompt.into() }])
    }

    /// Single user turn with a prompt followed by an inline PNG.
    pub fn text_with_png(prompt: impl Into<String>, png_base64: impl Into<String>) -> Self {
        Self::user(vec![
            RequestPart::Text { text: prompt.into() },
            RequestPart::InlineData {
                inline_data: InlineData {
                    mime_type: "image/png".to_owned(),
                    data: png_base64.into(),
                },
            },
        ])
    }

    fn user(parts: Vec<RequestPart>) -> Self {
        Self {
            contents: vec![Content {
                role: "user".to_owned(),
                parts,
            }],
        }
    }

    pub fn to_value(&self) -> serde_json::Value {
        serde_json::json!({ "contents": self.contents })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Option<Vec<ResponsePart>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsePart {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub image: Option<ImagePart>,
    #[serde(default)]
    pub inline_data: Option<InlineData>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ImagePart {
    #[serde(default)]
    pub data: Option<ImageBytes>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageBytes {
    #[serde(default)]
    pub bytes_base64_encoded: Option<String>,
}

impl ResponsePart {
    /// Base64 image payload, from `image.data.bytesBase64Encoded` or from a
    /// PNG `inlineData` part.
    pub fn image_base64(&self) -> Option<&str> {
        let from_image = self
            .image
            .as_ref()
            .and_then(|image| image.data.as_ref())
            .and_then(|data| data.bytes_base64_encoded.as_deref());
        let from_inline = self
            .inline_data
            .as_ref()
            .filter(|inline| inline.mime_type == "image/png")
            .map(|inline| inline.data.as_str());
        from_image.or(from_inline)
    }
}

impl GenerateContentResponse {
    pub fn first_candidate_parts(&self) -> &[ResponsePart] {
        self.candidates
            .as_deref()
            .and_then(|candidates| candidates.first())
            .and_then(|candidate| candidate.content.as_ref())
            .and_then(|content| content.parts.as_deref())
            .unwrap_or(&[])
    }

    /// `candidates[0].content.parts[0].text`
    pub fn first_text(&self) -> Option<&str> {
        self.first_candidate_parts()
            .first()
            .and_then(|part| part.text.as_deref())
    }

    /// First part of the first candidate that carries image bytes.
    pub fn first_image_base64(&self) -> Option<&str> {
        self.first_candidate_parts()
            .iter()
            .find_map(ResponsePart::image_base64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_describe_request_shape() {
        let request = GenerateContentRequest::text_with_png("Describe this doodle.", "iVBORw0KGgo=");
        assert_eq!(
            request.to_value(),
            json!({
                "contents": [{
                    "role": "user",
                    "parts": [
                        { "text": "Describe this doodle." },
                        { "inlineData": { "mimeType": "image/png", "data": "iVBORw0KGgo=" } }
                    ]
                }]
            })
        );
    }

    #[test]
    fn test_render_request_shape() {
        let request = GenerateContentRequest::text("Generate a character");
        assert_eq!(
            request.to_value(),
            json!({ "contents": [{ "role": "user", "parts": [{ "text": "Generate a character" }] }] })
        );
    }

    #[test]
    fn test_first_text() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{ "content": { "parts": [{ "text": "a round blob" }] } }]
        }))
        .unwrap();
        assert_eq!(response.first_text(), Some("a round blob"));
    }

    #[test]
    fn test_missing_fields_parse_as_absent() {
        for body in [json!({}), json!({ "candidates": [] }), json!({ "candidates": [{}] }),
                     json!({ "candidates": [{ "content": { "parts": [] } }] }),
                     json!({ "candidates": null })] {
            let response: GenerateContentResponse = serde_json::from_value(body).unwrap();
            assert_eq!(response.first_text(), None);
            assert_eq!(response.first_image_base64(), None);
        }
    }

    #[test]
    fn test_first_image_skips_text_parts() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{ "content": { "parts": [
                { "text": "Here is your character" },
                { "image": { "data": { "bytesBase64Encoded": "AAAA" } } },
                { "image": { "data": { "bytesBase64Encoded": "BBBB" } } }
            ] } }]
        }))
        .unwrap();
        assert_eq!(response.first_image_base64(), Some("AAAA"));
    }

    #[test]
    fn test_only_png_inline_data_is_accepted() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{ "content": { "parts": [
                { "inlineData": { "mimeType": "text/plain", "data": "nope" } },
                { "inlineData": { "mimeType": "image/jpeg", "data": "/9j/4AAQ" } },
                { "inlineData": { "mimeType": "image/png", "data": "CCCC" } }
            ] } }]
        }))
        .unwrap();
        assert_eq!(response.first_image_base64(), Some("CCCC"));
    }

    #[test]
    fn test_generate_content_url() {
        assert_eq!(
            generate_content_url("https://example.test/v1beta/models/", "gemini-2.0-flash", "k"),
            "https://example.test/v1beta/models/gemini-2.0-flash:generateContent?key=k"
        );
    }
}
