use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Writing register for the generated letter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tone {
    #[default]
    Professional,
    Enthusiastic,
    Concise,
}

impl Tone {
    pub const VALID: &'static [&'static str] = &["Professional", "Enthusiastic", "Concise"];

    /// Parses a client-supplied tone label. Anything outside the enum is a
    /// validation error, matching the API's 400 contract.
    pub fn parse(value: &str) -> Result<Self, AppError> {
        match value {
            "Professional" => Ok(Tone::Professional),
            "Enthusiastic" => Ok(Tone::Enthusiastic),
            "Concise" => Ok(Tone::Concise),
            _ => Err(AppError::Validation(format!(
                "Invalid tone. Must be one of: {}",
                Self::VALID.join(", ")
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Length {
    Short,
    #[default]
    Standard,
}

impl Length {
    pub const VALID: &'static [&'static str] = &["Short", "Standard"];

    pub fn parse(value: &str) -> Result<Self, AppError> {
        match value {
            "Short" => Ok(Length::Short),
            "Standard" => Ok(Length::Standard),
            _ => Err(AppError::Validation(format!(
                "Invalid length. Must be one of: {}",
                Self::VALID.join(", ")
            ))),
        }
    }
}

/// Request body for cover letter generation. Tone and length arrive as raw
/// strings so out-of-enum values map to a 400 with a helpful message rather
/// than a deserialization rejection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverLetterRequest {
    #[serde(default)]
    pub resume_text: String,
    #[serde(default)]
    pub job_description: String,
    #[serde(default)]
    pub tone: Option<String>,
    #[serde(default)]
    pub length: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub role_title: Option<String>,
    #[serde(default)]
    pub hiring_manager: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub key_highlights: Vec<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub contact_info: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverLetterResponse {
    pub cover_letter: String,
    #[serde(default)]
    pub bullets_used: Vec<String>,
    #[serde(default)]
    pub detected_company: Option<String>,
    #[serde(default)]
    pub detected_role: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tone_parse_accepts_valid_labels() {
        assert_eq!(Tone::parse("Professional").unwrap(), Tone::Professional);
        assert_eq!(Tone::parse("Enthusiastic").unwrap(), Tone::Enthusiastic);
        assert_eq!(Tone::parse("Concise").unwrap(), Tone::Concise);
    }

    #[test]
    fn test_tone_parse_rejects_unknown_label() {
        let err = Tone::parse("Sarcastic").unwrap_err();
        let AppError::Validation(msg) = err else {
            panic!("expected validation error");
        };
        assert!(msg.contains("Professional, Enthusiastic, Concise"));
    }

    #[test]
    fn test_length_parse() {
        assert_eq!(Length::parse("Short").unwrap(), Length::Short);
        assert_eq!(Length::parse("Standard").unwrap(), Length::Standard);
        assert!(Length::parse("Epic").is_err());
    }

    #[test]
    fn test_defaults_are_professional_standard() {
        assert_eq!(Tone::default(), Tone::Professional);
        assert_eq!(Length::default(), Length::Standard);
    }

    #[test]
    fn test_request_deserializes_with_optionals_absent() {
        let json = r#"{"resumeText": "r", "jobDescription": "jd"}"#;
        let request: CoverLetterRequest = serde_json::from_str(json).unwrap();
        assert!(request.tone.is_none());
        assert!(request.key_highlights.is_empty());
    }

    #[test]
    fn test_response_serializes_camel_case() {
        let response = CoverLetterResponse {
            cover_letter: "Dear team".to_string(),
            bullets_used: vec!["Led migration".to_string()],
            detected_company: Some("Acme".to_string()),
            detected_role: None,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["coverLetter"], "Dear team");
        assert_eq!(json["detectedCompany"], "Acme");
        assert!(json["detectedRole"].is_null());
    }
}
