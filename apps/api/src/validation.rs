//! Input preconditions enforced at the HTTP boundary, never inside the scorer.

use crate::config::Config;
use crate::errors::AppError;

/// Validates a resumeText / jobDescription pair: both present, combined size
/// under the configured ceiling, each field at least the configured minimum.
pub fn validate_text_pair(
    resume_text: &str,
    job_description: &str,
    config: &Config,
) -> Result<(), AppError> {
    if resume_text.trim().is_empty() || job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "Resume text and job description are required".to_string(),
        ));
    }

    let combined = resume_text.len() + job_description.len();
    if combined > config.max_input_chars {
        return Err(AppError::Validation(format!(
            "Total input size exceeds {} characters. Please reduce the size of your resume or job description.",
            config.max_input_chars
        )));
    }

    if resume_text.trim().len() < config.min_field_chars {
        return Err(AppError::Validation(
            "Resume text is too short. Please provide a complete resume.".to_string(),
        ));
    }

    if job_description.trim().len() < config.min_field_chars {
        return Err(AppError::Validation(
            "Job description is too short. Please provide a complete job description.".to_string(),
        ));
    }

    Ok(())
}

/// Validates a lone resumeText field (layout check has no JD input).
pub fn validate_resume_text(resume_text: &str, config: &Config) -> Result<(), AppError> {
    if resume_text.trim().is_empty() {
        return Err(AppError::Validation(
            "Resume text is required".to_string(),
        ));
    }

    if resume_text.len() > config.max_input_chars {
        return Err(AppError::Validation(format!(
            "Total input size exceeds {} characters. Please reduce the size of your resume or job description.",
            config.max_input_chars
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::Provider;

    fn test_config() -> Config {
        Config {
            provider: Provider::OpenAi,
            api_key: "test-key".to_string(),
            redis_url: None,
            port: 8080,
            rust_log: "info".to_string(),
            max_input_chars: 40_000,
            min_field_chars: 50,
            rate_limit_window_secs: 60,
            score_rate_limit: 15,
            cover_letter_rate_limit: 10,
        }
    }

    fn long_text(len: usize) -> String {
        "x".repeat(len)
    }

    #[test]
    fn test_accepts_well_formed_pair() {
        let config = test_config();
        assert!(validate_text_pair(&long_text(200), &long_text(200), &config).is_ok());
    }

    #[test]
    fn test_rejects_missing_fields() {
        let config = test_config();
        let err = validate_text_pair("", &long_text(200), &config).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let err = validate_text_pair(&long_text(200), "   ", &config).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_rejects_oversized_combined_input() {
        let config = test_config();
        let err =
            validate_text_pair(&long_text(30_000), &long_text(10_001), &config).unwrap_err();
        let AppError::Validation(msg) = err else {
            panic!("expected validation error");
        };
        assert!(msg.contains("40000"));
    }

    #[test]
    fn test_rejects_short_resume() {
        let config = test_config();
        let err = validate_text_pair("too short", &long_text(200), &config).unwrap_err();
        let AppError::Validation(msg) = err else {
            panic!("expected validation error");
        };
        assert!(msg.contains("Resume text is too short"));
    }

    #[test]
    fn test_rejects_short_job_description() {
        let config = test_config();
        let err = validate_text_pair(&long_text(200), "too short", &config).unwrap_err();
        let AppError::Validation(msg) = err else {
            panic!("expected validation error");
        };
        assert!(msg.contains("Job description is too short"));
    }

    #[test]
    fn test_boundary_lengths() {
        let config = test_config();
        // Exactly at the minimum passes; one below fails.
        assert!(validate_text_pair(&long_text(50), &long_text(50), &config).is_ok());
        assert!(validate_text_pair(&long_text(49), &long_text(50), &config).is_err());
        // Exactly at the combined ceiling passes.
        assert!(validate_text_pair(&long_text(20_000), &long_text(20_000), &config).is_ok());
    }

    #[test]
    fn test_lone_resume_text() {
        let config = test_config();
        assert!(validate_resume_text("a short but present resume", &config).is_ok());
        assert!(validate_resume_text("  ", &config).is_err());
        assert!(validate_resume_text(&long_text(40_001), &config).is_err());
    }
}
