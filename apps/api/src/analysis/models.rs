//! Response shapes for the analysis endpoints. Field names follow the public
//! JSON surface (camelCase); list fields default to empty so a sparse model
//! reply still deserializes.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryScores {
    pub skills: u32,
    pub experience: u32,
    pub education: u32,
    pub relevance: u32,
}

/// Full LLM match analysis between a resume and a job description.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchAnalysis {
    pub match_score: u32,
    pub category_scores: CategoryScores,
    #[serde(default)]
    pub matched_keywords: Vec<String>,
    #[serde(default)]
    pub missing_keywords: Vec<String>,
    #[serde(default)]
    pub summary_feedback: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub section: String,
    #[serde(default)]
    pub current_text: String,
    #[serde(default)]
    pub suggested_text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationStep {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub suggestions: Vec<Suggestion>,
}

/// Step-by-step optimization plan. The handler backfills the two optional
/// fields when the model omits them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationPlan {
    #[serde(default)]
    pub steps: Vec<OptimizationStep>,
    #[serde(default)]
    pub optimized_resume_text: Option<String>,
    #[serde(default)]
    pub changes_summary: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutIssue {
    #[serde(rename = "type")]
    pub issue_type: String,
    #[serde(default)]
    pub description: String,
    pub severity: Severity,
}

/// ATS-compatibility report over resume layout and formatting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutAnalysis {
    pub layout_score: u32,
    #[serde(default)]
    pub issues: Vec<LayoutIssue>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_analysis_round_trips_camel_case() {
        let json = r#"{
            "matchScore": 72,
            "categoryScores": {"skills": 80, "experience": 70, "education": 60, "relevance": 75},
            "matchedKeywords": ["python"],
            "missingKeywords": ["kubernetes"],
            "summaryFeedback": "Solid technical overlap."
        }"#;
        let analysis: MatchAnalysis = serde_json::from_str(json).unwrap();
        assert_eq!(analysis.match_score, 72);
        assert_eq!(analysis.category_scores.skills, 80);

        let out = serde_json::to_value(&analysis).unwrap();
        assert_eq!(out["matchScore"], 72);
        assert_eq!(out["categoryScores"]["relevance"], 75);
    }

    #[test]
    fn test_match_analysis_tolerates_missing_lists() {
        let json = r#"{
            "matchScore": 40,
            "categoryScores": {"skills": 40, "experience": 40, "education": 40, "relevance": 40}
        }"#;
        let analysis: MatchAnalysis = serde_json::from_str(json).unwrap();
        assert!(analysis.matched_keywords.is_empty());
        assert!(analysis.summary_feedback.is_empty());
    }

    #[test]
    fn test_layout_issue_severity_is_lowercase() {
        let json = r#"{"type": "columns", "description": "Two-column header", "severity": "high"}"#;
        let issue: LayoutIssue = serde_json::from_str(json).unwrap();
        assert_eq!(issue.severity, Severity::High);
        assert_eq!(
            serde_json::to_value(&issue).unwrap()["severity"],
            "high"
        );
    }

    #[test]
    fn test_optimization_plan_optional_fields_default() {
        let json = r#"{"steps": [{"title": "Tighten summary"}]}"#;
        let plan: OptimizationPlan = serde_json::from_str(json).unwrap();
        assert_eq!(plan.steps.len(), 1);
        assert!(plan.optimized_resume_text.is_none());
        assert!(plan.changes_summary.is_none());
    }
}
