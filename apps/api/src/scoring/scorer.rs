//! Deterministic ATS scorer.
//!
//! Pure arithmetic over the extractor's four skill lists plus the raw resume
//! text. No model calls, no I/O, no shared state; identical inputs always
//! produce identical reports. All failure modes (short inputs, oversized
//! payloads, upstream extraction errors) belong to the HTTP boundary — given
//! well-typed inputs this module cannot fail.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::scoring::extractor::ExtractionResult;

const REQUIRED_WEIGHT: f64 = 1.0;
const PREFERRED_WEIGHT: f64 = 0.5;

const SKILLS_BLEND: f64 = 0.6;
const KEYWORD_BLEND: f64 = 0.3;
const TITLE_BLEND: f64 = 0.1;

/// Three-tier qualitative label derived from the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ranking {
    Strong,
    Moderate,
    Weak,
}

/// The score report returned to callers. Field names follow the public
/// JSON surface (camelCase).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreReport {
    pub overall_match_pct: u32,
    pub skills_match_pct: u32,
    pub ranking: Ranking,
    /// Deduplicated union of matched required and matched preferred skills.
    pub matched_skills: Vec<String>,
    /// Required skills absent from the resume. Preferred-skill gaps are not
    /// reported here.
    pub missing_skills: Vec<String>,
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub notes: Vec<String>,
}

/// Scores a resume against an extraction result.
///
/// Skill comparison is exact on normalized (lowercased, trimmed) forms.
/// Keyword comparison is a case-insensitive substring test against the full
/// raw resume text. Absent skill or keyword lists are treated as trivially
/// satisfied rather than penalized.
pub fn score(extraction: &ExtractionResult, resume_text: &str) -> ScoreReport {
    let required = normalize_unique(&extraction.required_skills);
    let preferred = normalize_unique(&extraction.preferred_skills);
    let keywords = normalize_unique(&extraction.keywords);
    let resume_skills: HashSet<String> = extraction
        .resume_skills
        .iter()
        .map(|s| normalize(s))
        .collect();

    let matched_required: Vec<String> = required
        .iter()
        .filter(|s| resume_skills.contains(*s))
        .cloned()
        .collect();
    let missing_required: Vec<String> = required
        .iter()
        .filter(|s| !resume_skills.contains(*s))
        .cloned()
        .collect();
    let matched_preferred: Vec<String> = preferred
        .iter()
        .filter(|s| resume_skills.contains(*s))
        .cloned()
        .collect();

    let total_weight =
        required.len() as f64 * REQUIRED_WEIGHT + preferred.len() as f64 * PREFERRED_WEIGHT;
    let matched_weight = matched_required.len() as f64 * REQUIRED_WEIGHT
        + matched_preferred.len() as f64 * PREFERRED_WEIGHT;

    // A JD with no extractable skills is trivially satisfied, not a fault.
    let skills_match_pct = if total_weight == 0.0 {
        100
    } else {
        clamp_pct((matched_weight / total_weight * 100.0).round())
    };

    let haystack = resume_text.to_lowercase();
    let (matched_keywords, missing_keywords): (Vec<String>, Vec<String>) = keywords
        .iter()
        .cloned()
        .partition(|k| haystack.contains(k.as_str()));

    let keyword_match_pct = if keywords.is_empty() {
        100
    } else {
        clamp_pct((matched_keywords.len() as f64 / keywords.len() as f64 * 100.0).round())
    };

    // TODO: the 10% title-alignment term is a constant — no role/title
    // comparison is implemented yet, so it always contributes its full share.
    let overall_match_pct = clamp_pct(
        (skills_match_pct as f64 * SKILLS_BLEND
            + keyword_match_pct as f64 * KEYWORD_BLEND
            + 100.0 * TITLE_BLEND)
            .round(),
    );

    let mut matched_skills = matched_required.clone();
    for skill in &matched_preferred {
        if !matched_skills.contains(skill) {
            matched_skills.push(skill.clone());
        }
    }

    let notes = build_notes(
        matched_required.len(),
        required.len(),
        missing_required.len(),
        matched_keywords.len(),
        keywords.len(),
    );

    ScoreReport {
        overall_match_pct,
        skills_match_pct,
        ranking: ranking_for(overall_match_pct),
        matched_skills,
        missing_skills: missing_required,
        matched_keywords,
        missing_keywords,
        notes,
    }
}

/// Classifies an overall percentage into the three-tier ranking.
pub fn ranking_for(overall_match_pct: u32) -> Ranking {
    if overall_match_pct >= 75 {
        Ranking::Strong
    } else if overall_match_pct >= 50 {
        Ranking::Moderate
    } else {
        Ranking::Weak
    }
}

fn normalize(skill: &str) -> String {
    skill.trim().to_lowercase()
}

/// Normalizes a skill list, dropping blanks and duplicates while preserving
/// first-occurrence order. The extractor does not guarantee clean data.
fn normalize_unique(skills: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    skills
        .iter()
        .map(|s| normalize(s))
        .filter(|s| !s.is_empty() && seen.insert(s.clone()))
        .collect()
}

fn clamp_pct(value: f64) -> u32 {
    value.clamp(0.0, 100.0) as u32
}

fn build_notes(
    matched_required: usize,
    required_total: usize,
    missing_required: usize,
    matched_keywords: usize,
    keywords_total: usize,
) -> Vec<String> {
    let mut notes = Vec::new();

    if matched_required > 0 {
        notes.push(format!(
            "Matched {matched_required} of {required_total} required skills"
        ));
    }
    if missing_required > 0 {
        notes.push(format!("Missing {missing_required} required skills"));
    }
    if matched_keywords > 0 {
        notes.push(format!(
            "Matched {matched_keywords} of {keywords_total} keywords"
        ));
    }
    if notes.is_empty() {
        notes.push("Analysis complete".to_string());
    }

    notes
}
