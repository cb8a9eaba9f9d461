//! Heuristic scorer: deterministic stand-in used when no model is reachable.
//!
//! Pure-Rust, no I/O. Word count drives the score; a handful of substring
//! checks on the lowercased text fill the lists.

use crate::analysis::models::AnalysisResult;

pub const HEURISTIC_SUMMARY: &str = "Quick heuristic analysis (AI not available).";
const MIN_SCORE: usize = 30;
const MAX_SCORE: usize = 90;
const WORDS_PER_POINT: usize = 5;

/// Checked in this order; output order follows it, not the resume's.
const TRACKED_KEYWORDS: [&str; 3] = ["python", "sql", "machine learning"];

const EXPERIENCE_STRENGTH: &str = "Shows work experience";
const EXPERIENCE_WEAKNESS: &str = "No explicit work experience section found";

pub fn score(text: &str) -> AnalysisResult {
    let lowered = text.to_lowercase();
    let word_count = lowered.split_whitespace().count();
    let score = (word_count / WORDS_PER_POINT).clamp(MIN_SCORE, MAX_SCORE) as u8;

    let mut strengths = Vec::new();
    let mut weaknesses = Vec::new();
    if lowered.contains("experience") || lowered.contains("worked") {
        strengths.push(EXPERIENCE_STRENGTH.to_string());
    } else {
        weaknesses.push(EXPERIENCE_WEAKNESS.to_string());
    }

    let keywords_to_add = TRACKED_KEYWORDS
        .iter()
        .filter(|k| lowered.contains(*k))
        .map(|k| k.to_string())
        .collect();

    AnalysisResult {
        score,
        summary: HEURISTIC_SUMMARY.to_string(),
        strengths,
        weaknesses,
        keywords_to_add,
        grammar_and_formatting: Vec::new(),
        recommended_changes: vec![
            "Provide a clear Work Experience section".to_string(),
            "Add 3-5 technical keywords".to_string(),
        ],
        model_used: None,
        fallback_analysis: Some(true),
    }
}
