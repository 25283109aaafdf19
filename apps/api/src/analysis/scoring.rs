//! Scoring — keyword overlap and TF-IDF cosine similarity between a resume and a JD.
//!
//! The similarity backend sits behind `SimilarityScorer` so the analyzer can be
//! built with a different one without touching the pipeline or the handlers.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::analysis::AnalyzerConfig;

pub const MISSING_JD_WARNING: &str = "Please enter a Job Description to calculate the match.";

static KEYWORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w+\b").expect("valid keyword regex"));

/// Two or more word characters, the conventional TF-IDF token shape.
static TERM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w\w+\b").expect("valid term regex"));

// ────────────────────────────────────────────────────────────────────────────
// Output data model
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum JobMatch {
    Scored {
        keyword_matches: usize,
        /// Cosine similarity × 100, rounded to 2 decimals.
        base_percentage: f64,
        /// `base_percentage` plus the configured offset, capped only if a cap is set.
        match_percentage: f64,
    },
    MissingJobDescription {
        warning: String,
    },
}

// ────────────────────────────────────────────────────────────────────────────
// Similarity backends
// ────────────────────────────────────────────────────────────────────────────

pub trait SimilarityScorer: Send + Sync {
    /// Similarity in `[0, 1]`.
    fn similarity(&self, resume_text: &str, job_description: &str) -> f64;

    /// Backend label, for logs.
    fn name(&self) -> &'static str;
}

/// TF-IDF fit over exactly the two documents being compared.
///
/// Weights: raw term counts × smoothed idf `ln((1 + n) / (1 + df)) + 1` with
/// `n = 2`. Terms shared by both documents get idf 1, terms unique to one
/// document get `1 + ln(1.5)`.
pub struct TfIdfScorer;

impl SimilarityScorer for TfIdfScorer {
    fn similarity(&self, resume_text: &str, job_description: &str) -> f64 {
        let resume = term_counts(resume_text);
        let jd = term_counts(job_description);

        let idf = |term: &str| {
            let df = usize::from(resume.contains_key(term)) + usize::from(jd.contains_key(term));
            ((1.0 + 2.0) / (1.0 + df as f64)).ln() + 1.0
        };

        cosine_similarity(&weighted(&resume, idf), &weighted(&jd, idf))
    }

    fn name(&self) -> &'static str {
        "tfidf"
    }
}

fn term_counts(text: &str) -> HashMap<String, usize> {
    let lowered = text.to_lowercase();
    let mut counts = HashMap::new();
    for m in TERM_RE.find_iter(&lowered) {
        *counts.entry(m.as_str().to_string()).or_insert(0) += 1;
    }
    counts
}

fn weighted(counts: &HashMap<String, usize>, idf: impl Fn(&str) -> f64) -> HashMap<&str, f64> {
    counts
        .iter()
        .map(|(term, &count)| (term.as_str(), count as f64 * idf(term.as_str())))
        .collect()
}

fn cosine_similarity(a: &HashMap<&str, f64>, b: &HashMap<&str, f64>) -> f64 {
    let dot: f64 = a
        .iter()
        .filter_map(|(term, wa)| b.get(term).map(|wb| wa * wb))
        .sum();
    let norm_a = a.values().map(|w| w * w).sum::<f64>().sqrt();
    let norm_b = b.values().map(|w| w * w).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    (dot / (norm_a * norm_b)).clamp(0.0, 1.0)
}

// ────────────────────────────────────────────────────────────────────────────
// Keyword overlap
// ────────────────────────────────────────────────────────────────────────────

/// Lowercased word tokens of `text`, deduplicated.
pub fn extract_keywords(text: &str) -> HashSet<String> {
    KEYWORD_RE
        .find_iter(&text.to_lowercase())
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Size of the intersection of both keyword sets. Symmetric in its arguments.
pub fn keyword_match_count(resume_text: &str, job_description: &str) -> usize {
    let resume = extract_keywords(resume_text);
    let jd = extract_keywords(job_description);
    resume.intersection(&jd).count()
}

// ────────────────────────────────────────────────────────────────────────────
// Job match
// ────────────────────────────────────────────────────────────────────────────

/// Keyword count plus similarity percentage, or the missing-JD warning when
/// the job description is blank.
pub fn score_job_match(
    resume_text: &str,
    job_description: &str,
    scorer: &dyn SimilarityScorer,
    config: &AnalyzerConfig,
) -> JobMatch {
    if job_description.trim().is_empty() {
        return JobMatch::MissingJobDescription {
            warning: MISSING_JD_WARNING.to_string(),
        };
    }

    let keyword_matches = keyword_match_count(resume_text, job_description);
    let base_percentage = round2(scorer.similarity(resume_text, job_description) * 100.0);

    JobMatch::Scored {
        keyword_matches,
        base_percentage,
        match_percentage: display_percentage(base_percentage, config),
    }
}

fn display_percentage(base_percentage: f64, config: &AnalyzerConfig) -> f64 {
    let shifted = base_percentage + config.score_offset;
    round2(config.score_cap.map_or(shifted, |cap| shifted.min(cap)))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
