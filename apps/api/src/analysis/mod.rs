// Resume analysis: text extraction → contact + section extraction → JD scoring.
// One synchronous pass per request; the analyzer itself holds no per-request state.

pub mod contact;
pub mod handlers;
pub mod scoring;
pub mod sections;
pub mod text;

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::analysis::contact::{extract_contact_info, ContactInfo};
use crate::analysis::scoring::{score_job_match, JobMatch, SimilarityScorer, TfIdfScorer};
use crate::analysis::sections::{
    extract_achievements, extract_experience, extract_projects, extract_skills,
};
use crate::analysis::text::{extract_text, ExtractError};

/// Scoring knobs handed to the analyzer at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzerConfig {
    /// Added to the base similarity percentage before display.
    pub score_offset: f64,
    /// Upper bound on the displayed percentage. `None` leaves it unbounded.
    pub score_cap: Option<f64>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            score_offset: 35.0,
            score_cap: None,
        }
    }
}

/// Everything extracted from one resume, plus its fit against the JD.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub contact: ContactInfo,
    pub experience: String,
    pub projects: BTreeSet<String>,
    pub achievements: BTreeSet<String>,
    pub skills: BTreeSet<String>,
    pub job_match: JobMatch,
}

#[derive(Clone)]
pub struct ResumeAnalyzer {
    config: AnalyzerConfig,
    scorer: Arc<dyn SimilarityScorer>,
}

impl ResumeAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self::with_scorer(config, Arc::new(TfIdfScorer))
    }

    pub fn with_scorer(config: AnalyzerConfig, scorer: Arc<dyn SimilarityScorer>) -> Self {
        Self { config, scorer }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Full pipeline over PDF bytes. A document that cannot be parsed aborts
    /// the whole analysis; nothing else is computed.
    pub fn analyze(
        &self,
        document: &[u8],
        job_description: &str,
    ) -> Result<AnalysisReport, ExtractError> {
        let text = extract_text(document).map_err(|e| {
            warn!(bytes = document.len(), "Resume could not be parsed: {e}");
            e
        })?;
        Ok(self.analyze_text(&text, job_description))
    }

    /// Pipeline over already-normalized resume text.
    pub fn analyze_text(&self, text: &str, job_description: &str) -> AnalysisReport {
        let contact = extract_contact_info(text);
        debug!(
            email = %contact.email,
            phone = %contact.phone,
            address = %contact.address,
            "Contact info extracted"
        );

        let experience = extract_experience(text);
        let achievements = extract_achievements(text);
        let skills = extract_skills(text);
        let projects = extract_projects(text);
        debug!(
            achievements = achievements.len(),
            skills = skills.len(),
            projects = projects.len(),
            "Sections extracted"
        );

        let job_match = score_job_match(text, job_description, self.scorer.as_ref(), &self.config);
        match &job_match {
            JobMatch::Scored {
                keyword_matches,
                match_percentage,
                ..
            } => info!(
                scorer = self.scorer.name(),
                keyword_matches,
                match_percentage,
                "Resume scored against job description"
            ),
            JobMatch::MissingJobDescription { .. } => {
                warn!("No job description provided; skipping match scoring")
            }
        }

        AnalysisReport {
            contact,
            experience,
            projects,
            achievements,
            skills,
            job_match,
        }
    }
}
