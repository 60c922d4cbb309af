//! Keyword coverage of the job description by the resume

use crate::nlp::Annotator;
use crate::processing::keywords::{extract_keywords, KeywordSet};
use crate::processing::similarity::round2;
use serde::{Deserialize, Serialize};

/// Percentage of `total` covered by `matched`, rounded to two decimals.
/// A zero total yields `0.0`.
pub fn coverage_percent(matched: usize, total: usize) -> f64 {
    round2(100.0 * matched as f64 / total.max(1) as f64)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillMatch {
    /// Job keywords also present in the resume
    pub matched: KeywordSet,
    pub job_keywords: KeywordSet,
    pub coverage: f64,
}

impl SkillMatch {
    pub fn from_sets(resume_keywords: &KeywordSet, job_keywords: &KeywordSet) -> Self {
        let matched = resume_keywords.intersection(job_keywords);
        let coverage = coverage_percent(matched.len(), job_keywords.len());

        Self {
            matched,
            job_keywords: job_keywords.clone(),
            coverage,
        }
    }

    /// Job keywords the resume never mentions
    pub fn missing(&self) -> KeywordSet {
        self.job_keywords.difference(&self.matched)
    }
}

/// Extract keywords from both texts and compare them
pub fn match_skills(annotator: &dyn Annotator, resume_text: &str, job_text: &str) -> SkillMatch {
    let resume_keywords = extract_keywords(annotator, resume_text);
    let job_keywords = extract_keywords(annotator, job_text);
    SkillMatch::from_sets(&resume_keywords, &job_keywords)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::RuleBasedAnnotator;

    #[test]
    fn test_coverage_percent() {
        assert_eq!(coverage_percent(0, 0), 0.0);
        assert_eq!(coverage_percent(3, 3), 100.0);
        assert_eq!(coverage_percent(1, 3), 33.33);
        assert_eq!(coverage_percent(2, 3), 66.67);
    }

    #[test]
    fn test_from_sets() {
        let resume: KeywordSet = ["python", "sql", "tableau"].into_iter().collect();
        let job: KeywordSet = ["python", "sql", "airflow", "spark"].into_iter().collect();

        let result = SkillMatch::from_sets(&resume, &job);
        assert_eq!(result.matched.top(10), vec!["python", "sql"]);
        assert_eq!(result.coverage, 50.0);
        assert_eq!(result.missing().top(10), vec!["airflow", "spark"]);
    }

    #[test]
    fn test_match_skills_scenario() {
        let annotator = RuleBasedAnnotator::default();
        let result = match_skills(
            &annotator,
            "I worked on a Python dashboard project for sales analytics.",
            "Looking for a Python developer experienced with dashboards and analytics.",
        );

        assert!(result.matched.contains("python"));
        assert!(result.matched.contains("analytics"));
        // no stemming
        assert!(!result.matched.contains("dashboard"));
        assert!(!result.matched.contains("dashboards"));
        assert!(result.coverage > 0.0 && result.coverage <= 100.0);
    }

    #[test]
    fn test_function_word_job_has_zero_coverage() {
        let annotator = RuleBasedAnnotator::default();
        let result = match_skills(&annotator, "Rust engineer with Kafka experience", "and the of with");

        assert!(result.job_keywords.is_empty());
        assert_eq!(result.coverage, 0.0);
    }
}
