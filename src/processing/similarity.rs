//! Term-count cosine similarity

use ndarray::Array1;
use std::collections::BTreeMap;

/// Round to two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Sorted vocabulary of two whitespace-tokenized texts, mapped to vector
/// indices.
fn vocabulary<'a>(a: &[&'a str], b: &[&'a str]) -> BTreeMap<&'a str, usize> {
    let mut terms: Vec<&str> = a.iter().chain(b.iter()).copied().collect();
    terms.sort_unstable();
    terms.dedup();
    terms.into_iter().enumerate().map(|(i, t)| (t, i)).collect()
}

fn count_vector(terms: &[&str], vocabulary: &BTreeMap<&str, usize>) -> Array1<f64> {
    let mut vector = Array1::<f64>::zeros(vocabulary.len());
    for term in terms {
        if let Some(&index) = vocabulary.get(term) {
            vector[index] += 1.0;
        }
    }
    vector
}

/// Cosine similarity of raw term-count vectors, as a percentage.
///
/// Both inputs are expected to be normalized text. The result is rounded to
/// two decimals and lies in `[0.0, 100.0]`; if either side has no terms the
/// score is `0.0`.
pub fn similarity_score(resume_normalized: &str, job_normalized: &str) -> f64 {
    let resume_terms: Vec<&str> = resume_normalized.split_whitespace().collect();
    let job_terms: Vec<&str> = job_normalized.split_whitespace().collect();

    if resume_terms.is_empty() || job_terms.is_empty() {
        return 0.0;
    }

    let vocabulary = vocabulary(&resume_terms, &job_terms);
    let a = count_vector(&resume_terms, &vocabulary);
    let b = count_vector(&job_terms, &vocabulary);

    let norm_a = a.dot(&a).sqrt();
    let norm_b = b.dot(&b).sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    let cosine = a.dot(&b) / (norm_a * norm_b);
    round2(cosine * 100.0).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_texts_score_100() {
        let text = "python developer with sql and airflow experience";
        assert_eq!(similarity_score(text, text), 100.0);
    }

    #[test]
    fn test_disjoint_texts_score_0() {
        assert_eq!(similarity_score("rust systems", "marketing sales"), 0.0);
    }

    #[test]
    fn test_empty_side_scores_0() {
        assert_eq!(similarity_score("", "python"), 0.0);
        assert_eq!(similarity_score("python", ""), 0.0);
        assert_eq!(similarity_score("", ""), 0.0);
    }

    #[test]
    fn test_symmetric() {
        let a = "data engineer building data pipelines in python";
        let b = "python data engineer wanted for pipelines and dashboards";
        assert_eq!(similarity_score(a, b), similarity_score(b, a));
    }

    #[test]
    fn test_raw_counts_not_sets() {
        // [2,1]·[1,1] / (sqrt(5) * sqrt(2)) = 0.94868...
        assert_eq!(similarity_score("rust rust go", "rust go"), 94.87);
    }

    #[test]
    fn test_partial_overlap_in_range() {
        let score = similarity_score("python sql", "python java");
        assert_eq!(score, 50.0);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(33.33333), 33.33);
        assert_eq!(round2(66.666), 66.67);
        assert_eq!(round2(0.0), 0.0);
    }
}
