//! Naive Bayes log-probability scoring

use super::artifact::ModelArtifact;
use super::types::{Classification, FeatureVector, Verdict};
use crate::error::{ClassifierError, Result};

/// Score a feature vector against both classes
///
/// `score_spam = Σ v[i]·ln(p1[i]) + ln(p_spam)` and
/// `score_ham = Σ v[i]·ln(p0[i]) + ln(1 - p_spam)`. Spam only when the spam
/// score is strictly greater, so ties are ham.
pub fn classify(vector: &FeatureVector, artifact: &ModelArtifact) -> Result<Classification> {
    if vector.len() != artifact.vocabulary().len() {
        return Err(ClassifierError::Internal(format!(
            "feature vector has {} entries but the vocabulary has {}",
            vector.len(),
            artifact.vocabulary().len()
        )));
    }

    let score_spam = dot(vector, artifact.log_p1()) + artifact.log_prior_spam();
    let score_ham = dot(vector, artifact.log_p0()) + artifact.log_prior_ham();

    let verdict = if score_spam > score_ham {
        Verdict::Spam
    } else {
        Verdict::Ham
    };

    Ok(Classification {
        verdict,
        confidence: (score_spam - score_ham).abs(),
        score_spam,
        score_ham,
    })
}

fn dot(vector: &FeatureVector, log_probs: &[f64]) -> f64 {
    vector
        .counts()
        .iter()
        .zip(log_probs)
        .map(|(&count, &lp)| f64::from(count) * lp)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::artifact::ArtifactFile;
    use crate::classifier::text::vectorize;
    use std::collections::HashSet;

    fn artifact(p0: Vec<f64>, p1: Vec<f64>, p_spam: f64) -> ModelArtifact {
        let vocabulary = (0..p0.len()).map(|i| format!("word{}", i)).collect();
        ModelArtifact::try_from(ArtifactFile::new(vocabulary, HashSet::new(), p0, p1, p_spam)).unwrap()
    }

    #[test]
    fn test_lottery_winner_is_spam() {
        let model = artifact(vec![0.1, 0.1], vec![0.4, 0.4], 0.5);
        let vector = vectorize(&["word0", "word1"], &model);

        let result = classify(&vector, &model).unwrap();
        let expected_spam = 0.4f64.ln() + 0.4f64.ln() + 0.5f64.ln();
        let expected_ham = 0.1f64.ln() + 0.1f64.ln() + 0.5f64.ln();

        assert_eq!(result.verdict, Verdict::Spam);
        assert!((result.score_spam - expected_spam).abs() < 1e-12);
        assert!((result.score_ham - expected_ham).abs() < 1e-12);
        assert!((result.confidence - 2.0 * 4.0f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn test_tie_is_ham() {
        let model = artifact(vec![0.2, 0.3], vec![0.2, 0.3], 0.5);
        let vector = vectorize(&["word0", "word1", "word1"], &model);

        let result = classify(&vector, &model).unwrap();
        assert_eq!(result.score_spam, result.score_ham);
        assert_eq!(result.verdict, Verdict::Ham);
        assert_eq!(result.confidence, 0.0);
    }

    #[test]
    fn test_empty_vector_uses_priors() {
        let spammy = artifact(vec![0.1], vec![0.9], 0.7);
        let result = classify(&FeatureVector::zeros(1), &spammy).unwrap();
        assert_eq!(result.verdict, Verdict::Spam);
        assert!((result.confidence - (0.7f64.ln() - 0.3f64.ln()).abs()).abs() < 1e-12);

        let hammy = artifact(vec![0.1], vec![0.9], 0.2);
        let result = classify(&FeatureVector::zeros(1), &hammy).unwrap();
        assert_eq!(result.verdict, Verdict::Ham);
    }

    #[test]
    fn test_ham_words_win() {
        let model = artifact(vec![0.6, 0.05], vec![0.01, 0.05], 0.6);
        let vector = vectorize(&["word0", "word0"], &model);

        let result = classify(&vector, &model).unwrap();
        assert_eq!(result.verdict, Verdict::Ham);
        assert!(result.confidence > 0.0);
    }

    #[test]
    fn test_confidence_is_unbounded() {
        let model = artifact(vec![0.001], vec![0.9], 0.5);
        let tokens = vec!["word0"; 50];

        let result = classify(&vectorize(&tokens, &model), &model).unwrap();
        assert_eq!(result.verdict, Verdict::Spam);
        assert!(result.confidence > 1.0);
    }

    #[test]
    fn test_rejects_foreign_vector() {
        let model = artifact(vec![0.1, 0.1], vec![0.4, 0.4], 0.5);
        let err = classify(&FeatureVector::zeros(3), &model).unwrap_err();
        assert!(matches!(err, ClassifierError::Internal(_)));
    }
}
