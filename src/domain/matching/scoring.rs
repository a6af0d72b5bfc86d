// Candidate scoring.
//
// A candidate must share a surname relation (equality or substring) with the
// query before it earns any points. Given-name signals only separate people
// who share a surname; the popularity term is a weak tie-breaker.

use std::collections::HashSet;

use super::weights::ScoringWeights;
use crate::domain::candidate::CandidateRecord;
use crate::domain::identity::ParsedIdentity;

/// A candidate together with the score that selected it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredCandidate<'a> {
    pub candidate: &'a CandidateRecord,
    pub score: f64,
}

/// Lower-case and drop everything outside `a-z`.
pub fn normalize_name(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase())
        .collect()
}

/// Surname spellings worth trying against the service's records.
///
/// For a compound surname this is the whole name plus its last and first
/// words, so "Sadoghi Hamedani" also matches a record stored as "Hamedani".
pub fn build_last_name_candidates(last: &str) -> Vec<String> {
    let stripped: String = last.chars().filter(|c| *c != '.' && *c != ',').collect();
    let parts: Vec<&str> = stripped.split_whitespace().collect();
    if parts.is_empty() {
        return Vec::new();
    }

    let cleaned = parts.join(" ");
    let mut candidates = vec![cleaned];
    if parts.len() >= 2 {
        candidates.push(parts[parts.len() - 1].to_string());
        candidates.push(parts[0].to_string());
    }

    let mut seen = HashSet::new();
    candidates.retain(|c| seen.insert(c.clone()));
    candidates
}

/// Score one candidate, or `None` when it fails the surname gate.
pub fn score_candidate(
    identity: &ParsedIdentity,
    candidate: &CandidateRecord,
    weights: &ScoringWeights,
) -> Option<f64> {
    let surnames: Vec<String> = build_last_name_candidates(&identity.last)
        .iter()
        .map(|s| normalize_name(s))
        .filter(|s| !s.is_empty())
        .collect();
    score_with_surnames(identity, &surnames, candidate, weights)
}

/// Highest-scoring candidate; on ties the first one seen wins.
pub fn pick_best_match<'a>(
    identity: &ParsedIdentity,
    candidates: &'a [CandidateRecord],
    weights: &ScoringWeights,
) -> Option<ScoredCandidate<'a>> {
    let surnames: Vec<String> = build_last_name_candidates(&identity.last)
        .iter()
        .map(|s| normalize_name(s))
        .filter(|s| !s.is_empty())
        .collect();

    let mut best: Option<ScoredCandidate<'a>> = None;
    for candidate in candidates {
        let Some(score) = score_with_surnames(identity, &surnames, candidate, weights) else {
            continue;
        };
        if best.map_or(true, |b| score > b.score) {
            best = Some(ScoredCandidate { candidate, score });
        }
    }
    best
}

fn score_with_surnames(
    identity: &ParsedIdentity,
    surnames: &[String],
    candidate: &CandidateRecord,
    weights: &ScoringWeights,
) -> Option<f64> {
    let candidate_last = normalize_name(candidate.last_name.trim());

    let mut last_score: f64 = 0.0;
    for query in surnames {
        if candidate_last == *query {
            last_score = last_score.max(weights.exact_last);
        } else if candidate_last.contains(query.as_str()) || query.contains(candidate_last.as_str()) {
            last_score = last_score.max(weights.partial_last);
        }
    }
    if last_score <= 0.0 {
        return None;
    }

    let mut score = last_score;

    let query_first = normalize_name(&identity.first);
    let candidate_first = candidate.first_name.trim();
    if !query_first.is_empty() && normalize_name(candidate_first) == query_first {
        score += weights.first_name;
    }

    let query_initial = identity.first_initial.to_uppercase();
    if !query_initial.is_empty() {
        let candidate_initial: String = candidate_first
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default();
        if candidate_initial == query_initial {
            score += weights.first_initial;
        }
    }

    score += weights.popularity_bonus(candidate.num_ratings);
    Some(score)
}
