//! Filtering ranked course recommendations
//!
//! Candidates come from an external similarity search ranked by closeness to
//! the student's profile vector. They are filtered against the audit's
//! completed and required course sets; when too few survive, the search is
//! repeated with a larger result count.

use crate::core::catalog::RequisiteLookup;
use crate::core::models::catalog::is_only_graduate_standing;
use crate::core::models::CandidateCourse;
use std::collections::BTreeSet;

/// Nearest-neighbor search over course descriptions
pub trait SimilaritySearch {
    /// Up to `top_k` candidates closest to `vector`, best first
    ///
    /// # Errors
    /// Returns a message when the search backend fails
    fn search(&self, vector: &[f32], top_k: usize) -> Result<Vec<CandidateCourse>, String>;
}

/// A fixed ranked list standing in for a live search service
///
/// The query vector is ignored; the first `top_k` entries are returned.
#[derive(Debug, Clone, Default)]
pub struct RankedCandidates {
    candidates: Vec<CandidateCourse>,
}

impl RankedCandidates {
    /// Wrap an already ranked list
    #[must_use]
    pub const fn new(candidates: Vec<CandidateCourse>) -> Self {
        Self { candidates }
    }

    /// Parse a JSON array of candidates
    ///
    /// # Errors
    /// Returns an error if the text is not a JSON array of candidate objects
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text).map(Self::new)
    }

    /// Number of ranked candidates
    #[must_use]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Whether the list is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

impl SimilaritySearch for RankedCandidates {
    fn search(&self, _vector: &[f32], top_k: usize) -> Result<Vec<CandidateCourse>, String> {
        Ok(self.candidates.iter().take(top_k).cloned().collect())
    }
}

/// Escalation settings for [`RecommendPolicy::recommend`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecommendPolicy {
    /// Survivors below this count trigger a widened search
    pub min_results: usize,
    /// Multiplier applied to `top_k` for the widened search
    pub widen_factor: f64,
}

impl Default for RecommendPolicy {
    fn default() -> Self {
        Self {
            min_results: 3,
            widen_factor: 2.5,
        }
    }
}

impl RecommendPolicy {
    /// Result count for the widened search, `ceil(top_k * widen_factor)`
    #[must_use]
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn widened_top_k(&self, top_k: usize) -> usize {
        let widened = (top_k as f64 * self.widen_factor.max(0.0)).ceil() as usize;
        widened.max(top_k)
    }

    /// Query `search`, filter, and widen once if too few candidates remain.
    ///
    /// The first pass applies every rule of [`filter_candidates`]. The
    /// widened pass applies only the completed and required rules and its
    /// result replaces the first pass entirely. A failed search yields an
    /// empty list.
    pub fn recommend<S, C>(
        &self,
        search: &S,
        vector: &[f32],
        top_k: usize,
        completed: &BTreeSet<String>,
        required: &BTreeSet<String>,
        catalog: &C,
    ) -> Vec<CandidateCourse>
    where
        S: SimilaritySearch + ?Sized,
        C: RequisiteLookup + ?Sized,
    {
        let candidates = match search.search(vector, top_k) {
            Ok(candidates) => candidates,
            Err(e) => {
                crate::warn!("Similarity search failed: {e}");
                return Vec::new();
            }
        };
        crate::debug!("Search returned {} candidate(s) for top_k={top_k}", candidates.len());

        let filtered = filter_candidates(candidates, completed, required, catalog);
        if filtered.len() >= self.min_results {
            return filtered;
        }

        let widened = self.widened_top_k(top_k);
        crate::info!(
            "Only {} candidate(s) left after filtering; re-running search with top_k={widened}",
            filtered.len()
        );
        match search.search(vector, widened) {
            Ok(candidates) => filter_by_audit(candidates, completed, required),
            Err(e) => {
                crate::warn!("Widened similarity search failed: {e}");
                Vec::new()
            }
        }
    }
}

/// [`RecommendPolicy::recommend`] with the default policy
pub fn recommend<S, C>(
    search: &S,
    vector: &[f32],
    top_k: usize,
    completed: &BTreeSet<String>,
    required: &BTreeSet<String>,
    catalog: &C,
) -> Vec<CandidateCourse>
where
    S: SimilaritySearch + ?Sized,
    C: RequisiteLookup + ?Sized,
{
    RecommendPolicy::default().recommend(search, vector, top_k, completed, required, catalog)
}

/// Drop completed courses, courses outside a non-empty required set, and
/// courses whose only requisite is graduate standing. Order is preserved.
pub fn filter_candidates<C>(
    candidates: Vec<CandidateCourse>,
    completed: &BTreeSet<String>,
    required: &BTreeSet<String>,
    catalog: &C,
) -> Vec<CandidateCourse>
where
    C: RequisiteLookup + ?Sized,
{
    candidates
        .into_iter()
        .filter(|candidate| {
            let code = candidate.code();
            if !passes_audit(&code, completed, required) {
                return false;
            }
            let graduate_only = catalog
                .requisite_text(&code)
                .is_some_and(is_only_graduate_standing);
            if graduate_only {
                crate::debug!("Skipping {code}: requires only graduate/professional standing");
            }
            !graduate_only
        })
        .collect()
}

/// Completed and required rules only
fn filter_by_audit(
    candidates: Vec<CandidateCourse>,
    completed: &BTreeSet<String>,
    required: &BTreeSet<String>,
) -> Vec<CandidateCourse> {
    candidates
        .into_iter()
        .filter(|candidate| passes_audit(&candidate.code(), completed, required))
        .collect()
}

fn passes_audit(code: &str, completed: &BTreeSet<String>, required: &BTreeSet<String>) -> bool {
    if completed.contains(code) {
        crate::debug!("Skipping {code}: already completed");
        return false;
    }
    if !required.is_empty() && !required.contains(code) {
        crate::debug!("Skipping {code}: not a required course");
        return false;
    }
    true
}
