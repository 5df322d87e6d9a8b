//! Relevance filtering of retrieved evidence.
//!
//! Keeps only passages scoring strictly above the threshold, preserving
//! retrieval order. Dropped passages are logged, never surfaced to the
//! end user. The threshold is a fixed tunable (a documented
//! simplification), not an adaptive policy.

use docreply_retrieval::Passage;

/// Result of filtering one question's retrieved passages.
#[derive(Debug, Clone)]
pub struct FilterOutcome {
    /// Passages that passed the threshold, in retrieval order
    pub kept: Vec<Passage>,

    /// True iff at least one passage survived
    pub had_evidence: bool,
}

/// Filter passages by relevance score.
///
/// A passage is kept iff `score > threshold` (strict); a passage scoring
/// exactly the threshold is dropped.
pub fn filter_passages(passages: Vec<Passage>, threshold: f32) -> FilterOutcome {
    let mut kept = Vec::with_capacity(passages.len());

    for passage in passages {
        if passage.score > threshold {
            kept.push(passage);
        } else {
            tracing::debug!(
                "Dropping passage from {} (score {:.3} <= {:.3})",
                passage.source_label(),
                passage.score,
                threshold
            );
        }
    }

    let had_evidence = !kept.is_empty();
    FilterOutcome { kept, had_evidence }
}
