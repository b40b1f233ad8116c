//! # Name Reconciliation
//!
//! Maps free-text product names to existing catalog entries so that typos,
//! casing, and stray whitespace do not fragment one cut's stock into
//! several rows.
//!
//! ## How Reconciliation Works
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    Name Reconciliation Flow                         │
//! │                                                                     │
//! │  Operator types: "vacío "          Catalog: {"Vacio", "Asado"}      │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  canonicalize_name → "Vacío"                                        │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  similarity("Vacío", "Vacio") = 0.80   ← best candidate             │
//! │  similarity("Vacío", "Asado") = 0.20                                │
//! │       │                                                             │
//! │       ├── best >= threshold (0.6)? → return "Vacio" (merge)         │
//! │       │                                                             │
//! │       └── otherwise → return "Vacío" (new catalog entry)            │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Known Risk
//! This is a heuristic, not exact matching. Two genuinely distinct cuts
//! with very similar names can be merged (false merge), and a badly
//! mistyped name can slip past the threshold and create a duplicate
//! (false split). The threshold is configurable per deployment; at small
//! catalog sizes the per-call scan over the full name set is cheap.
//!
//! Everything here is a pure function over its inputs: the caller passes
//! an explicit snapshot of the existing names.

use crate::DEFAULT_SIMILARITY_THRESHOLD;

// =============================================================================
// Canonicalization
// =============================================================================

/// Normalizes a raw product name into its canonical storage form.
///
/// ## Rules
/// - Leading/trailing whitespace stripped
/// - First character uppercased (Unicode-aware)
/// - The remainder is preserved as typed (deliberately NOT lowercased),
///   so "McRib" style names survive
///
/// ## Example
/// ```rust
/// use corte_core::reconcile::canonicalize_name;
///
/// assert_eq!(canonicalize_name("vacio "), "Vacio");
/// assert_eq!(canonicalize_name("  Asado"), "Asado");
/// assert_eq!(canonicalize_name("bife de Chorizo"), "Bife de Chorizo");
/// ```
pub fn canonicalize_name(raw: &str) -> String {
    let trimmed = raw.trim();
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// =============================================================================
// Sequence Similarity
// =============================================================================

/// Similarity ratio between two strings on a 0–1 scale.
///
/// Matching-blocks ratio: repeatedly take the longest common contiguous
/// block, then match what is left on each side of it, and score
/// `2 * matched / (len_a + len_b)`. Unlike edit distance this rewards
/// long shared runs, which is what typo'd product names have.
///
/// Comparison is case-sensitive; canonicalization has already fixed the
/// one casing difference that matters (the first letter).
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matched_len(&a, &b) as f64 / total as f64
}

/// Total characters covered by matching blocks between `a` and `b`.
///
/// Finds the longest common block, then recurses into the unmatched
/// slices to its left and right. Blocks never cross, so the result is an
/// ordered alignment of the two names.
fn matched_len(a: &[char], b: &[char]) -> usize {
    let (a_start, b_start, len) = longest_block(a, b);
    if len == 0 {
        return 0;
    }
    len + matched_len(&a[..a_start], &b[..b_start])
        + matched_len(&a[a_start + len..], &b[b_start + len..])
}

/// Longest common contiguous block of `a` and `b`.
///
/// Returns `(a_start, b_start, len)`; ties resolve to the earliest
/// position in `a`, then in `b`. Single-row dynamic programming, O(n·m)
/// time and O(m) space; product names are a handful of characters.
fn longest_block(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let mut best = (0usize, 0usize, 0usize);
    let mut prev = vec![0usize; b.len() + 1];

    for (i, a_char) in a.iter().enumerate() {
        let mut row = vec![0usize; b.len() + 1];
        for (j, b_char) in b.iter().enumerate() {
            if a_char == b_char {
                let run = prev[j] + 1;
                row[j + 1] = run;
                if run > best.2 {
                    best = (i + 1 - run, j + 1 - run, run);
                }
            }
        }
        prev = row;
    }

    best
}

// =============================================================================
// Reconciler
// =============================================================================

/// Decides whether a proposed product name refers to an existing catalog
/// entry or seeds a new one.
///
/// ## Usage
/// ```rust
/// use corte_core::reconcile::NameReconciler;
///
/// let reconciler = NameReconciler::default();
/// let existing = ["Vacio", "Asado"];
///
/// // Trailing space + accent still lands on the existing entry
/// assert_eq!(reconciler.reconcile("Vacío ", existing), "Vacio");
///
/// // A genuinely new cut stays new
/// assert_eq!(reconciler.reconcile("Costilla", existing), "Costilla");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct NameReconciler {
    threshold: f64,
}

impl NameReconciler {
    /// Creates a reconciler with an explicit acceptance threshold.
    pub fn new(threshold: f64) -> Self {
        NameReconciler { threshold }
    }

    /// The acceptance threshold on the 0–1 similarity scale.
    #[inline]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Resolves `proposed` against a snapshot of the branch's existing
    /// names.
    ///
    /// ## Returns
    /// - The *existing* name whose similarity to the canonicalized input
    ///   is highest, if that score is at or above the threshold (the new
    ///   entry collapses into it)
    /// - The canonicalized proposed name otherwise (it becomes the seed
    ///   for a new product)
    ///
    /// An empty catalog always returns the canonicalized name. Ties
    /// between equally-scored candidates resolve to the first one seen.
    pub fn reconcile<'a, I>(&self, proposed: &str, existing: I) -> String
    where
        I: IntoIterator<Item = &'a str>,
    {
        let canonical = canonicalize_name(proposed);

        let mut best: Option<(f64, &str)> = None;
        for candidate in existing {
            let score = similarity(&canonical, candidate);
            let replace = match best {
                None => true,
                Some((best_score, _)) => score > best_score,
            };
            if replace {
                best = Some((score, candidate));
            }
        }

        match best {
            Some((score, name)) if score >= self.threshold => name.to_string(),
            _ => canonical,
        }
    }
}

impl Default for NameReconciler {
    fn default() -> Self {
        NameReconciler {
            threshold: DEFAULT_SIMILARITY_THRESHOLD,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonicalize_name() {
        assert_eq!(canonicalize_name("vacio "), "Vacio");
        assert_eq!(canonicalize_name("  Vacio"), "Vacio");
        assert_eq!(canonicalize_name("ñandú"), "Ñandú");
        // Remainder casing is preserved, only the first letter changes
        assert_eq!(canonicalize_name("bife de Chorizo"), "Bife de Chorizo");
        assert_eq!(canonicalize_name(""), "");
        assert_eq!(canonicalize_name("   "), "");
    }

    #[test]
    fn test_similarity_bounds() {
        assert_eq!(similarity("Vacio", "Vacio"), 1.0);
        assert_eq!(similarity("", ""), 1.0);
        assert_eq!(similarity("Vacio", ""), 0.0);
        assert_eq!(similarity("abc", "xyz"), 0.0);
    }

    #[test]
    fn test_similarity_rewards_shared_runs() {
        // "Vacío" vs "Vacio": "Vac" + "o" match → 2*4/10
        let score = similarity("Vacío", "Vacio");
        assert!((score - 0.8).abs() < 1e-9);

        // Distinct cuts stay clearly below the default threshold
        assert!(similarity("Costilla", "Vacio") < 0.6);
        assert!(similarity("Costilla", "Asado") < 0.6);
    }

    #[test]
    fn test_longest_block_prefers_earliest() {
        let a: Vec<char> = "abab".chars().collect();
        let b: Vec<char> = "ab".chars().collect();
        assert_eq!(longest_block(&a, &b), (0, 0, 2));
    }

    #[test]
    fn test_reconcile_merges_typo_into_existing() {
        let reconciler = NameReconciler::default();
        let existing = ["Vacio", "Asado"];

        assert_eq!(reconciler.reconcile("Vacío ", existing), "Vacio");
        assert_eq!(reconciler.reconcile("vacio", existing), "Vacio");
        assert_eq!(reconciler.reconcile("asadoo", existing), "Asado");
    }

    #[test]
    fn test_reconcile_keeps_new_names() {
        let reconciler = NameReconciler::default();
        let existing = ["Vacio", "Asado"];

        assert_eq!(reconciler.reconcile("Costilla", existing), "Costilla");
        assert_eq!(reconciler.reconcile(" matambre", existing), "Matambre");
    }

    #[test]
    fn test_reconcile_empty_catalog_seeds_new_entry() {
        let reconciler = NameReconciler::default();
        assert_eq!(reconciler.reconcile("vacio ", []), "Vacio");
    }

    #[test]
    fn test_reconcile_threshold_is_inclusive() {
        // "abcd" vs "abcde": 2*4/9 ≈ 0.888; with a threshold exactly at
        // that score the existing name must still win
        let score = similarity("Abcd", "Abcde");
        let reconciler = NameReconciler::new(score);
        assert_eq!(reconciler.reconcile("abcd", ["Abcde"]), "Abcde");
    }

    #[test]
    fn test_reconcile_ties_resolve_to_first_candidate() {
        let reconciler = NameReconciler::new(0.0);
        // Both candidates score identically against "Xy"
        assert_eq!(reconciler.reconcile("xy", ["Xa", "Xb"]), "Xa");
    }
}
