//! Pure pairwise collection comparison.

use std::collections::HashSet;

use affinity_core::{CompareResult, Item, OwnedCollection};

/// Computes the affinity between two owned collections.
///
/// The score combines the overlap ratio (`similarity`) with a
/// harmonic-mean-style `weight` that favors pairs of comparably sized
/// collections:
///
/// - `similarity = matches / (subject.count + peer.count)`
/// - `weight = 2 * subject.count * peer.count / (subject.count + peer.count)`
/// - `affinity = similarity * weight`
///
/// Matching items are enumerated in subject order, which keeps the output
/// deterministic. Two empty collections score 0 across the board.
///
/// When `include_items` is false the matching items are dropped from the
/// result; the count fields are always present.
pub fn compare(
    subject: &OwnedCollection,
    peer: &OwnedCollection,
    include_items: bool,
) -> CompareResult {
    let peer_items: HashSet<&Item> = peer.items.iter().collect();
    let matching_items: Vec<Item> = subject
        .items
        .iter()
        .filter(|item| peer_items.contains(*item))
        .cloned()
        .collect();
    let matches = matching_items.len();

    let mut result = CompareResult {
        subject_id: subject.owner_id.clone(),
        peer_id: peer.owner_id.clone(),
        peer_count: peer.count,
        matches,
        ..Default::default()
    };

    if subject.count > 0 {
        result.subject_ratio = matches as f64 / subject.count as f64;
    }
    if peer.count > 0 {
        result.peer_ratio = matches as f64 / peer.count as f64;
    }

    let denominator = subject.count + peer.count;
    if denominator > 0 {
        result.similarity = matches as f64 / denominator as f64;
        result.weight =
            (2.0 * subject.count as f64 * peer.count as f64) / denominator as f64;
        result.affinity = result.similarity * result.weight;
    }

    if include_items {
        result.matching_items = Some(matching_items);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn collection(owner: &str, ids: &[u64]) -> OwnedCollection {
        let items = ids
            .iter()
            .map(|&id| Item::new(id, format!("game-{id}")))
            .collect();
        OwnedCollection::new(owner, items)
    }

    #[test]
    fn test_concrete_scenario() {
        // subject {A, B, C}, peer {B, C, D}
        let subject = collection("subject", &[1, 2, 3]);
        let peer = collection("peer", &[2, 3, 4]);

        let result = compare(&subject, &peer, false);

        assert_eq!(result.matches, 2);
        assert!((result.similarity - 2.0 / 6.0).abs() < EPSILON);
        assert!((result.weight - 3.0).abs() < EPSILON);
        assert!((result.affinity - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_matches_symmetric() {
        let a = collection("a", &[1, 2, 3, 4]);
        let b = collection("b", &[3, 4, 5]);

        assert_eq!(compare(&a, &b, false).matches, compare(&b, &a, false).matches);
    }

    #[test]
    fn test_both_empty_scores_zero() {
        let a = collection("a", &[]);
        let b = collection("b", &[]);

        let result = compare(&a, &b, true);

        assert_eq!(result.matches, 0);
        assert_eq!(result.similarity, 0.0);
        assert_eq!(result.weight, 0.0);
        assert_eq!(result.affinity, 0.0);
        assert_eq!(result.subject_ratio, 0.0);
        assert_eq!(result.peer_ratio, 0.0);
        assert_eq!(result.matching_items, Some(vec![]));
    }

    #[test]
    fn test_one_empty_scores_zero() {
        let a = collection("a", &[1, 2]);
        let b = collection("b", &[]);

        let result = compare(&a, &b, false);

        assert_eq!(result.matches, 0);
        assert_eq!(result.affinity, 0.0);
        // Denominator is nonzero, so weight is still 0 through the product
        assert_eq!(result.weight, 0.0);
    }

    #[test]
    fn test_items_in_subject_order() {
        let subject = collection("subject", &[9, 3, 7, 1]);
        let peer = collection("peer", &[1, 3, 9]);

        let result = compare(&subject, &peer, true);

        let ids: Vec<u64> = result
            .matching_items
            .unwrap()
            .iter()
            .map(|item| item.id)
            .collect();
        assert_eq!(ids, vec![9, 3, 1]);
    }

    #[test]
    fn test_items_omitted_by_default() {
        let subject = collection("subject", &[1, 2]);
        let peer = collection("peer", &[1]);

        let result = compare(&subject, &peer, false);

        assert!(result.matching_items.is_none());
        assert_eq!(result.matches, 1);
    }

    #[test]
    fn test_ratios_use_reported_counts() {
        // The upstream can report a larger count than the items it details
        let subject = OwnedCollection::with_count(
            "subject",
            10,
            vec![Item::new(1, "a"), Item::new(2, "b")],
        );
        let peer = collection("peer", &[1, 2]);

        let result = compare(&subject, &peer, false);

        assert_eq!(result.matches, 2);
        assert!((result.subject_ratio - 0.2).abs() < EPSILON);
        assert!((result.peer_ratio - 1.0).abs() < EPSILON);
        assert!((result.similarity - 2.0 / 12.0).abs() < EPSILON);
    }

    #[test]
    fn test_identical_items_different_names_do_not_match() {
        let subject = OwnedCollection::new("subject", vec![Item::new(1, "alpha")]);
        let peer = OwnedCollection::new("peer", vec![Item::new(1, "beta")]);

        // Whole-item equality, as the original compares full game entries
        assert_eq!(compare(&subject, &peer, false).matches, 0);
    }
}
