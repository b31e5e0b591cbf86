use std::cmp::Ordering;

use crate::selector::Selector;
use crate::types::{ProductCandidate, ProductQuery};

/// Orders candidates most urgent first, ties broken by product id, and
/// keeps the top `k` when set.
#[derive(Default)]
pub struct UrgencySelector {
    pub k: Option<usize>,
}

impl UrgencySelector {
    pub fn top(k: usize) -> Self {
        Self { k: Some(k) }
    }
}

impl Selector<ProductQuery, ProductCandidate> for UrgencySelector {
    fn score(&self, candidate: &ProductCandidate) -> f64 {
        candidate.urgency_score.unwrap_or(f64::NEG_INFINITY)
    }

    fn tie_break(&self, a: &ProductCandidate, b: &ProductCandidate) -> Ordering {
        a.product_id.cmp(&b.product_id)
    }

    fn size(&self) -> Option<usize> {
        self.k
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(id: &str, score: Option<f64>) -> ProductCandidate {
        ProductCandidate {
            product_id: id.into(),
            urgency_score: score,
            ..ProductCandidate::default()
        }
    }

    #[test]
    fn most_urgent_first_with_stable_ties() {
        let selector = UrgencySelector::default();
        let selected = selector.select(
            &ProductQuery::new("req"),
            vec![
                scored("C", Some(1.0)),
                scored("Z", None),
                scored("B", Some(5.5)),
                scored("A", Some(1.0)),
            ],
        );
        let ids: Vec<&str> = selected.iter().map(|c| c.product_id.as_str()).collect();
        assert_eq!(ids, vec!["B", "A", "C", "Z"]);
    }

    #[test]
    fn truncates_to_k() {
        let selector = UrgencySelector::top(1);
        let selected = selector.select(
            &ProductQuery::new("req"),
            vec![scored("A", Some(1.0)), scored("B", Some(4.2))],
        );
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].product_id, "B");
    }
}
