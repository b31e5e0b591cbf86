use std::cmp::Ordering;

use crate::util;

/// Selectors order and truncate candidates after scoring.
pub trait Selector<Q, C>: Send + Sync
where
    Q: Clone + Send + Sync + 'static,
    C: Clone + Send + Sync + 'static,
{
    /// Sort, then truncate to `size()` when set.
    fn select(&self, _query: &Q, candidates: Vec<C>) -> Vec<C> {
        let mut sorted = self.sort(candidates);
        if let Some(limit) = self.size() {
            sorted.truncate(limit);
        }
        sorted
    }

    fn enable(&self, _query: &Q) -> bool {
        true
    }

    /// Score used for ordering; higher sorts first.
    fn score(&self, candidate: &C) -> f64;

    /// Ordering between candidates with equal scores. The sort is stable,
    /// so the default keeps source order.
    fn tie_break(&self, _a: &C, _b: &C) -> Ordering {
        Ordering::Equal
    }

    /// Descending by score. NaN scores sink to the end.
    fn sort(&self, candidates: Vec<C>) -> Vec<C> {
        let mut sorted = candidates;
        sorted.sort_by(|a, b| {
            let (sa, sb) = (self.score(a), self.score(b));
            let by_score = match (sa.is_nan(), sb.is_nan()) {
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                (false, false) => sb.total_cmp(&sa),
            };
            by_score.then_with(|| self.tie_break(a, b))
        });
        sorted
    }

    /// Maximum number of candidates to keep. `None` keeps all.
    fn size(&self) -> Option<usize> {
        None
    }

    fn name(&self) -> &str {
        util::short_type_name(std::any::type_name::<Self>())
    }
}
