use async_trait::async_trait;

use crate::util;

/// Hydrators enrich candidates with derived data (e.g. reorder
/// recommendations) without changing which candidates exist.
#[async_trait]
pub trait Hydrator<Q, C>: Send + Sync
where
    Q: Clone + Send + Sync + 'static,
    C: Clone + Send + Sync + 'static,
{
    fn enable(&self, _query: &Q) -> bool {
        true
    }

    /// Return one hydrated candidate per input, in the same order.
    async fn hydrate(&self, query: &Q, candidates: &[C]) -> Result<Vec<C>, String>;

    /// Copy this hydrator's fields from `hydrated` into `candidate`.
    fn update(&self, candidate: &mut C, hydrated: C);

    fn name(&self) -> &str {
        util::short_type_name(std::any::type_name::<Self>())
    }
}
