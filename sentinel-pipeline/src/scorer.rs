use async_trait::async_trait;

use crate::util;

/// Scorers assign ranking scores. Like hydrators, they return one
/// candidate per input and only their own fields are copied back.
#[async_trait]
pub trait Scorer<Q, C>: Send + Sync
where
    Q: Clone + Send + Sync + 'static,
    C: Clone + Send + Sync + 'static,
{
    fn enable(&self, _query: &Q) -> bool {
        true
    }

    async fn score(&self, query: &Q, candidates: &[C]) -> Result<Vec<C>, String>;

    fn update(&self, candidate: &mut C, scored: C);

    fn name(&self) -> &str {
        util::short_type_name(std::any::type_name::<Self>())
    }
}
