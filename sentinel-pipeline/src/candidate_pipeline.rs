//! Generic staged candidate pipeline.
//!
//! Stage order:
//! 1. query hydrators resolve query defaults
//! 2. sources fetch candidates
//! 3. hydrators enrich candidates
//! 4. filters remove candidates (kept aside as `filtered_candidates`)
//! 5. scorers assign ranking scores
//! 6. the selector sorts and truncates
//! 7. post-selection hydrators enrich the survivors
//! 8. side effects run in the background
//!
//! A failing stage is logged and skipped; it never fails the request.

use std::sync::Arc;

use async_trait::async_trait;

use crate::filter::Filter;
use crate::hydrator::Hydrator;
use crate::query_hydrator::QueryHydrator;
use crate::scorer::Scorer;
use crate::selector::Selector;
use crate::side_effect::{SideEffect, SideEffectInput};
use crate::source::Source;
use crate::types::HasRequestId;

pub struct PipelineResult<Q, C> {
    pub query: Arc<Q>,
    /// Everything the sources returned, before hydration and filtering.
    pub retrieved_candidates: Vec<C>,
    /// Candidates removed by filters, in filter order.
    pub filtered_candidates: Vec<C>,
    pub selected_candidates: Vec<C>,
}

#[async_trait]
pub trait CandidatePipeline<Q, C>: Send + Sync
where
    Q: HasRequestId + Clone + Send + Sync + 'static,
    C: Clone + Send + Sync + 'static,
{
    fn query_hydrators(&self) -> &[Box<dyn QueryHydrator<Q>>];
    fn sources(&self) -> &[Box<dyn Source<Q, C>>];
    fn hydrators(&self) -> &[Box<dyn Hydrator<Q, C>>];
    fn filters(&self) -> &[Box<dyn Filter<Q, C>>];
    fn scorers(&self) -> &[Box<dyn Scorer<Q, C>>];
    fn selector(&self) -> &dyn Selector<Q, C>;
    fn post_selection_hydrators(&self) -> &[Box<dyn Hydrator<Q, C>>];
    fn side_effects(&self) -> Arc<Vec<Box<dyn SideEffect<Q, C>>>>;
    fn result_size(&self) -> usize;

    async fn execute(&self, query: Q) -> PipelineResult<Q, C> {
        let query = hydrate_query(self.query_hydrators(), query).await;
        let request_id = query.request_id().to_string();

        let retrieved = fetch_candidates(self.sources(), &query).await;
        let candidates = hydrate(self.hydrators(), &query, retrieved.clone()).await;
        let (kept, filtered) = filter(self.filters(), &query, candidates).await;
        let scored = score(self.scorers(), &query, kept).await;

        let selector = self.selector();
        let mut selected = if selector.enable(&query) {
            selector.select(&query, scored)
        } else {
            scored
        };
        selected.truncate(self.result_size());
        let selected = hydrate(self.post_selection_hydrators(), &query, selected).await;

        log::debug!(
            "request_id={} retrieved={} filtered={} selected={}",
            request_id,
            retrieved.len(),
            filtered.len(),
            selected.len()
        );

        let query = Arc::new(query);
        run_side_effects(
            self.side_effects(),
            Arc::new(SideEffectInput {
                query: Arc::clone(&query),
                selected_candidates: selected.clone(),
                removed_candidates: filtered.clone(),
            }),
        );

        PipelineResult {
            query,
            retrieved_candidates: retrieved,
            filtered_candidates: filtered,
            selected_candidates: selected,
        }
    }
}

async fn hydrate_query<Q>(hydrators: &[Box<dyn QueryHydrator<Q>>], mut query: Q) -> Q
where
    Q: HasRequestId + Clone + Send + Sync + 'static,
{
    for hydrator in hydrators {
        if !hydrator.enable(&query) {
            continue;
        }
        match hydrator.hydrate(&query).await {
            Ok(hydrated) => hydrator.update(&mut query, hydrated),
            Err(err) => log::warn!(
                "request_id={} query hydrator {} failed: {}",
                query.request_id(),
                hydrator.name(),
                err
            ),
        }
    }
    query
}

async fn fetch_candidates<Q, C>(sources: &[Box<dyn Source<Q, C>>], query: &Q) -> Vec<C>
where
    Q: HasRequestId + Clone + Send + Sync + 'static,
    C: Clone + Send + Sync + 'static,
{
    let mut candidates = Vec::new();
    for source in sources.iter().filter(|s| s.enable(query)) {
        match source.get_candidates(query).await {
            Ok(mut fetched) => candidates.append(&mut fetched),
            Err(err) => log::warn!(
                "request_id={} source {} failed: {}",
                query.request_id(),
                source.name(),
                err
            ),
        }
    }
    candidates
}

async fn hydrate<Q, C>(hydrators: &[Box<dyn Hydrator<Q, C>>], query: &Q, mut candidates: Vec<C>) -> Vec<C>
where
    Q: HasRequestId + Clone + Send + Sync + 'static,
    C: Clone + Send + Sync + 'static,
{
    for hydrator in hydrators.iter().filter(|h| h.enable(query)) {
        match hydrator.hydrate(query, &candidates).await {
            Ok(hydrated) if hydrated.len() == candidates.len() => {
                for (candidate, h) in candidates.iter_mut().zip(hydrated) {
                    hydrator.update(candidate, h);
                }
            }
            Ok(hydrated) => log::warn!(
                "request_id={} hydrator {} returned {} candidates, expected {}",
                query.request_id(),
                hydrator.name(),
                hydrated.len(),
                candidates.len()
            ),
            Err(err) => log::warn!(
                "request_id={} hydrator {} failed: {}",
                query.request_id(),
                hydrator.name(),
                err
            ),
        }
    }
    candidates
}

async fn filter<Q, C>(filters: &[Box<dyn Filter<Q, C>>], query: &Q, candidates: Vec<C>) -> (Vec<C>, Vec<C>)
where
    Q: HasRequestId + Clone + Send + Sync + 'static,
    C: Clone + Send + Sync + 'static,
{
    let mut kept = candidates;
    let mut removed = Vec::new();
    for f in filters.iter().filter(|f| f.enable(query)) {
        let backup = kept.clone();
        match f.filter(query, kept).await {
            Ok(result) => {
                kept = result.kept;
                removed.extend(result.removed);
            }
            Err(err) => {
                log::warn!(
                    "request_id={} filter {} failed: {}",
                    query.request_id(),
                    f.name(),
                    err
                );
                kept = backup;
            }
        }
    }
    (kept, removed)
}

async fn score<Q, C>(scorers: &[Box<dyn Scorer<Q, C>>], query: &Q, mut candidates: Vec<C>) -> Vec<C>
where
    Q: HasRequestId + Clone + Send + Sync + 'static,
    C: Clone + Send + Sync + 'static,
{
    for scorer in scorers.iter().filter(|s| s.enable(query)) {
        match scorer.score(query, &candidates).await {
            Ok(scored) if scored.len() == candidates.len() => {
                for (candidate, s) in candidates.iter_mut().zip(scored) {
                    scorer.update(candidate, s);
                }
            }
            Ok(scored) => log::warn!(
                "request_id={} scorer {} returned {} candidates, expected {}",
                query.request_id(),
                scorer.name(),
                scored.len(),
                candidates.len()
            ),
            Err(err) => log::warn!(
                "request_id={} scorer {} failed: {}",
                query.request_id(),
                scorer.name(),
                err
            ),
        }
    }
    candidates
}

fn run_side_effects<Q, C>(
    side_effects: Arc<Vec<Box<dyn SideEffect<Q, C>>>>,
    input: Arc<SideEffectInput<Q, C>>,
) where
    Q: HasRequestId + Clone + Send + Sync + 'static,
    C: Clone + Send + Sync + 'static,
{
    if side_effects.is_empty() {
        return;
    }
    tokio::spawn(async move {
        for effect in side_effects
            .iter()
            .filter(|e| e.enable(Arc::clone(&input.query)))
        {
            if let Err(err) = effect.run(Arc::clone(&input)).await {
                log::warn!(
                    "request_id={} side effect {} failed: {}",
                    input.query.request_id(),
                    effect.name(),
                    err
                );
            }
        }
    });
}
