use async_trait::async_trait;
use chrono::{NaiveDate, Utc};

use crate::query_hydrator::QueryHydrator;
use crate::types::ProductQuery;

/// Fills a missing report date and window length.
///
/// The report date defaults to the current UTC day, so the sales window
/// ends yesterday. A fixed `today` can be injected for reproducible runs.
pub struct ReportDateQueryHydrator {
    pub default_window_days: i64,
    pub today: Option<NaiveDate>,
}

impl ReportDateQueryHydrator {
    pub fn new(default_window_days: i64) -> Self {
        Self {
            default_window_days,
            today: None,
        }
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Utc::now().date_naive())
    }
}

#[async_trait]
impl QueryHydrator<ProductQuery> for ReportDateQueryHydrator {
    fn enable(&self, query: &ProductQuery) -> bool {
        query.report_date.is_none() || query.window_days.is_none()
    }

    async fn hydrate(&self, query: &ProductQuery) -> Result<ProductQuery, String> {
        Ok(ProductQuery {
            report_date: Some(query.report_date.unwrap_or_else(|| self.today())),
            window_days: Some(query.window_days.unwrap_or(self.default_window_days)),
            ..query.clone()
        })
    }

    fn update(&self, query: &mut ProductQuery, hydrated: ProductQuery) {
        query.report_date = hydrated.report_date;
        query.window_days = hydrated.window_days;
    }
}
