pub mod classification_log_side_effect;
pub mod failed_product_filter;
pub mod forecast_source;
pub mod reorder_hydrator;
pub mod report_date_query_hydrator;
pub mod status_filter;
pub mod urgency_scorer;
pub mod urgency_selector;
