use std::sync::Arc;

use chrono::NaiveDate;

use sentinel_pipeline::event_loader::load_events;
use sentinel_pipeline::inventory_loader::load_inventory;
use sentinel_pipeline::{
    InventorySnapshot, ProductAnalyticsPipeline, ProductListPipeline, ProductQuery,
};
use sentinel_velocity::aggregator::aggregate;
use sentinel_velocity::batch::classify_batch;
use sentinel_velocity::types::{
    DailySalesRecord, LegacyStockStatus, Severity, StockPosition, StockStatus,
};
use sentinel_velocity::{ForecastConfig, VelocityError};

// ---------------------------------------------------------------------------
// Test data fixtures
// ---------------------------------------------------------------------------

const INVENTORY_CSV: &str = "\
product_id,name,brand,category,current_stock,allocated_stock,reorder_level,lead_time_days
STEADY,Oishi Prawn Crackers,Oishi,SNACKS,5,0,,
CRIT,Coca-Cola 1.5L,Coca-Cola,SOFTDRINKS,20,4,12,
CRIT21,Sprite 1.5L,Coca-Cola,SOFTDRINKS,21,0,,
LOWP,Lucky Me Pancit Canton,Lucky Me,INSTANT_NOODLES,70,0,,5
HEALTH80,Nissin Cup Noodles,Nissin,INSTANT_NOODLES,80,0,,
EMPTY,Bear Brand 300g,Nestle,MILK,0,0,,
DUST,Tang Orange 25g,Tang,POWDERED_DRINKS,40,0,,
NEG,Broken Row,,,-1,0,,
";

fn day(month: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, month, d).unwrap()
}

/// Report date. The default 30-day window covers March 1..=30.
fn today() -> NaiveDate {
    day(3, 31)
}

fn daily(id: &str, quantity: u64, days: std::ops::RangeInclusive<u32>) -> Vec<DailySalesRecord> {
    days.map(|d| DailySalesRecord {
        product_id: id.into(),
        date: day(3, d),
        quantity_sold: quantity,
    })
    .collect()
}

fn sample_sales() -> Vec<DailySalesRecord> {
    let mut sales = Vec::new();
    // 6 units over the window -> 0.2/day
    sales.extend(daily("STEADY", 1, 5..=10));
    for id in ["CRIT", "CRIT21", "LOWP", "HEALTH80"] {
        sales.extend(daily(id, 10, 1..=30));
    }
    // Outside the window on both ends
    sales.push(DailySalesRecord {
        product_id: "CRIT".into(),
        date: day(2, 28),
        quantity_sold: 500,
    });
    sales.push(DailySalesRecord {
        product_id: "CRIT".into(),
        date: today(),
        quantity_sold: 500,
    });
    sales
}

fn snapshot_with_events(events_csv: Option<&str>) -> Arc<InventorySnapshot> {
    let inventory = load_inventory(INVENTORY_CSV.as_bytes()).unwrap();
    let events = match events_csv {
        Some(csv) => load_events(csv.as_bytes()).unwrap(),
        None => Vec::new(),
    };
    Arc::new(InventorySnapshot::new(inventory, sample_sales(), events, 10).unwrap())
}

fn snapshot() -> Arc<InventorySnapshot> {
    snapshot_with_events(None)
}

fn list_query() -> ProductQuery {
    ProductQuery {
        report_date: Some(today()),
        ..ProductQuery::new("req-list")
    }
}

fn ids(products: &[sentinel_pipeline::ProductCandidate]) -> Vec<&str> {
    products.iter().map(|c| c.product_id.as_str()).collect()
}

// ---------------------------------------------------------------------------
// Cross-consistency between call sites
// ---------------------------------------------------------------------------

#[tokio::test]
async fn batch_list_and_analytics_agree() {
    let snapshot = snapshot();
    let config = ForecastConfig::default();

    let profile = aggregate(&snapshot.sales, "STEADY", 30, today()).unwrap();
    assert_eq!(profile.daily_velocity, 0.2);
    let batch = classify_batch(&[StockPosition::new("STEADY", 5, 0)], &[profile]);
    let from_batch = batch.result_for("STEADY").unwrap();
    assert_eq!(
        (from_batch.days_of_stock, from_batch.status),
        (25, StockStatus::Healthy)
    );

    let list = ProductListPipeline::new(Arc::clone(&snapshot), config.clone())
        .list(list_query())
        .await
        .unwrap();
    let from_list = list
        .products
        .iter()
        .find(|c| c.product_id == "STEADY")
        .and_then(|c| c.classification.clone())
        .unwrap();

    let analysis = ProductAnalyticsPipeline::new(snapshot, config)
        .analyze("STEADY", Some(today()))
        .await
        .unwrap();

    assert_eq!(&from_list, from_batch);
    assert_eq!(&analysis.classification, from_batch);
}

#[tokio::test]
async fn every_product_agrees_across_views() {
    let snapshot = snapshot();
    let config = ForecastConfig::default();
    let list = ProductListPipeline::new(Arc::clone(&snapshot), config.clone())
        .list(list_query())
        .await
        .unwrap();
    let analytics = ProductAnalyticsPipeline::new(snapshot, config);

    for product in &list.products {
        let analysis = analytics
            .analyze(&product.product_id, Some(today()))
            .await
            .unwrap();
        assert_eq!(Some(&analysis.classification), product.classification.as_ref());
        assert_eq!(Some(&analysis.recommendation), product.recommendation.as_ref());
    }
}

// ---------------------------------------------------------------------------
// Product list
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_sorts_by_urgency_and_reports_failures() {
    let pipeline = ProductListPipeline::new(snapshot(), ForecastConfig::default());
    let response = pipeline.list(list_query()).await.unwrap();

    assert_eq!(response.report_date, Some(today()));
    assert_eq!(response.window_days, Some(30));
    assert_eq!(
        ids(&response.products),
        vec!["EMPTY", "CRIT", "CRIT21", "LOWP", "DUST", "HEALTH80", "STEADY"]
    );

    assert_eq!(response.failures.len(), 1);
    assert_eq!(response.failures[0].product_id, "NEG");
    assert!(matches!(
        response.failures[0].error,
        VelocityError::InvalidStock {
            field: "current_stock",
            value: -1,
            ..
        }
    ));
}

#[tokio::test]
async fn list_classifies_at_the_boundaries() {
    let response = ProductListPipeline::new(snapshot(), ForecastConfig::default())
        .list(list_query())
        .await
        .unwrap();
    let status = |id: &str| {
        let c = response
            .products
            .iter()
            .find(|c| c.product_id == id)
            .and_then(|c| c.classification.clone())
            .unwrap();
        (c.days_of_stock, c.status)
    };

    // Sales outside the window do not move CRIT off 10/day.
    assert_eq!(status("CRIT"), (2, StockStatus::Critical));
    assert_eq!(status("CRIT21"), (2, StockStatus::Critical));
    assert_eq!(status("LOWP"), (7, StockStatus::Low));
    assert_eq!(status("HEALTH80"), (8, StockStatus::Healthy));
    assert_eq!(status("EMPTY"), (0, StockStatus::OutOfStock));
    assert_eq!(status("DUST"), (999, StockStatus::DeadStock));
}

#[tokio::test]
async fn list_summary_rolls_up_returned_products() {
    let response = ProductListPipeline::new(snapshot(), ForecastConfig::default())
        .list(list_query())
        .await
        .unwrap();
    let summary = &response.summary;

    assert_eq!(summary.total_products, 7);
    assert_eq!(summary.failures, 1);
    assert_eq!(summary.count(StockStatus::OutOfStock), 1);
    assert_eq!(summary.count(StockStatus::Critical), 2);
    assert_eq!(summary.count(StockStatus::Low), 1);
    assert_eq!(summary.count(StockStatus::DeadStock), 1);
    assert_eq!(summary.count(StockStatus::Healthy), 2);
    assert_eq!(summary.needs_reorder, vec!["EMPTY", "CRIT", "CRIT21", "LOWP"]);
    // CRIT 80 + CRIT21 79 + LOWP 10 + HEALTH80 20
    assert_eq!(summary.total_recommended_units, 189);
}

#[tokio::test]
async fn list_honors_status_filter_and_top_k() {
    let query = ProductQuery {
        status_filter: Some(vec![StockStatus::DeadStock, StockStatus::Healthy]),
        ..list_query()
    };
    let response = ProductListPipeline::new(snapshot(), ForecastConfig::default())
        .list(query)
        .await
        .unwrap();
    assert_eq!(ids(&response.products), vec!["DUST", "HEALTH80", "STEADY"]);
    // Products filtered by tier are not failures.
    assert_eq!(response.failures.len(), 1);

    let response =
        ProductListPipeline::with_top_k(snapshot(), ForecastConfig::default(), Some(2))
            .list(list_query())
            .await
            .unwrap();
    assert_eq!(ids(&response.products), vec!["EMPTY", "CRIT"]);
    assert_eq!(response.summary.total_products, 2);
}

#[tokio::test]
async fn list_restricted_to_requested_products() {
    let query = ProductQuery {
        report_date: Some(today()),
        ..ProductQuery::for_products("req-some", ["STEADY", "GHOST"])
    };
    let response = ProductListPipeline::new(snapshot(), ForecastConfig::default())
        .list(query)
        .await
        .unwrap();
    assert_eq!(ids(&response.products), vec!["STEADY"]);
    assert_eq!(
        response.failures[0].error,
        VelocityError::MissingProduct("GHOST".into())
    );
}

#[tokio::test]
async fn list_uses_injected_today_when_query_has_none() {
    let pipeline =
        ProductListPipeline::with_today(snapshot(), ForecastConfig::default(), today());
    let response = pipeline.list(ProductQuery::new("req-today")).await.unwrap();
    assert_eq!(response.report_date, Some(today()));
    assert_eq!(response.products.len(), 7);
}

#[tokio::test]
async fn list_rejects_non_positive_window() {
    let query = ProductQuery {
        window_days: Some(0),
        ..list_query()
    };
    let err = ProductListPipeline::new(snapshot(), ForecastConfig::default())
        .list(query)
        .await
        .unwrap_err();
    assert_eq!(err, VelocityError::InvalidWindow { window_days: 0 });
}

#[tokio::test]
async fn list_rejects_window_past_the_calendar() {
    let query = ProductQuery {
        window_days: Some(1_000_000_000),
        ..list_query()
    };
    let err = ProductListPipeline::new(snapshot(), ForecastConfig::default())
        .list(query)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        VelocityError::InvalidWindow {
            window_days: 1_000_000_000
        }
    );
}

#[tokio::test]
async fn list_response_serializes_for_the_dashboard() {
    let response = ProductListPipeline::new(snapshot(), ForecastConfig::default())
        .list(list_query())
        .await
        .unwrap();
    let json = serde_json::to_value(&response).unwrap();

    assert_eq!(json["products"][0]["classification"]["status"], "OUT_OF_STOCK");
    assert_eq!(json["summary"]["counts"]["CRITICAL"], 2);
    assert!(json["failures"][0]["error"]
        .as_str()
        .unwrap()
        .contains("current_stock"));
}

// ---------------------------------------------------------------------------
// Product analytics
// ---------------------------------------------------------------------------

#[tokio::test]
async fn analytics_attaches_reorder_recommendation() {
    let pipeline = ProductAnalyticsPipeline::new(snapshot(), ForecastConfig::default());
    let analysis = pipeline.analyze("CRIT", Some(today())).await.unwrap();

    assert_eq!(analysis.name, "Coca-Cola 1.5L");
    assert_eq!(analysis.profile.total_units_sold_in_window, 300);
    assert_eq!(analysis.resolved.available_stock, 16);
    assert_eq!(analysis.resolved.legacy_status, LegacyStockStatus::InStock);

    let rec = &analysis.recommendation;
    // 10/day * (7 default lead + 3 buffer) = 100, 20 on hand
    assert_eq!(rec.forecasted_need, 100);
    assert_eq!(rec.recommended_quantity, 80);
    assert_eq!(rec.lead_time_days, 7);
    assert_eq!(rec.severity, Severity::Urgent);
    assert_eq!(rec.narrative_status, "Stock will run out soon. Reorder now.");
}

#[tokio::test]
async fn analytics_uses_lead_time_on_file() {
    let analysis = ProductAnalyticsPipeline::new(snapshot(), ForecastConfig::default())
        .analyze("LOWP", Some(today()))
        .await
        .unwrap();
    let rec = &analysis.recommendation;
    assert_eq!(rec.lead_time_days, 5);
    assert_eq!((rec.forecasted_need, rec.recommended_quantity), (80, 10));
    assert_eq!(rec.severity, Severity::Warning);
}

#[tokio::test]
async fn analytics_compounds_demand_events() {
    let events = "\
name,source,start_date,end_date,multiplier,affected_brand,affected_barcodes
Oishi TV Blitz,MANUFACTURER_CAMPAIGN,2025-03-25,2025-04-05,1.5,oishi,
Holy Week,HOLIDAY,2025-03-30,2025-04-02,2.0,,
Old Promo,STORE_DISCOUNT,2025-02-01,2025-02-07,4.0,,STEADY
";
    let analysis = ProductAnalyticsPipeline::new(
        snapshot_with_events(Some(events)),
        ForecastConfig::default(),
    )
    .analyze("STEADY", Some(today()))
    .await
    .unwrap();

    let adjustment = analysis.adjustment.unwrap();
    assert_eq!(adjustment.combined_multiplier, 3.0);
    assert_eq!(adjustment.applied_event_ids, vec!["event-2", "event-3"]);
    // 5 / 0.6 -> 8 days
    assert_eq!(analysis.classification.days_of_stock, 8);
    assert_eq!(analysis.classification.status, StockStatus::Healthy);
}

#[tokio::test]
async fn analytics_can_ignore_demand_events() {
    let events = "\
name,source,start_date,end_date,multiplier,affected_brand,affected_barcodes
Holy Week,HOLIDAY,2025-03-30,2025-04-02,2.0,,
";
    let config = ForecastConfig {
        apply_demand_events: false,
        ..ForecastConfig::default()
    };
    let analysis = ProductAnalyticsPipeline::new(snapshot_with_events(Some(events)), config)
        .analyze("STEADY", Some(today()))
        .await
        .unwrap();
    assert!(analysis.adjustment.is_none());
    assert_eq!(analysis.classification.days_of_stock, 25);
}

#[tokio::test]
async fn analytics_reports_product_errors() {
    let pipeline = ProductAnalyticsPipeline::new(snapshot(), ForecastConfig::default());

    let err = pipeline.analyze("GHOST", Some(today())).await.unwrap_err();
    assert_eq!(err, VelocityError::MissingProduct("GHOST".into()));

    let err = pipeline.analyze("NEG", Some(today())).await.unwrap_err();
    assert!(matches!(err, VelocityError::InvalidStock { value: -1, .. }));
}

#[tokio::test]
async fn analytics_rejects_non_positive_window() {
    let config = ForecastConfig {
        window_days: -3,
        ..ForecastConfig::default()
    };
    let err = ProductAnalyticsPipeline::new(snapshot(), config)
        .analyze("STEADY", Some(today()))
        .await
        .unwrap_err();
    assert_eq!(err, VelocityError::InvalidWindow { window_days: -3 });

    let config = ForecastConfig {
        window_days: i64::MAX,
        ..ForecastConfig::default()
    };
    let err = ProductAnalyticsPipeline::new(snapshot(), config)
        .analyze("STEADY", Some(today()))
        .await
        .unwrap_err();
    assert_eq!(err, VelocityError::InvalidWindow { window_days: i64::MAX });
}
