use order_pipeline::catalog::CatalogError;
use order_pipeline::config::PipelineConfig;
use order_pipeline::error::PipelineError;
use order_pipeline::lifecycle::OrderPipeline;
use order_pipeline::mock::RecordingSink;
use order_pipeline::report::{ConsoleReport, JsonReport};
use order_pipeline::source::SourceError;
use rust_decimal_macros::dec;
use std::path::PathBuf;
use tempfile::TempDir;

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

/// Full end-to-end run over the bundled JSON data set.
#[tokio::test]
async fn test_bundled_json_orders() {
    let config = PipelineConfig::from_data_dir(data_dir());
    let pipeline = OrderPipeline::from_config(&config).expect("Failed to build pipeline");

    let mut sink = RecordingSink::default();
    let stats = pipeline.run(&mut sink).await.expect("Run failed");

    assert_eq!(stats.lines, 8);
    assert_eq!(stats.accepted_orders, 3);
    assert_eq!(stats.rejected_orders, 2);
    assert_eq!(stats.rejected_rows, 0);

    assert_eq!(
        sink.errors,
        vec![
            "Order ORD1003: inconsistent delivery details".to_string(),
            "Order ORD1004: unknown product 'P999'".to_string(),
        ]
    );

    let report = sink.last_report().expect("Report not published");
    let ids: Vec<&str> = report.summaries.iter().map(|s| s.order_id.as_str()).collect();
    assert_eq!(ids, vec!["ORD1001", "ORD1002", "ORD1005"]);

    let first = &report.summaries[0];
    assert_eq!(first.items.len(), 2);
    assert_eq!(first.item("P001").unwrap().quantity, 2);
    assert_eq!(first.total_price, dec!(68.00));
    assert_eq!(report.grand_total, dec!(223.00));

    let totals = &report.ingredient_totals;
    assert_eq!(totals.get("Dough"), Some(dec!(1.75)));
    assert_eq!(totals.get("Mozzarella"), Some(dec!(6.90)));
    assert_eq!(totals.get("Tomato Sauce"), Some(dec!(11.00)));
    assert_eq!(totals.get("Pepperoni"), Some(dec!(0.80)));
    assert_eq!(totals.get("Peppers"), Some(dec!(1.05)));
    assert_eq!(totals.get("Mushrooms"), Some(dec!(0.90)));
    // Only rejected orders asked for these.
    assert_eq!(totals.get("Gorgonzola"), None);
    assert_eq!(totals.get("Fontina"), None);
}

/// The CSV override: row errors and validation errors both reach the sink.
#[tokio::test]
async fn test_bundled_csv_orders() {
    let config =
        PipelineConfig::from_data_dir(data_dir()).with_orders_path(data_dir().join("orders.csv"));
    let pipeline = OrderPipeline::from_config(&config).unwrap();

    let mut sink = RecordingSink::default();
    let stats = pipeline.run(&mut sink).await.unwrap();

    assert_eq!(stats.accepted_orders, 2);
    assert_eq!(stats.rejected_orders, 2);
    assert_eq!(stats.rejected_rows, 1);
    assert_eq!(
        sink.errors,
        vec![
            "Row 4: quantity 'two' is not an integer".to_string(),
            "Order ORD2002: quantity must be positive, got 0".to_string(),
            "Order ORD2004: delivery address is blank".to_string(),
        ]
    );

    let report = sink.last_report().unwrap();
    assert_eq!(report.summaries[0].total_price, dec!(88.50));
    assert_eq!(report.grand_total, dec!(116.50));
    assert_eq!(report.rejected_rows, 1);
    assert_eq!(report.ingredient_totals.get("Pepperoni"), Some(dec!(0.40)));
}

/// Same input twice gives the same report.
#[tokio::test]
async fn test_runs_are_repeatable() {
    let pipeline = OrderPipeline::from_config(&PipelineConfig::from_data_dir(data_dir())).unwrap();

    let mut first = RecordingSink::default();
    let mut second = RecordingSink::default();
    pipeline.run(&mut first).await.unwrap();
    pipeline.run(&mut second).await.unwrap();

    assert_eq!(first.errors, second.errors);
    assert_eq!(first.last_report(), second.last_report());
}

#[tokio::test]
async fn test_console_report_renders_bundled_data() {
    let pipeline = OrderPipeline::from_config(&PipelineConfig::from_data_dir(data_dir())).unwrap();

    let mut sink = ConsoleReport::new(Vec::new());
    pipeline.run(&mut sink).await.unwrap();
    assert_eq!(sink.error_count(), 2);

    let text = String::from_utf8(sink.into_inner()).unwrap();
    assert!(text.contains("ERROR: Order ORD1004: unknown product 'P999'"));
    assert!(text.contains("=== Orders (3) ==="));
    assert!(text.contains("Grand total: 223.00"));
    // ORD1005 delivers at 18:45, before ORD1002 at 19:00.
    assert!(text.find("Order ORD1005").unwrap() < text.find("Order ORD1002").unwrap());
}

#[tokio::test]
async fn test_json_report_file() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("report.json");
    let config = PipelineConfig::from_data_dir(data_dir()).with_json_output(&out);
    let pipeline = OrderPipeline::from_config(&config).unwrap();

    let mut sink = JsonReport::new(config.json_output.clone().unwrap());
    pipeline.run(&mut sink).await.unwrap();

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(written["summaries"].as_array().unwrap().len(), 3);
    assert_eq!(written["errors"].as_array().unwrap().len(), 2);
    assert_eq!(written["grand_total"], "223.00");
}

#[tokio::test]
async fn test_missing_catalog_is_fatal() {
    let dir = TempDir::new().unwrap();
    let config = PipelineConfig::from_data_dir(dir.path())
        .with_orders_path(data_dir().join("orders.json"));
    let pipeline = OrderPipeline::from_config(&config).unwrap();

    let mut sink = RecordingSink::default();
    let result = pipeline.run(&mut sink).await;

    assert!(matches!(
        result,
        Err(PipelineError::Catalog(CatalogError::Io { .. }))
    ));
    assert!(sink.reports.is_empty());
}

#[test]
fn test_unsupported_order_format_is_rejected_up_front() {
    let config = PipelineConfig::from_data_dir(data_dir()).with_orders_path("orders.xlsx");
    assert!(matches!(
        OrderPipeline::from_config(&config),
        Err(PipelineError::Source(SourceError::UnsupportedFormat(_)))
    ));
}

#[tokio::test]
async fn test_all_rows_dropped_is_fatal_after_reporting() {
    let dir = TempDir::new().unwrap();
    let orders = dir.path().join("orders.csv");
    std::fs::write(
        &orders,
        "orderId,productId,quantity,deliveryAt,createdAt,deliveryAddress\n\
         ORD1,P001,many,2024-03-15 18:00,2024-03-15 12:00,1 Main St\n",
    )
    .unwrap();
    let config = PipelineConfig::from_data_dir(data_dir()).with_orders_path(&orders);
    let pipeline = OrderPipeline::from_config(&config).unwrap();

    let mut sink = RecordingSink::default();
    let result = pipeline.run(&mut sink).await;

    assert!(matches!(
        result,
        Err(PipelineError::Source(SourceError::Empty(_)))
    ));
    assert_eq!(sink.errors, vec!["Row 1: quantity 'many' is not an integer".to_string()]);
}
