//! # Report Module
//!
//! Pure data shaping for the delivery collaborators: the tabular stock report
//! the PDF renderer consumes, and the label/value series behind the dashboard
//! charts.
//!
//! The renderers themselves (PDF layout, chart.js, ...) live outside this
//! crate; they take the rows produced here and never reach back into the
//! store.

use serde::{Deserialize, Serialize};

use crate::types::Product;

// =============================================================================
// Stock Report
// =============================================================================

/// A tabular report: one header row plus one data row per product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockReport {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Builds the product-stock table handed to the PDF renderer.
///
/// ## Example
/// ```rust
/// use stockroom_core::report::stock_report;
///
/// let report = stock_report(&[]);
/// assert_eq!(report.header.len(), 5);
/// assert!(report.rows.is_empty());
/// ```
pub fn stock_report(products: &[Product]) -> StockReport {
    let header = vec![
        "Name".to_string(),
        "Description".to_string(),
        "Unit price".to_string(),
        "Quantity on hand".to_string(),
        "Total price".to_string(),
    ];

    let rows = products
        .iter()
        .map(|p| {
            vec![
                p.name.clone(),
                p.description.clone(),
                p.unit_price().to_string(),
                p.quantity_on_hand.to_string(),
                p.total_price().to_string(),
            ]
        })
        .collect();

    StockReport { header, rows }
}

// =============================================================================
// Chart Series
// =============================================================================

/// A label/value series for the dashboard pie and bar charts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<i64>,
}

impl ChartSeries {
    /// True when there is nothing to chart.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Builds the on-hand-quantity-per-product series the dashboard charts plot.
pub fn stock_levels(products: &[Product]) -> ChartSeries {
    let labels = products.iter().map(|p| p.name.clone()).collect();
    let values = products.iter().map(|p| p.quantity_on_hand).collect();

    ChartSeries { labels, values }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn product(name: &str, unit_price_cents: i64, quantity_on_hand: i64) -> Product {
        let now = Utc::now();
        let mut p = Product {
            id: format!("p-{name}"),
            name: name.to_string(),
            description: "test".to_string(),
            unit_price_cents,
            quantity_on_hand,
            total_price_cents: 0,
            image_path: None,
            created_at: now,
            updated_at: now,
        };
        p.recompute_total_price();
        p
    }

    #[test]
    fn test_stock_report_empty() {
        let report = stock_report(&[]);
        assert_eq!(
            report.header,
            vec![
                "Name",
                "Description",
                "Unit price",
                "Quantity on hand",
                "Total price"
            ]
        );
        assert!(report.rows.is_empty());
    }

    #[test]
    fn test_stock_report_rows() {
        let products = vec![product("Staplers", 1250, 4), product("Tape", 99, 0)];
        let report = stock_report(&products);

        assert_eq!(report.rows.len(), 2);
        assert_eq!(
            report.rows[0],
            vec!["Staplers", "test", "$12.50", "4", "$50.00"]
        );
        assert_eq!(report.rows[1], vec!["Tape", "test", "$0.99", "0", "$0.00"]);
    }

    #[test]
    fn test_stock_levels_series() {
        let products = vec![product("A", 100, 7), product("B", 100, 0)];
        let series = stock_levels(&products);

        assert_eq!(series.labels, vec!["A", "B"]);
        assert_eq!(series.values, vec![7, 0]);
        assert!(!series.is_empty());
        assert!(stock_levels(&[]).is_empty());
    }
}
