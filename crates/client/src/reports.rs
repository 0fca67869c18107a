//! Report endpoints.
//!
//! Reports are rendered elsewhere (PDF/CSV mechanics are out of scope);
//! this module only carries the request contract -- endpoint plus an
//! optional date range -- and hands back the raw JSON payload.

use chrono::NaiveDate;

use crate::api::ApiClient;
use crate::error::ApiResult;

/// Optional date-range filter for report endpoints.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl ReportRange {
    /// Render the range as a query string (`?from=...&to=...`), empty
    /// when no bound is set.
    pub fn to_query(&self) -> String {
        let mut params = Vec::new();
        if let Some(from) = self.from {
            params.push(format!("from={from}"));
        }
        if let Some(to) = self.to {
            params.push(format!("to={to}"));
        }
        if params.is_empty() {
            String::new()
        } else {
            format!("?{}", params.join("&"))
        }
    }
}

impl ApiClient {
    /// `GET /api/reports/stock[?from=&to=]`
    pub async fn stock_report(&self, range: ReportRange) -> ApiResult<serde_json::Value> {
        self.get_json(&format!("reports/stock{}", range.to_query()))
            .await
    }

    /// `GET /api/reports/products[?from=&to=]`
    pub async fn product_report(&self, range: ReportRange) -> ApiResult<serde_json::Value> {
        self.get_json(&format!("reports/products{}", range.to_query()))
            .await
    }

    /// `GET /api/reports/inventories[?from=&to=]`
    pub async fn inventory_report(&self, range: ReportRange) -> ApiResult<serde_json::Value> {
        self.get_json(&format!("reports/inventories{}", range.to_query()))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_range_yields_no_query_string() {
        assert_eq!(ReportRange::default().to_query(), "");
    }

    #[test]
    fn full_range_renders_both_bounds() {
        let range = ReportRange {
            from: NaiveDate::from_ymd_opt(2026, 1, 1),
            to: NaiveDate::from_ymd_opt(2026, 1, 31),
        };
        assert_eq!(range.to_query(), "?from=2026-01-01&to=2026-01-31");
    }

    #[test]
    fn half_open_range_renders_one_bound() {
        let range = ReportRange {
            from: NaiveDate::from_ymd_opt(2026, 1, 1),
            to: None,
        };
        assert_eq!(range.to_query(), "?from=2026-01-01");
    }
}
