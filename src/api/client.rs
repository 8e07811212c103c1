use super::models::QuoteResponse;
use thiserror::Error;
use tracing::{info, warn};

pub const DEFAULT_ENDPOINT: &str = "https://api.hypixel.net/v2/skyblock/bazaar";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Unexpected HTTP status: {0}")]
    Status(u16),
    #[error("API unavailable: {0}")]
    ApiUnavailable(String),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Fetches the live quote set once. Any failure is final for the session.
pub async fn fetch_quotes(endpoint: &str) -> Result<QuoteResponse, ApiError> {
    let resp = reqwest::Client::new().get(endpoint).send().await?;
    let status = resp.status();

    if !status.is_success() {
        warn!(status = status.as_u16(), "quote fetch rejected");
        return Err(ApiError::Status(status.as_u16()));
    }

    let body = resp.text().await?;
    let response = parse_response(&body)?;
    info!(
        products = response.products.len(),
        last_updated = response.last_updated,
        "quotes loaded"
    );
    Ok(response)
}

pub fn parse_response(body: &str) -> Result<QuoteResponse, ApiError> {
    let response: QuoteResponse = serde_json::from_str(body)?;

    if !response.success {
        return Err(ApiError::ApiUnavailable(
            response.cause.unwrap_or_else(|| "Unknown error".to_string()),
        ));
    }

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"{
        "success": true,
        "lastUpdated": 1718000000000,
        "products": {
            "WHEAT": {
                "product_id": "WHEAT",
                "sell_summary": [
                    {"amount": 71000, "pricePerUnit": 5.1, "orders": 2},
                    {"amount": 1000, "pricePerUnit": 5.0, "orders": 1}
                ],
                "buy_summary": [
                    {"amount": 5000, "pricePerUnit": 6.3, "orders": 4}
                ],
                "quick_status": {
                    "productId": "WHEAT",
                    "sellPrice": 5.1, "sellVolume": 72000, "sellMovingWeek": 9000000, "sellOrders": 3,
                    "buyPrice": 6.3, "buyVolume": 5000, "buyMovingWeek": 8000000, "buyOrders": 4
                }
            }
        }
    }"#;

    #[test]
    fn parses_products() {
        let r = parse_response(BODY).unwrap();
        assert_eq!(r.last_updated, 1718000000000);
        let wheat = &r.products["WHEAT"];
        assert_eq!(wheat.sell_summary.len(), 2);
        assert_eq!(wheat.sell_summary[0].price_per_unit, 5.1);
        assert_eq!(wheat.buy_summary[0].orders, 4);
        assert_eq!(wheat.quick_status.buy_moving_week, 8_000_000);
        assert_eq!(wheat.unit_buy_price(), 6.3);
    }

    #[test]
    fn unsuccessful_response_is_an_error() {
        let err = parse_response(r#"{"success": false, "cause": "Key throttled"}"#).unwrap_err();
        match err {
            ApiError::ApiUnavailable(cause) => assert_eq!(cause, "Key throttled"),
            other => panic!("unexpected {other}"),
        }
        let err = parse_response(r#"{"success": false}"#).unwrap_err();
        assert_eq!(err.to_string(), "API unavailable: Unknown error");
    }

    #[test]
    fn malformed_body_is_parse_error() {
        assert!(matches!(parse_response("<html>"), Err(ApiError::Parse(_))));
    }
}
