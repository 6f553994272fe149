//! Quote payload from the Markit On Demand API and the report posted to Spark.
//!
//! Price and market cap are kept as `serde_json::Number` so they print exactly as
//! the API sent them (`31.5`, `160000000000`). Percentages are floats rendered
//! signed to two decimals.
use log::info;
use notifier_common::Result;
use notifier_common::http::ensure_success;
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::Number;

/// Quote endpoint; the symbol is passed as a query parameter.
pub const DEFAULT_QUOTE_URL: &str = "http://dev.markitondemand.com/MODApis/Api/v2/Quote/json";

const RULE: &str = "==============================";

/// Market data for one symbol.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StockQuote {
    /// Last traded price.
    pub last_price: Number,
    /// Change since the previous close, in percent.
    pub change_percent: f64,
    /// Change since the start of the year, in percent.
    #[serde(rename = "ChangePercentYTD")]
    pub change_percent_ytd: f64,
    /// Market capitalisation.
    pub market_cap: Number,
}

impl StockQuote {
    /// GETs and decodes the quote at `url`.
    pub fn fetch(client: &Client, url: &str) -> Result<Self> {
        info!("Fetching quote from {}", url);
        let response = ensure_success(client.get(url).send()?)?;
        let quote = serde_json::from_str(&response.text()?)?;
        Ok(quote)
    }
}

/// Full quote URL for `symbol`.
pub fn quote_url(base: &str, symbol: &str) -> String {
    format!("{}?symbol={}", base, symbol.trim().to_uppercase())
}

/// Fixed-template report for the chat room.
pub fn format_report(quote: &StockQuote, label: &str, source: &str) -> String {
    format!(
        "{rule}\n\
         Sharing Live {label} Stock Data\n\
         {rule}\n\
         Price: {}\n\
         Change in Percent Today: {:+.2}\n\
         Change in Percent YTD: {:+.2}\n\
         Market Cap: {:>3}\n\
         {rule}\n\
         Source: {}",
        quote.last_price,
        quote.change_percent,
        quote.change_percent_ytd,
        quote.market_cap.to_string(),
        source,
        rule = RULE,
        label = label,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{"Status":"SUCCESS","Name":"Cisco Systems Inc","Symbol":"CSCO","LastPrice":31.5,"Change":0.38,"ChangePercent":1.23,"ChangePercentYTD":-4.56,"MarketCap":160000000000,"Volume":1}"#;

    #[test]
    fn report_matches_template() {
        let quote: StockQuote = serde_json::from_str(SAMPLE).unwrap();
        let source = quote_url(DEFAULT_QUOTE_URL, "CSCO");
        assert_eq!(
            format_report(&quote, "Cisco", &source),
            "==============================\n\
             Sharing Live Cisco Stock Data\n\
             ==============================\n\
             Price: 31.5\n\
             Change in Percent Today: +1.23\n\
             Change in Percent YTD: -4.56\n\
             Market Cap: 160000000000\n\
             ==============================\n\
             Source: http://dev.markitondemand.com/MODApis/Api/v2/Quote/json?symbol=CSCO"
        );
    }

    #[test]
    fn small_market_cap_is_padded() {
        let quote: StockQuote = serde_json::from_str(
            r#"{"LastPrice":2,"ChangePercent":0,"ChangePercentYTD":10.005,"MarketCap":7}"#,
        )
        .unwrap();
        let report = format_report(&quote, "Tiny", "src");
        assert!(report.contains("Price: 2\n"));
        assert!(report.contains("Change in Percent Today: +0.00\n"));
        assert!(report.contains("Market Cap:   7\n"));
    }

    #[test]
    fn missing_field_is_rejected() {
        let err = serde_json::from_str::<StockQuote>(r#"{"LastPrice":1}"#);
        assert!(err.is_err());
    }

    #[test]
    fn symbol_is_normalised() {
        assert_eq!(quote_url("http://q", " csco "), "http://q?symbol=CSCO");
    }
}
