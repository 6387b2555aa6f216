//! CSV export of the visible holdings.

use std::io::Write;

use crate::error::{PortfolioError, PortfolioResult};
use crate::types::Holding;

/// Header row of the holdings export.
pub const HOLDINGS_HEADER: [&str; 11] = [
    "Portfolio",
    "Security Name",
    "Ticker",
    "ISIN",
    "Asset Class",
    "Position Size",
    "Weight %",
    "Rating",
    "Country",
    "Region",
    "Sector",
];

/// Download file name for a portfolio export.
#[must_use]
pub fn export_filename(portfolio_id: &str) -> String {
    format!("portfolio_{portfolio_id}_holdings.csv")
}

/// Writes the header and one row per holding, in the given order.
///
/// Text fields are always quoted; numbers are written unquoted without
/// trailing zeros.
pub fn write_holdings_csv<'a, W, I>(writer: W, holdings: I) -> PortfolioResult<()>
where
    W: Write,
    I: IntoIterator<Item = &'a Holding>,
{
    let mut csv = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::NonNumeric)
        .from_writer(writer);

    csv.write_record(HOLDINGS_HEADER)?;
    let mut rows = 0usize;
    for h in holdings {
        let position_size = h.position_size.normalize().to_string();
        let weight = h.weight.normalize().to_string();
        csv.write_record([
            h.portfolio_name.as_str(),
            h.security_name.as_str(),
            h.ticker.as_str(),
            h.isin.as_str(),
            h.asset_class.label(),
            position_size.as_str(),
            weight.as_str(),
            h.rating.as_deref().unwrap_or_default(),
            h.country.as_str(),
            h.region.as_str(),
            h.sector.as_str(),
        ])?;
        rows += 1;
    }
    csv.flush()?;
    tracing::debug!(rows, "Wrote holdings CSV");
    Ok(())
}

/// Renders the export into a string.
pub fn holdings_csv_string<'a, I>(holdings: I) -> PortfolioResult<String>
where
    I: IntoIterator<Item = &'a Holding>,
{
    let mut buf = Vec::new();
    write_holdings_csv(&mut buf, holdings)?;
    String::from_utf8(buf).map_err(|e| PortfolioError::Csv(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::sample_holdings;

    #[test]
    fn test_filename() {
        assert_eq!(export_filename("XYZ"), "portfolio_XYZ_holdings.csv");
    }

    #[test]
    fn test_row_quoting() {
        let holdings = sample_holdings();
        let csv = holdings_csv_string(holdings.iter().take(1)).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "\"Portfolio\",\"Security Name\",\"Ticker\",\"ISIN\",\"Asset Class\",\
             \"Position Size\",\"Weight %\",\"Rating\",\"Country\",\"Region\",\"Sector\""
        );
        let row = lines.next().unwrap();
        assert!(row.starts_with(
            "\"Portfolio ABC\",\"Apple Inc\",\"AAPL\",\"US0378331005\",\"Equity\",850000,8.5,"
        ));
        assert!(row.ends_with("\"United States\",\"North America\",\"Technology\""));
    }

    #[test]
    fn test_commas_survive_quoting() {
        let mut holding = sample_holdings().remove(0);
        holding.security_name = "Apple, Inc".to_string();
        let csv = holdings_csv_string([&holding]).unwrap();

        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let record = reader.records().next().unwrap().unwrap();
        assert_eq!(record.len(), 11);
        assert_eq!(&record[1], "Apple, Inc");
    }

    #[test]
    fn test_trailing_zero_weight_is_trimmed() {
        let holdings = sample_holdings();
        let googl = holdings.iter().find(|h| h.ticker == "GOOGL").unwrap();
        let csv = holdings_csv_string([googl]).unwrap();
        assert!(csv.contains(",600000,6,"));
    }
}
