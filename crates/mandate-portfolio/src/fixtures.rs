//! Bundled sample portfolios.
//!
//! Three illustrative US portfolios used by the holdings view and tests:
//! `ABC` (growth tilt, over its equity and cash limits), `XYZ` (balanced)
//! and `DEF` (conservative, mostly Treasuries).

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::types::AssetClass::{self, Alternatives, Cash, Equity, FixedIncome};
use crate::types::Holding;

const COUNTRY: &str = "United States";
const REGION: &str = "North America";

#[allow(clippy::too_many_arguments)]
fn row(
    id: &str,
    portfolio_id: &str,
    security_name: &str,
    ticker: &str,
    isin: &str,
    asset_class: AssetClass,
    position_size: Decimal,
    weight: Decimal,
    rating: Option<&str>,
    sector: &str,
) -> Holding {
    Holding {
        id: id.to_string(),
        portfolio_id: portfolio_id.to_string(),
        portfolio_name: format!("Portfolio {portfolio_id}"),
        security_name: security_name.to_string(),
        ticker: ticker.to_string(),
        isin: isin.to_string(),
        asset_class,
        position_size,
        weight,
        rating: rating.map(str::to_string),
        country: COUNTRY.to_string(),
        region: REGION.to_string(),
        sector: sector.to_string(),
    }
}

/// Returns every sample holding, grouped by portfolio in id order.
#[rustfmt::skip]
#[must_use]
pub fn sample_holdings() -> Vec<Holding> {
    vec![
        row("1", "ABC", "Apple Inc", "AAPL", "US0378331005", Equity, dec!(850000), dec!(8.5), None, "Technology"),
        row("2", "ABC", "Microsoft Corp", "MSFT", "US5949181045", Equity, dec!(750000), dec!(7.5), None, "Technology"),
        row("3", "ABC", "Amazon.com Inc", "AMZN", "US0231351067", Equity, dec!(650000), dec!(6.5), None, "Consumer Discretionary"),
        row("4", "ABC", "Alphabet Inc Class A", "GOOGL", "US02079K3059", Equity, dec!(600000), dec!(6.0), None, "Technology"),
        row("5", "ABC", "NVIDIA Corp", "NVDA", "US67066G1040", Equity, dec!(550000), dec!(5.5), None, "Technology"),
        row("6", "ABC", "Tesla Inc", "TSLA", "US88160R1014", Equity, dec!(450000), dec!(4.5), None, "Consumer Discretionary"),
        row("7", "ABC", "Johnson & Johnson", "JNJ", "US4781601046", Equity, dec!(400000), dec!(4.0), None, "Healthcare"),
        row("8", "ABC", "JPMorgan Chase & Co", "JPM", "US46625H1005", Equity, dec!(250000), dec!(2.5), None, "Financials"),
        row("9", "ABC", "US Treasury 10Y", "T 2.5 05/15/2034", "US912810TW65", FixedIncome, dec!(900000), dec!(9.0), Some("AAA"), "Government"),
        row("10", "ABC", "US Treasury 5Y", "T 2.0 04/30/2029", "US912810TE12", FixedIncome, dec!(800000), dec!(8.0), Some("AAA"), "Government"),
        row("11", "ABC", "ABC Corp 3.5% 2029", "ABC35-29", "US0001231234", FixedIncome, dec!(700000), dec!(7.0), Some("BBB"), "Industrials"),
        row("12", "ABC", "Goldman Sachs Group 2.625% 2031", "GS2625-31", "US38141GXX98", FixedIncome, dec!(600000), dec!(6.0), Some("A-"), "Financials"),
        row("13", "ABC", "Morgan Stanley 4.0% 2030", "MS4-30", "US6174468616", FixedIncome, dec!(500000), dec!(5.0), Some("A"), "Financials"),
        row("14", "ABC", "Blackstone Real Estate Fund", "BREP", "US09260D1072", Alternatives, dec!(400000), dec!(4.0), None, "Real Estate"),
        row("15", "ABC", "KKR Infrastructure Fund", "KKRI", "US48251W1045", Alternatives, dec!(400000), dec!(4.0), None, "Infrastructure"),
        row("16", "ABC", "Cash & Equivalents", "CASH", "CASH-USD", Cash, dec!(1230000), dec!(12.3), None, "Cash"),
        row("17", "XYZ", "Meta Platforms Inc", "META", "US30303M1027", Equity, dec!(600000), dec!(7.5), None, "Technology"),
        row("18", "XYZ", "Berkshire Hathaway", "BRK.B", "US0846707026", Equity, dec!(550000), dec!(6.9), None, "Financials"),
        row("19", "XYZ", "Visa Inc", "V", "US92826C8394", Equity, dec!(500000), dec!(6.3), None, "Financials"),
        row("20", "XYZ", "Procter & Gamble", "PG", "US7427181091", Equity, dec!(450000), dec!(5.6), None, "Consumer Staples"),
        row("21", "XYZ", "Coca-Cola Company", "KO", "US1912161007", Equity, dec!(400000), dec!(5.0), None, "Consumer Staples"),
        row("22", "XYZ", "Pfizer Inc", "PFE", "US7170811035", Equity, dec!(300000), dec!(3.8), None, "Healthcare"),
        row("23", "XYZ", "US Treasury 30Y", "T 3.0 08/15/2054", "US912810TZ98", FixedIncome, dec!(1200000), dec!(15.0), Some("AAA"), "Government"),
        row("24", "XYZ", "US Treasury 10Y", "T 2.75 02/15/2034", "US912810TA24", FixedIncome, dec!(1000000), dec!(12.5), Some("AAA"), "Government"),
        row("25", "XYZ", "Apple Inc 3.0% 2032", "AAPL3-32", "US037833DK65", FixedIncome, dec!(800000), dec!(10.0), Some("AA+"), "Technology"),
        row("26", "XYZ", "Microsoft Corp 2.4% 2031", "MSFT24-31", "US594918BY90", FixedIncome, dec!(600000), dec!(7.5), Some("AAA"), "Technology"),
        row("27", "XYZ", "JPMorgan 3.5% 2030", "JPM35-30", "US46647PCJ46", FixedIncome, dec!(400000), dec!(5.0), Some("A"), "Financials"),
        row("28", "XYZ", "Carlyle Global Infrastructure", "CGIF", "US14309L1089", Alternatives, dec!(500000), dec!(6.3), None, "Infrastructure"),
        row("29", "XYZ", "Apollo Credit Fund", "ACF", "US03769M1080", Alternatives, dec!(300000), dec!(3.8), None, "Credit"),
        row("30", "XYZ", "Cash & Equivalents", "CASH", "CASH-USD", Cash, dec!(400000), dec!(5.0), None, "Cash"),
        row("31", "DEF", "US Treasury 20Y", "T 2.875 05/15/2043", "US912810RB26", FixedIncome, dec!(2500000), dec!(25.0), Some("AAA"), "Government"),
        row("32", "DEF", "US Treasury 10Y", "T 2.5 02/28/2034", "US912810RE60", FixedIncome, dec!(2000000), dec!(20.0), Some("AAA"), "Government"),
        row("33", "DEF", "US Treasury 5Y", "T 2.0 11/30/2028", "US912810RC97", FixedIncome, dec!(1500000), dec!(15.0), Some("AAA"), "Government"),
        row("34", "DEF", "Verizon 4.125% 2030", "VZ4125-30", "US92343VGE75", FixedIncome, dec!(1000000), dec!(10.0), Some("BBB+"), "Telecommunications"),
        row("35", "DEF", "AT&T 3.65% 2029", "T365-29", "US00206RCL60", FixedIncome, dec!(800000), dec!(8.0), Some("BBB"), "Telecommunications"),
        row("36", "DEF", "Walmart 2.95% 2032", "WMT295-32", "US931142EB49", FixedIncome, dec!(700000), dec!(7.0), Some("AA"), "Consumer Staples"),
        row("37", "DEF", "Johnson & Johnson", "JNJ", "US4781601046", Equity, dec!(500000), dec!(5.0), None, "Healthcare"),
        row("38", "DEF", "Procter & Gamble", "PG", "US7427181091", Equity, dec!(500000), dec!(5.0), None, "Consumer Staples"),
        row("39", "DEF", "Coca-Cola Company", "KO", "US1912161007", Equity, dec!(500000), dec!(5.0), None, "Consumer Staples"),
        row("40", "DEF", "Cash & Equivalents", "CASH", "CASH-USD", Cash, dec!(500000), dec!(5.0), None, "Cash"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_counts() {
        let holdings = sample_holdings();
        assert_eq!(holdings.len(), 40);

        let count = |id: &str| holdings.iter().filter(|h| h.portfolio_id == id).count();
        assert_eq!(count("ABC"), 16);
        assert_eq!(count("XYZ"), 14);
        assert_eq!(count("DEF"), 10);
    }

    #[test]
    fn test_sample_ids_unique() {
        let holdings = sample_holdings();
        let mut ids: Vec<&str> = holdings.iter().map(|h| h.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), holdings.len());
    }

    #[test]
    fn test_only_fixed_income_is_rated() {
        for holding in sample_holdings() {
            assert_eq!(
                holding.rating.is_some(),
                holding.asset_class == AssetClass::FixedIncome,
                "{}",
                holding.security_name
            );
        }
    }
}
