//! Market data port.

use crate::domain::error::BriefingError;

pub trait QuotePort {
    /// Time-ordered daily closes over the trailing `lookback_days` calendar
    /// days. Sessions reported without a close are `None`; an empty vector
    /// means the provider has no data for `symbol`.
    fn fetch_daily_closes(
        &self,
        symbol: &str,
        lookback_days: u32,
    ) -> Result<Vec<Option<f64>>, BriefingError>;
}
