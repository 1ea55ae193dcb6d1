//! Static registry of tracked economic indicators.
//!
//! A flat ordered mapping from display name to FRED series identifier, read
//! once at process start. No dynamic registration: adding an indicator means
//! adding a line here.

use crate::domain::SeriesDescriptor;

/// (display name, FRED series id) for every tracked indicator.
///
/// NAPM was discontinued by its publisher and FRED no longer serves it; the
/// entry stays so the "could not fetch" path is exercised on a real id until
/// a replacement source is chosen.
const INDICATORS: &[(&str, &str)] = &[
    ("Auto Loan Delinquencies", "DSPDYEI"),
    ("Credit Card Delinquencies", "DRCCLACBS"),
    ("Mortgage Delinquencies", "MORTGAGE30US"),
    ("Housing Starts", "HOUST"),
    ("ISM Manufacturing PMI", "NAPM"),
    ("Corporate Bond Yield Spreads", "BAMLH0A0HYM2"),
    ("Unemployment Rate", "UNRATE"),
    ("Retail Sales", "RSXFS"),
    ("Oil Prices", "DCOILWTICO"),
    ("Freight Shipment Volumes", "RAILFRTCARLOADSD"),
];

/// Build the default registry in declaration order.
pub fn default_registry() -> Vec<SeriesDescriptor> {
    INDICATORS
        .iter()
        .map(|&(name, id)| SeriesDescriptor::new(name, id))
        .collect()
}

/// Keep only descriptors whose display name matches one of `names`
/// (case-insensitive). An empty filter keeps everything.
pub fn filter_by_name(registry: Vec<SeriesDescriptor>, names: &[String]) -> Vec<SeriesDescriptor> {
    if names.is_empty() {
        return registry;
    }
    registry
        .into_iter()
        .filter(|d| names.iter().any(|n| n.eq_ignore_ascii_case(&d.name)))
        .collect()
}
