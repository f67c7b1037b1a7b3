pub mod alert;
pub mod layout;
pub mod report;
pub mod solar;
pub mod tou;
pub mod year;

pub use report::ReportTab;
pub use solar::SolarTab;
pub use tou::TouTab;
pub use year::YearTab;

use chrono::Days;

/// Energy, cost and rate values display with two decimals
pub fn format_kwh(value: f64) -> String {
    format!("{:.2}", value)
}

/// Percentages display with one decimal
pub fn format_percent(value: f64) -> String {
    format!("{:.1}", value)
}

/// Default analysis range: the last 30 days
pub fn default_date_range() -> (String, String) {
    let today = chrono::Local::now().date_naive();
    let start = today.checked_sub_days(Days::new(30)).unwrap_or(today);
    (
        start.format("%Y-%m-%d").to_string(),
        today.format("%Y-%m-%d").to_string(),
    )
}

/// Parse one numeric form field, naming it in the failure message
pub fn parse_field<T: std::str::FromStr>(value: &str, label: &str) -> Result<T, String> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| format!("Invalid value for {}", label))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_formatting() {
        assert_eq!(format_kwh(20.0), "20.00");
        assert_eq!(format_kwh(1.005), "1.00");
        assert_eq!(format_percent(33.333), "33.3");
    }

    #[test]
    fn test_parse_field() {
        assert_eq!(parse_field::<u32>(" 9 ", "peak start"), Ok(9));
        assert_eq!(parse_field::<f64>("4.5", "peak rate"), Ok(4.5));
        assert_eq!(
            parse_field::<f64>("abc", "peak rate"),
            Err("Invalid value for peak rate".to_string())
        );
    }

    #[test]
    fn test_default_date_range_is_ordered() {
        let (start, end) = default_date_range();
        assert!(start <= end);
    }
}
