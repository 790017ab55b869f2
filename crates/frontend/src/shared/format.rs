//! Форматирование для таблиц: количества и даты в привычном для VN виде.

use chrono::{DateTime, Utc};

/// Количество: разделитель тысяч точка, дробная часть через запятую, без хвостовых нулей
pub fn format_quantity(value: f64) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }
    let rounded = format!("{:.2}", value.abs());
    let (integer, fraction) = rounded.split_once('.').unwrap_or((rounded.as_str(), ""));

    let mut grouped = String::new();
    for (i, c) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    let fraction = fraction.trim_end_matches('0');
    let sign = if value < 0.0 && (integer != "0" || !fraction.is_empty()) {
        "-"
    } else {
        ""
    };
    if fraction.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{},{}", sign, grouped, fraction)
    }
}

/// Дата документа: `dd/mm/yyyy`
pub fn format_date(value: &DateTime<Utc>) -> String {
    value.format("%d/%m/%Y").to_string()
}

pub fn format_datetime(value: &DateTime<Utc>) -> String {
    value.format("%d/%m/%Y %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_quantity() {
        assert_eq!(format_quantity(0.0), "0");
        assert_eq!(format_quantity(120.0), "120");
        assert_eq!(format_quantity(1234567.0), "1.234.567");
        assert_eq!(format_quantity(1500.5), "1.500,5");
        assert_eq!(format_quantity(-2.25), "-2,25");
        assert_eq!(format_quantity(f64::NAN), "-");
    }

    #[test]
    fn test_format_date() {
        let dt = Utc.with_ymd_and_hms(2024, 3, 5, 14, 2, 26).unwrap();
        assert_eq!(format_date(&dt), "05/03/2024");
        assert_eq!(format_datetime(&dt), "05/03/2024 14:02");
    }
}
