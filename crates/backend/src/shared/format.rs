/// Число с разделителем разрядов `.` (так пишут размеры в логе запросов)
pub fn format_number(n: usize) -> String {
    let digits = n.to_string();
    let head = digits.len() % 3;
    let mut groups: Vec<&str> = Vec::new();
    if head > 0 {
        groups.push(&digits[..head]);
    }
    let mut i = head;
    while i < digits.len() {
        groups.push(&digits[i..i + 3]);
        i += 3;
    }
    groups.join(".")
}

/// Размер ответа для лога: байты до 10 000, дальше в KB
pub fn format_size(bytes: usize) -> String {
    if bytes < 10_000 {
        format!("{} B", format_number(bytes))
    } else {
        format!("{} KB", format_number(bytes / 1024))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1.000");
        assert_eq!(format_number(1234567), "1.234.567");
        assert_eq!(format_number(12345678), "12.345.678");
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(9_999), "9.999 B");
        assert_eq!(format_size(20_480), "20 KB");
    }
}
