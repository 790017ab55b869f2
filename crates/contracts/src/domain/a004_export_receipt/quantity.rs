//! Количество при утверждении строки расходного документа.
//!
//! Допустимый диапазон `[1, requested]`. Если запрошено меньше единицы,
//! диапазон вырождается в `[requested, requested]`.

/// Результат проверки введённого количества
#[derive(Debug, Clone, PartialEq)]
pub struct QuantityCheck {
    /// Значение после приведения к допустимому диапазону
    pub value: f64,
    /// Предупреждение для пользователя, если ввод пришлось исправить вверх по границе
    pub warning: Option<String>,
}

fn bounds(requested: f64) -> Option<(f64, f64)> {
    if !requested.is_finite() || requested <= 0.0 {
        return None;
    }
    Some((requested.min(1.0), requested))
}

pub fn is_within_bounds(value: f64, requested: f64) -> bool {
    match bounds(requested) {
        Some((low, high)) => value.is_finite() && value >= low && value <= high,
        None => false,
    }
}

/// Привести количество к диапазону `[1, requested]`
pub fn clamp_approved_quantity(value: f64, requested: f64) -> f64 {
    match bounds(requested) {
        Some((low, high)) if value.is_finite() => value.clamp(low, high),
        Some((_, high)) => high,
        None => 0.0,
    }
}

/// Проверка ввода в диалоге утверждения строки
pub fn check_approved_quantity(entered: f64, requested: f64) -> QuantityCheck {
    let value = clamp_approved_quantity(entered, requested);
    let warning = if entered.is_finite() && entered > requested {
        Some(format!(
            "Số lượng duyệt ({}) vượt quá số lượng yêu cầu ({}), đã điều chỉnh về {}",
            entered, requested, value
        ))
    } else {
        None
    };
    QuantityCheck { value, warning }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_into_range() {
        assert_eq!(clamp_approved_quantity(5.0, 10.0), 5.0);
        assert_eq!(clamp_approved_quantity(0.0, 10.0), 1.0);
        assert_eq!(clamp_approved_quantity(-3.0, 10.0), 1.0);
        assert_eq!(clamp_approved_quantity(25.0, 10.0), 10.0);
        assert_eq!(clamp_approved_quantity(f64::NAN, 10.0), 10.0);
    }

    #[test]
    fn test_fractional_request() {
        assert_eq!(clamp_approved_quantity(3.0, 0.5), 0.5);
        assert!(is_within_bounds(0.5, 0.5));
    }

    #[test]
    fn test_invalid_request_quantity() {
        assert_eq!(clamp_approved_quantity(3.0, 0.0), 0.0);
        assert!(!is_within_bounds(1.0, 0.0));
    }

    #[test]
    fn test_warning_when_exceeding_request() {
        let check = check_approved_quantity(12.0, 10.0);
        assert_eq!(check.value, 10.0);
        assert!(check.warning.is_some());

        let ok = check_approved_quantity(10.0, 10.0);
        assert_eq!(ok.value, 10.0);
        assert!(ok.warning.is_none());

        // ниже границы исправляем молча
        let low = check_approved_quantity(0.0, 10.0);
        assert_eq!(low.value, 1.0);
        assert!(low.warning.is_none());
    }

    #[test]
    fn test_within_bounds() {
        assert!(is_within_bounds(1.0, 10.0));
        assert!(is_within_bounds(10.0, 10.0));
        assert!(!is_within_bounds(0.5, 10.0));
        assert!(!is_within_bounds(10.5, 10.0));
    }
}
