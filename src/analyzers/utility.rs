/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Rounds to one decimal place, halves away from zero.
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Mean of a set of ratings rounded to one decimal. Returns 0.0 for empty input.
pub fn rounded_mean<I>(ratings: I) -> f64
where
    I: IntoIterator<Item = u8>,
{
    let values: Vec<f64> = ratings.into_iter().map(f64::from).collect();
    round_one_decimal(mean(&values))
}

/// `(positive - negative) / total * 100`, rounded to the nearest integer
/// (halves away from zero). Returns 0 when `total` is zero.
pub fn percentage_index(positive: usize, negative: usize, total: usize) -> i32 {
    if total == 0 {
        return 0;
    }
    let diff = positive as f64 - negative as f64;
    (diff / total as f64 * 100.0).round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_empty() {
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_rounded_mean() {
        assert_eq!(rounded_mean([5, 5, 4]), 4.7);
        assert_eq!(rounded_mean([1, 2]), 1.5);
        assert_eq!(rounded_mean([3]), 3.0);
        assert_eq!(rounded_mean(Vec::<u8>::new()), 0.0);
    }

    #[test]
    fn test_round_one_decimal_halves_away_from_zero() {
        assert_eq!(round_one_decimal(4.25), 4.3);
        assert_eq!(round_one_decimal(-4.25), -4.3);
        assert_eq!(round_one_decimal(2.0), 2.0);
    }

    #[test]
    fn test_percentage_index() {
        assert_eq!(percentage_index(2, 1, 4), 25);
        assert_eq!(percentage_index(0, 0, 0), 0);
        assert_eq!(percentage_index(0, 3, 3), -100);
        // 1/8 = 12.5 rounds away from zero
        assert_eq!(percentage_index(1, 0, 8), 13);
        assert_eq!(percentage_index(0, 1, 8), -13);
    }
}
