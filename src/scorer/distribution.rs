use std::cmp::Ordering;

/// Temperature-scaled softmax over activations, as unrounded percentages.
///
/// If any `exp(a * T)` overflows, the overflowing entries split 100 equally
/// and every other entry gets 0.
pub fn shares(activations: &[f64], temperature: f64) -> Vec<f64> {
    if activations.is_empty() {
        return Vec::new();
    }

    let exps: Vec<f64> = activations
        .iter()
        .map(|a| {
            let e = (a * temperature).exp();
            if e.is_nan() {
                0.0
            } else {
                e
            }
        })
        .collect();

    let overflowed = exps.iter().filter(|e| e.is_infinite()).count();
    let total: f64 = exps.iter().sum();
    if overflowed > 0 {
        let share = 100.0 / overflowed as f64;
        exps.iter()
            .map(|e| if e.is_infinite() { share } else { 0.0 })
            .collect()
    } else if total.is_infinite() {
        // Finite terms whose sum overflows: rescale by the largest term first.
        let max = exps.iter().fold(0.0_f64, |m, e| m.max(*e));
        let scaled_total: f64 = exps.iter().map(|e| e / max).sum();
        exps.iter().map(|e| e / max / scaled_total * 100.0).collect()
    } else if total <= 0.0 {
        // Every exponential underflowed: nothing separates the candidates.
        vec![100.0 / exps.len() as f64; exps.len()]
    } else {
        exps.iter().map(|e| e / total * 100.0).collect()
    }
}

/// Rounds percentages to cents so that they add up to exactly 100.00.
///
/// Largest-remainder: every share is floored to a cent, then the missing
/// cents go to the largest fractional parts, earlier entries first on ties.
/// A larger share never ends up below a smaller one.
pub fn round_to_hundred(shares: &[f64]) -> Vec<f64> {
    if shares.is_empty() {
        return Vec::new();
    }

    let scaled: Vec<f64> = shares.iter().map(|s| (s * 100.0).max(0.0)).collect();
    let mut cents: Vec<u64> = scaled.iter().map(|c| c.floor() as u64).collect();
    let missing = 10_000_u64.saturating_sub(cents.iter().sum());

    let mut by_remainder: Vec<usize> = (0..scaled.len()).collect();
    by_remainder.sort_by(|&a, &b| {
        let ra = scaled[a] - scaled[a].floor();
        let rb = scaled[b] - scaled[b].floor();
        rb.partial_cmp(&ra).unwrap_or(Ordering::Equal)
    });
    for &i in by_remainder.iter().cycle().take(missing as usize) {
        cents[i] += 1;
    }

    cents.into_iter().map(|c| c as f64 / 100.0).collect()
}

/// [`shares`] rounded to two decimals, summing to exactly 100.00.
pub fn distribute(activations: &[f64], temperature: f64) -> Vec<f64> {
    round_to_hundred(&shares(activations, temperature))
}

/// Indices sorted by descending percentage. The sort is stable, so ties keep
/// the original insertion order.
pub fn rank_order(percentages: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..percentages.len()).collect();
    order.sort_by(|&a, &b| {
        percentages[b]
            .partial_cmp(&percentages[a])
            .unwrap_or(Ordering::Equal)
    });
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_empty() {
        assert!(distribute(&[], 4.0).is_empty());
    }

    #[test]
    fn test_overflow_split() {
        let d = distribute(&[1.0, 1000.0, 1000.0], 4.0);
        assert_eq!(d, vec![0.0, 50.0, 50.0]);
    }

    #[test]
    fn test_thirds_add_up() {
        let d = distribute(&[0.5, 0.5, 0.5], 4.0);
        assert!((d.iter().sum::<f64>() - 100.0).abs() < 1e-9);
        assert_eq!(d[1], 33.33);
    }

    #[test]
    fn test_missing_cents_go_to_earliest_ties() {
        let d = distribute(&[0.5; 6], 4.0);
        assert_eq!(d, vec![16.67, 16.67, 16.67, 16.67, 16.66, 16.66]);
    }

    #[test]
    fn test_rounding_keeps_larger_share_ahead() {
        // Floors tie at 16.33; only the larger remainder may gain the cent.
        let d = round_to_hundred(&[16.334, 16.336, 67.33]);
        assert!(d[1] >= d[0]);
        assert!((d.iter().sum::<f64>() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_rank_ties_keep_order() {
        assert_eq!(rank_order(&[10.0, 40.0, 10.0, 40.0]), vec![1, 3, 0, 2]);
    }
}
