use crate::{
    rules::dice::{DiceCount, SIDES},
    statistics::rarity::Rarity,
};

pub fn binomial_coefficient(n: u32, k: u32) -> f64 {
    if k > n {
        return 0.0;
    }
    let k = k.min(n - k);
    (1..=k).fold(1.0, |acc, i| acc * (n - k + i) as f64 / i as f64)
}

/// Number of ordered ways `dice` d6 can land on `total`.
///
/// Inclusion-exclusion over the number of dice forced above six:
/// `sum_k (-1)^k C(n, k) C(total - 6k - 1, n - 1)`.
pub fn ways_to_total(dice: DiceCount, total: u32) -> u64 {
    let n = dice.get();
    if total < dice.min_total() || total > dice.max_total() {
        return 0;
    }
    let mut ways = 0.0;
    for k in 0..=n {
        let Some(rest) = total.checked_sub(SIDES * k + 1) else {
            break;
        };
        let term = binomial_coefficient(n, k) * binomial_coefficient(rest, n - 1);
        if k % 2 == 0 {
            ways += term;
        } else {
            ways -= term;
        }
    }
    ways.round() as u64
}

/// Exact probability mass of every total `dice` d6 can show, indexed by total.
///
/// Built by convolving the uniform face distribution with itself once per die,
/// so index `0..dice` is always zero.
pub fn sum_distribution(dice: DiceCount) -> Vec<f64> {
    let face_p = 1.0 / SIDES as f64;
    let mut pmf = vec![1.0];
    for _ in 0..dice.get() {
        let mut next = vec![0.0; pmf.len() + SIDES as usize];
        for (total, p) in pmf.iter().enumerate() {
            if *p == 0.0 {
                continue;
            }
            for face in 1..=SIDES as usize {
                next[total + face] += p * face_p;
            }
        }
        pmf = next;
    }
    pmf
}

/// The exact counterpart of [`crate::statistics::rarity::RarityEstimator::estimate`].
pub fn exact_rarity(dice: DiceCount, total: u32) -> Rarity {
    let outcomes = (SIDES as u64).pow(dice.get());
    Rarity::from_counts(ways_to_total(dice, total), outcomes)
}

#[cfg(test)]
mod tests {
    use statrs::assert_almost_eq;

    use super::*;

    fn dice(n: u32) -> DiceCount {
        DiceCount::try_from(n).unwrap()
    }

    #[test]
    fn test_binomial_coefficient() {
        assert_eq!(binomial_coefficient(5, 2), 10.0);
        assert_eq!(binomial_coefficient(0, 0), 1.0);
        assert_eq!(binomial_coefficient(5, 0), 1.0);
        assert_eq!(binomial_coefficient(5, 5), 1.0);
        assert_eq!(binomial_coefficient(5, 6), 0.0);
        assert_eq!(binomial_coefficient(29, 4), 23751.0);
    }

    #[test]
    fn test_two_dice_triangle() {
        let expected = [1, 2, 3, 4, 5, 6, 5, 4, 3, 2, 1];
        for (total, ways) in (2..=12).zip(expected) {
            assert_eq!(ways_to_total(dice(2), total), ways);
        }
        assert_eq!(ways_to_total(dice(2), 1), 0);
        assert_eq!(ways_to_total(dice(2), 13), 0);
    }

    #[test]
    fn test_distribution_sums_to_one() {
        for n in DiceCount::all() {
            let pmf = sum_distribution(n);
            assert_eq!(pmf.len(), n.max_total() as usize + 1);
            assert_almost_eq!(pmf.iter().sum::<f64>(), 1.0, 1e-12);
        }
    }

    #[test]
    fn test_convolution_matches_closed_form() {
        for n in DiceCount::all() {
            let pmf = sum_distribution(n);
            let outcomes = 6f64.powi(n.get() as i32);
            for (total, p) in pmf.iter().enumerate() {
                let ways = ways_to_total(n, total as u32) as f64;
                assert_almost_eq!(*p, ways / outcomes, 1e-12);
            }
        }
    }

    #[test]
    fn test_exact_rarity() {
        assert_almost_eq!(exact_rarity(dice(2), 7).percent(), 100.0 / 6.0, 1e-9);
        assert_almost_eq!(exact_rarity(dice(2), 2).percent(), 100.0 / 36.0, 1e-9);
        assert_almost_eq!(exact_rarity(dice(3), 10).percent(), 12.5, 1e-9);
        assert_eq!(exact_rarity(dice(5), 31).percent(), 0.0);
    }
}
