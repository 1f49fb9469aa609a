//! Price-index construction from year-over-year inflation rates.
//!
//! The index is anchored at a base year (index == 1.0 there, regardless of
//! that year's own rate) and built in two directional passes that are never
//! mixed:
//!
//! - a forward pass compounds inflation for years at or after the base
//! - a backward pass accumulates a discount factor for years before the base,
//!   nearest-to-base first, and stores its reciprocal
//!
//! Each pass is an explicit fold carrying its accumulator, so the recurrence
//! relation is testable in isolation per step.
//!
//! Note the asymmetry between the passes: the backward pass applies the
//! *target* year's own rate when discounting, while the forward pass applies
//! the target year's rate when compounding *into* it from the previous year.
//! This matches the source definition of "the rate for year Y" as the
//! inflation experienced entering year Y, and is preserved exactly.

use std::collections::{BTreeMap, HashSet};

use crate::domain::{InflationObservation, PriceIndex};
use crate::error::SeriesError;

/// Build a [`PriceIndex`] covering exactly the years present in
/// `observations`, anchored at `base_year`.
///
/// Fails with [`SeriesError::DuplicateYear`] if a year appears twice, with
/// [`SeriesError::MissingBaseYear`] if `base_year` is absent, and with
/// [`SeriesError::DegenerateRate`] if any rate is at or below -100% (which
/// would produce a non-positive index). Malformed (non-numeric) rates are
/// rejected at ingestion, not here.
pub fn build_price_index(
    observations: &[InflationObservation],
    base_year: i32,
) -> Result<PriceIndex, SeriesError> {
    let mut seen = HashSet::with_capacity(observations.len());
    for obs in observations {
        if !seen.insert(obs.year) {
            return Err(SeriesError::DuplicateYear { year: obs.year });
        }
        if obs.rate <= -100.0 {
            return Err(SeriesError::DegenerateRate {
                year: obs.year,
                rate: obs.rate,
            });
        }
    }
    if !seen.contains(&base_year) {
        return Err(SeriesError::MissingBaseYear { base_year });
    }

    let mut at_or_after_base: Vec<&InflationObservation> = observations
        .iter()
        .filter(|o| o.year >= base_year)
        .collect();
    at_or_after_base.sort_by_key(|o| o.year);

    // Nearest-to-base first.
    let mut before_base: Vec<&InflationObservation> = observations
        .iter()
        .filter(|o| o.year < base_year)
        .collect();
    before_base.sort_by_key(|o| std::cmp::Reverse(o.year));

    let values: BTreeMap<i32, f64> = compound_forward(&at_or_after_base)
        .into_iter()
        .chain(discount_backward(&before_base))
        .collect();

    Ok(PriceIndex::from_parts(base_year, values))
}

/// Forward pass over years >= base, ascending.
///
/// The first entry is the base year itself (`idx = 1.0`); each subsequent
/// year multiplies the running index by `1 + rate/100`.
fn compound_forward(observations: &[&InflationObservation]) -> Vec<(i32, f64)> {
    observations
        .iter()
        .enumerate()
        .scan(1.0_f64, |idx, (i, obs)| {
            if i > 0 {
                *idx *= 1.0 + obs.rate / 100.0;
            }
            Some((obs.year, *idx))
        })
        .collect()
}

/// Backward pass over years < base, descending (nearest-to-base first).
///
/// Carries a running discount factor `d`; each year's index is `1 / d` after
/// multiplying in that year's own rate. Positive inflation before the base
/// therefore yields indices below 1.
fn discount_backward(observations: &[&InflationObservation]) -> Vec<(i32, f64)> {
    observations
        .iter()
        .scan(1.0_f64, |discount, obs| {
            *discount *= 1.0 + obs.rate / 100.0;
            Some((obs.year, 1.0 / *discount))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(pairs: &[(i32, f64)]) -> Vec<InflationObservation> {
        pairs
            .iter()
            .map(|&(year, rate)| InflationObservation { year, rate })
            .collect()
    }

    #[test]
    fn base_year_is_exactly_one() {
        let index = build_price_index(
            &obs(&[(2014, 11.4), (2015, 12.9), (2016, 5.4), (2017, 2.5)]),
            2016,
        )
        .unwrap();
        assert_eq!(index.get(2016), Some(1.0));
        assert_eq!(index.base_year(), 2016);
    }

    #[test]
    fn three_year_window_around_the_base() {
        // {2015: 10%, 2016: 0%, 2017: 5%}, base 2016
        let index =
            build_price_index(&obs(&[(2015, 10.0), (2016, 0.0), (2017, 5.0)]), 2016).unwrap();
        assert!((index.get(2015).unwrap() - 1.0 / 1.10).abs() < 1e-12);
        assert_eq!(index.get(2016), Some(1.0));
        assert!((index.get(2017).unwrap() - 1.05).abs() < 1e-12);
    }

    #[test]
    fn forward_recurrence_holds_for_contiguous_years() {
        let input = obs(&[(2016, 5.4), (2017, 2.5), (2018, 4.3), (2019, 3.0)]);
        let index = build_price_index(&input, 2016).unwrap();
        for pair in input.windows(2) {
            let prev = index.get(pair[0].year).unwrap();
            let next = index.get(pair[1].year).unwrap();
            assert!((next - prev * (1.0 + pair[1].rate / 100.0)).abs() < 1e-12);
        }
    }

    #[test]
    fn backward_values_are_positive_and_reciprocal_chain_consistent() {
        let input = obs(&[(2013, 6.5), (2014, 11.4), (2015, 12.9), (2016, 5.4)]);
        let index = build_price_index(&input, 2016).unwrap();

        // Walk the backward recurrence by hand: d accumulates nearest-to-base
        // first, each index value is 1/d.
        let mut discount = 1.0;
        for &(year, rate) in &[(2015, 12.9), (2014, 11.4), (2013, 6.5)] {
            discount *= 1.0 + rate / 100.0;
            let idx = index.get(year).unwrap();
            assert!(idx > 0.0);
            assert!((idx - 1.0 / discount).abs() < 1e-12);
        }
    }

    #[test]
    fn negative_rates_are_allowed_below_base() {
        let index =
            build_price_index(&obs(&[(2015, -2.0), (2016, 1.0)]), 2016).unwrap();
        // Deflation before the base year pushes the index above 1.
        assert!(index.get(2015).unwrap() > 1.0);
    }

    #[test]
    fn base_year_rate_is_unused() {
        let a = build_price_index(&obs(&[(2016, 5.4), (2017, 2.5)]), 2016).unwrap();
        let b = build_price_index(&obs(&[(2016, 99.0), (2017, 2.5)]), 2016).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn input_order_does_not_matter() {
        let sorted = obs(&[(2014, 11.4), (2015, 12.9), (2016, 5.4), (2017, 2.5)]);
        let shuffled = obs(&[(2017, 2.5), (2014, 11.4), (2016, 5.4), (2015, 12.9)]);
        assert_eq!(
            build_price_index(&sorted, 2016).unwrap(),
            build_price_index(&shuffled, 2016).unwrap()
        );
    }

    #[test]
    fn rebuilding_is_idempotent() {
        let input = obs(&[(2014, 11.4), (2015, 12.9), (2016, 5.4), (2017, 2.5)]);
        let a = build_price_index(&input, 2016).unwrap();
        let b = build_price_index(&input, 2016).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn duplicate_year_is_rejected() {
        let err = build_price_index(&obs(&[(2016, 5.4), (2016, 2.5)]), 2016).unwrap_err();
        assert_eq!(err, SeriesError::DuplicateYear { year: 2016 });
    }

    #[test]
    fn missing_base_year_is_rejected() {
        let err = build_price_index(&obs(&[(2015, 12.9), (2017, 2.5)]), 2016).unwrap_err();
        assert_eq!(err, SeriesError::MissingBaseYear { base_year: 2016 });
    }

    #[test]
    fn degenerate_rate_is_rejected() {
        let err = build_price_index(&obs(&[(2015, -100.0), (2016, 5.4)]), 2016).unwrap_err();
        assert_eq!(
            err,
            SeriesError::DegenerateRate {
                year: 2015,
                rate: -100.0
            }
        );
    }

    #[test]
    fn clipping_drops_old_years_only() {
        let index = build_price_index(
            &obs(&[(1998, 84.4), (1999, 36.5), (2000, 20.2), (2016, 5.4)]),
            2016,
        )
        .unwrap();
        let clipped = index.clipped_from(2000);
        assert_eq!(clipped.first_year(), Some(2000));
        assert_eq!(clipped.len(), 2);
        assert_eq!(clipped.get(2000), index.get(2000));
        assert_eq!(clipped.base_year(), 2016);
    }
}
