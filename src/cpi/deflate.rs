//! Deflation: join a price index onto nominal figures and divide.

use crate::domain::{NominalSeries, PriceIndex, RealSeries, SectorSeries};
use crate::error::SeriesError;

/// Deflate a [`NominalSeries`] into a [`RealSeries`].
///
/// Inner-join semantics per sector: years missing from either the nominal
/// data or the index are silently dropped, never zero-filled or interpolated.
/// Division is never by zero because index values are strictly positive by
/// construction.
///
/// Fails with [`SeriesError::EmptyJoin`] when no year overlaps at all, so a
/// disjoint input surfaces explicitly instead of rendering an empty chart.
pub fn deflate(nominal: &NominalSeries, index: &PriceIndex) -> Result<RealSeries, SeriesError> {
    if joined_years(nominal, index).is_empty() {
        return Err(SeriesError::EmptyJoin);
    }

    let sectors = nominal
        .sectors
        .iter()
        .map(|sector| SectorSeries {
            name: sector.name.clone(),
            values: sector
                .values
                .iter()
                .filter_map(|(&year, &value)| index.get(year).map(|idx| (year, value / idx)))
                .collect(),
        })
        .collect();

    Ok(RealSeries { sectors })
}

/// Years present in both the wage data (any sector) and the price index,
/// ascending.
pub fn joined_years(nominal: &NominalSeries, index: &PriceIndex) -> Vec<i32> {
    nominal
        .years()
        .into_iter()
        .filter(|&year| index.get(year).is_some())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpi::index::build_price_index;
    use crate::domain::InflationObservation;

    fn index_2016() -> PriceIndex {
        let observations = vec![
            InflationObservation { year: 2015, rate: 10.0 },
            InflationObservation { year: 2016, rate: 0.0 },
            InflationObservation { year: 2017, rate: 5.0 },
        ];
        build_price_index(&observations, 2016).unwrap()
    }

    fn nominal(name: &str, pairs: &[(i32, f64)]) -> NominalSeries {
        NominalSeries {
            sectors: vec![SectorSeries {
                name: name.to_string(),
                values: pairs.iter().copied().collect(),
            }],
        }
    }

    #[test]
    fn base_year_deflation_is_identity() {
        let series = nominal("Education", &[(2016, 1000.0), (2017, 1000.0)]);
        let real = deflate(&series, &index_2016()).unwrap();
        let sector = real.sector("Education").unwrap();
        assert_eq!(sector.get(2016), Some(1000.0));
        assert!((sector.get(2017).unwrap() - 952.380952).abs() < 1e-4);
    }

    #[test]
    fn round_trip_recovers_nominal() {
        let index = index_2016();
        let series = nominal("Construction", &[(2015, 800.0), (2016, 900.0), (2017, 950.0)]);
        let real = deflate(&series, &index).unwrap();
        let sector = real.sector("Construction").unwrap();
        for (&year, &value) in &series.sectors[0].values {
            let recovered = sector.get(year).unwrap() * index.get(year).unwrap();
            assert!((recovered - value).abs() < 1e-9);
        }
    }

    #[test]
    fn years_outside_the_index_are_dropped() {
        let series = nominal("Education", &[(2016, 1000.0), (2020, 1400.0)]);
        let real = deflate(&series, &index_2016()).unwrap();
        let sector = real.sector("Education").unwrap();
        assert_eq!(sector.get(2016), Some(1000.0));
        assert_eq!(sector.get(2020), None);
    }

    #[test]
    fn disjoint_years_fail_with_empty_join() {
        let series = nominal("Education", &[(2018, 1.0), (2019, 2.0), (2020, 3.0)]);
        let err = deflate(&series, &index_2016()).unwrap_err();
        assert_eq!(err, SeriesError::EmptyJoin);
    }

    #[test]
    fn sector_names_pass_through_in_order() {
        let series = NominalSeries {
            sectors: vec![
                SectorSeries {
                    name: "Mineral mining".to_string(),
                    values: [(2016, 69688.0)].into_iter().collect(),
                },
                SectorSeries {
                    name: "Construction".to_string(),
                    values: [(2016, 32332.0)].into_iter().collect(),
                },
            ],
        };
        let real = deflate(&series, &index_2016()).unwrap();
        let names: Vec<&str> = real.sectors.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Mineral mining", "Construction"]);
    }
}
