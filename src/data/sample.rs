//! Built-in demo dataset.
//!
//! Published yearly statistics for a national economy: the CPI series
//! (year-over-year, percent) and average monthly wages for three sectors, in
//! rubles. Used whenever no input files are supplied, so `rw` works out of
//! the box.
//!
//! The inflation series deliberately reaches back before the default cutoff
//! year (2000), so the cutoff actually trims something in the demo.

use crate::domain::{InflationObservation, NominalSeries, SectorSeries};

/// Year-over-year CPI, percent.
const INFLATION: &[(i32, f64)] = &[
    (1995, 131.3),
    (1996, 21.8),
    (1997, 11.0),
    (1998, 84.4),
    (1999, 36.5),
    (2000, 20.2),
    (2001, 18.6),
    (2002, 15.1),
    (2003, 12.0),
    (2004, 11.7),
    (2005, 10.9),
    (2006, 9.0),
    (2007, 11.9),
    (2008, 13.3),
    (2009, 8.8),
    (2010, 8.8),
    (2011, 6.1),
    (2012, 6.6),
    (2013, 6.5),
    (2014, 11.4),
    (2015, 12.9),
    (2016, 5.4),
    (2017, 2.5),
    (2018, 4.3),
    (2019, 3.0),
    (2020, 4.9),
    (2021, 8.4),
    (2022, 11.9),
    (2023, 7.4),
];

const MINING: &[(i32, f64)] = &[
    (2000, 5940.0),
    (2001, 9099.0),
    (2002, 11081.0),
    (2003, 13912.0),
    (2004, 16842.0),
    (2005, 19727.0),
    (2006, 23146.0),
    (2007, 28108.0),
    (2008, 33206.0),
    (2009, 35363.0),
    (2010, 39895.0),
    (2011, 45132.0),
    (2012, 50401.0),
    (2013, 54161.0),
    (2014, 58959.0),
    (2015, 63695.0),
    (2016, 69688.0),
    (2017, 74474.0),
    (2018, 83178.0),
    (2019, 89344.0),
    (2020, 95359.0),
    (2021, 104043.0),
    (2022, 115822.0),
    (2023, 127762.0),
];

const CONSTRUCTION: &[(i32, f64)] = &[
    (2000, 2640.0),
    (2001, 3859.0),
    (2002, 5248.0),
    (2003, 6552.0),
    (2004, 7948.0),
    (2005, 9043.0),
    (2006, 10869.0),
    (2007, 14333.0),
    (2008, 18574.0),
    (2009, 18122.0),
    (2010, 21172.0),
    (2011, 23682.0),
    (2012, 25951.0),
    (2013, 27701.0),
    (2014, 29354.0),
    (2015, 29960.0),
    (2016, 32332.0),
    (2017, 33678.0),
    (2018, 38518.0),
    (2019, 42631.0),
    (2020, 44740.0),
    (2021, 49935.0),
    (2022, 57394.0),
    (2023, 63858.0),
];

const EDUCATION: &[(i32, f64)] = &[
    (2000, 1240.0),
    (2001, 1833.0),
    (2002, 2927.0),
    (2003, 3387.0),
    (2004, 4203.0),
    (2005, 5430.0),
    (2006, 6983.0),
    (2007, 8778.0),
    (2008, 11317.0),
    (2009, 13294.0),
    (2010, 14075.0),
    (2011, 15809.0),
    (2012, 18995.0),
    (2013, 23458.0),
    (2014, 25862.0),
    (2015, 26928.0),
    (2016, 28094.0),
    (2017, 30258.0),
    (2018, 32429.0),
    (2019, 34641.0),
    (2020, 36466.0),
    (2021, 39563.0),
    (2022, 43217.0),
    (2023, 47467.0),
];

/// The demo inflation-rate series.
pub fn sample_inflation() -> Vec<InflationObservation> {
    INFLATION
        .iter()
        .map(|&(year, rate)| InflationObservation { year, rate })
        .collect()
}

/// The demo wage table (three sectors, 2000 onward).
pub fn sample_wages() -> NominalSeries {
    let sector = |name: &str, values: &[(i32, f64)]| SectorSeries {
        name: name.to_string(),
        values: values.iter().copied().collect(),
    };

    NominalSeries {
        sectors: vec![
            sector("Mineral mining", MINING),
            sector("Construction", CONSTRUCTION),
            sector("Education", EDUCATION),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpi::{build_price_index, deflate};

    #[test]
    fn sample_data_runs_through_the_pipeline() {
        let index = build_price_index(&sample_inflation(), 2016)
            .unwrap()
            .clipped_from(2000);
        let real = deflate(&sample_wages(), &index).unwrap();

        // Base-year identity on real data.
        let education = real.sector("Education").unwrap();
        assert_eq!(education.get(2016), Some(28094.0));

        // Pre-cutoff inflation years never reach the index.
        assert_eq!(index.first_year(), Some(2000));
    }
}
