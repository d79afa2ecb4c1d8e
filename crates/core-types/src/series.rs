use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single daily closing-price observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: Decimal,
}

/// An ordered series of daily closing prices.
///
/// Dates are strictly increasing. Construction sorts the input and collapses
/// duplicate dates so that the last observation wins, mirroring the
/// overwrite semantics of a re-fetched data feed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<PricePoint>", into = "Vec<PricePoint>")]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(mut points: Vec<PricePoint>) -> Self {
        points.sort_by_key(|p| p.date);
        points.dedup_by(|later, earlier| {
            if later.date == earlier.date {
                earlier.close = later.close;
                true
            } else {
                false
            }
        });
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Derives the daily fractional change from each prior close.
    ///
    /// The first row has no prior close and is dropped. A zero prior close
    /// yields a NaN row, which downstream consumers filter out.
    pub fn daily_returns(&self) -> ReturnSeries {
        let returns = self
            .points
            .windows(2)
            .map(|pair| {
                let prev = pair[0].close.to_f64().unwrap_or(f64::NAN);
                let curr = pair[1].close.to_f64().unwrap_or(f64::NAN);
                let value = if prev != 0.0 {
                    curr / prev - 1.0
                } else {
                    f64::NAN
                };
                ReturnPoint {
                    date: pair[1].date,
                    value,
                }
            })
            .collect();
        ReturnSeries::new(returns)
    }
}

impl From<Vec<PricePoint>> for PriceSeries {
    fn from(points: Vec<PricePoint>) -> Self {
        Self::new(points)
    }
}

impl From<PriceSeries> for Vec<PricePoint> {
    fn from(series: PriceSeries) -> Self {
        series.points
    }
}

/// A single daily fractional return.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReturnPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// An ordered series of daily fractional returns, indexed by date.
///
/// Carries the same ordering invariant as [`PriceSeries`]: strictly
/// increasing dates, duplicates collapsed last-wins. A series of length 0
/// or 1 cannot produce a defined standard deviation; consumers are expected
/// to handle that case explicitly rather than rely on this type.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<ReturnPoint>", into = "Vec<ReturnPoint>")]
pub struct ReturnSeries {
    points: Vec<ReturnPoint>,
}

impl ReturnSeries {
    pub fn new(mut points: Vec<ReturnPoint>) -> Self {
        points.sort_by_key(|p| p.date);
        points.dedup_by(|later, earlier| {
            if later.date == earlier.date {
                earlier.value = later.value;
                true
            } else {
                false
            }
        });
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[ReturnPoint] {
        &self.points
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    /// The compounded growth of one unit of capital, minus one, at each date.
    pub fn cumulative(&self) -> Vec<f64> {
        let mut growth = 1.0;
        self.points
            .iter()
            .map(|p| {
                growth *= 1.0 + p.value;
                growth - 1.0
            })
            .collect()
    }

    /// The cumulative return over the whole series, 0 when empty.
    pub fn final_cumulative(&self) -> f64 {
        self.cumulative().last().copied().unwrap_or(0.0)
    }
}

impl From<Vec<ReturnPoint>> for ReturnSeries {
    fn from(points: Vec<ReturnPoint>) -> Self {
        Self::new(points)
    }
}

impl From<ReturnSeries> for Vec<ReturnPoint> {
    fn from(series: ReturnSeries) -> Self {
        series.points
    }
}
