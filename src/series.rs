// 📈 Chart Series
// Time series pulled out of the date-sorted view for the three line charts.
//
// X values are days since the common era, so records on the same date share
// an x coordinate and gaps between days stay proportional.

use chrono::{Datelike, NaiveDate};

use crate::record::HealthRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartMetric {
    Weight,
    Bmi,
    BloodPressure,
}

impl ChartMetric {
    pub const ALL: [ChartMetric; 3] = [ChartMetric::Weight, ChartMetric::Bmi, ChartMetric::BloodPressure];

    pub fn title(&self) -> &str {
        match self {
            ChartMetric::Weight => "Weight",
            ChartMetric::Bmi => "BMI",
            ChartMetric::BloodPressure => "Blood Pressure",
        }
    }

    pub fn unit(&self) -> &str {
        match self {
            ChartMetric::Weight => "kg",
            ChartMetric::Bmi => "kg/m²",
            ChartMetric::BloodPressure => "mmHg",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            ChartMetric::Weight => 0,
            ChartMetric::Bmi => 1,
            ChartMetric::BloodPressure => 2,
        }
    }
}

/// One named line of a chart
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: &'static str,
    pub points: Vec<(f64, f64)>,
}

pub fn x_value(date: NaiveDate) -> f64 {
    f64::from(date.num_days_from_ce())
}

/// Inverse of `x_value`, for axis labels
pub fn date_from_x(x: f64) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(x.round() as i32)
}

/// Series for `metric`, in the order of `view` (expected date-sorted)
pub fn series_for(metric: ChartMetric, view: &[HealthRecord]) -> Vec<Series> {
    let line = |name: &'static str, value: fn(&HealthRecord) -> f64| Series {
        name,
        points: view.iter().map(|r| (x_value(r.date), value(r))).collect(),
    };

    match metric {
        ChartMetric::Weight => vec![line("Weight", |r| r.weight_kg)],
        ChartMetric::Bmi => vec![line("BMI", |r| r.bmi)],
        ChartMetric::BloodPressure => vec![
            line("Systolic", |r| f64::from(r.systolic)),
            line("Diastolic", |r| f64::from(r.diastolic)),
        ],
    }
}

/// Axis bounds covering every point of every series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartBounds {
    pub x: [f64; 2],
    pub y: [f64; 2],
}

impl ChartBounds {
    /// `None` when there are no points at all
    pub fn from_series(series: &[Series]) -> Option<Self> {
        let mut points = series.iter().flat_map(|s| s.points.iter());
        let &(x0, y0) = points.next()?;

        let (mut x_min, mut x_max, mut y_min, mut y_max) = (x0, x0, y0, y0);
        for &(x, y) in points {
            x_min = x_min.min(x);
            x_max = x_max.max(x);
            y_min = y_min.min(y);
            y_max = y_max.max(y);
        }

        // One day either side when every record shares a date
        if x_max - x_min < 1.0 {
            x_min -= 1.0;
            x_max += 1.0;
        }

        let pad = ((y_max - y_min) * 0.1).max(1.0);
        Some(ChartBounds {
            x: [x_min, x_max],
            y: [y_min - pad, y_max + pad],
        })
    }
}
