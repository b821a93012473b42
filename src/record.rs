use chrono::NaiveDate;

use crate::bmi::{compute_bmi, round_one_decimal, BmiStatus};

/// Inclusive bounds a measurement is clamped into
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Bounds { min, max }
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

pub const HEIGHT_CM: Bounds = Bounds::new(100.0, 250.0);
pub const WEIGHT_KG: Bounds = Bounds::new(30.0, 200.0);
pub const SYSTOLIC: Bounds = Bounds::new(80.0, 200.0);
pub const DIASTOLIC: Bounds = Bounds::new(50.0, 150.0);

/// One day's measurements
///
/// Core fields never change after construction: the BMI is a rounded
/// snapshot of the height and weight at save time.
#[derive(Debug, Clone, PartialEq)]
pub struct HealthRecord {
    pub date: NaiveDate,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub bmi: f64,
    pub systolic: u16,
    pub diastolic: u16,
}

impl HealthRecord {
    /// Build a record, clamping every measurement into its bounds
    pub fn new(
        date: NaiveDate,
        height_cm: f64,
        weight_kg: f64,
        systolic: u16,
        diastolic: u16,
    ) -> Self {
        let height_cm = HEIGHT_CM.clamp(height_cm);
        let weight_kg = WEIGHT_KG.clamp(weight_kg);

        HealthRecord {
            date,
            height_cm,
            weight_kg,
            bmi: round_one_decimal(compute_bmi(height_cm, weight_kg)),
            systolic: SYSTOLIC.clamp(f64::from(systolic)) as u16,
            diastolic: DIASTOLIC.clamp(f64::from(diastolic)) as u16,
        }
    }

    /// Status of the stored (rounded) BMI
    pub fn status(&self) -> BmiStatus {
        BmiStatus::from_bmi(self.bmi)
    }

    /// Selector label, e.g. "2024-03-01 - 65.0kg"
    pub fn label(&self) -> String {
        format!("{} - {:.1}kg", self.date.format("%Y-%m-%d"), self.weight_kg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn test_record_snapshots_rounded_bmi() {
        let record = HealthRecord::new(day(1), 170.0, 65.0, 120, 80);

        assert_eq!(record.bmi, 22.5);
        assert_eq!(record.status(), BmiStatus::Normal);
        assert_eq!(record.systolic, 120);
        assert_eq!(record.diastolic, 80);
    }

    #[test]
    fn test_record_clamps_measurements() {
        let low = HealthRecord::new(day(1), 50.0, 10.0, 20, 10);
        assert_eq!(low.height_cm, 100.0);
        assert_eq!(low.weight_kg, 30.0);
        assert_eq!(low.systolic, 80);
        assert_eq!(low.diastolic, 50);
        assert_eq!(low.bmi, 30.0);

        let high = HealthRecord::new(day(1), 300.0, 500.0, 400, 300);
        assert_eq!(high.height_cm, 250.0);
        assert_eq!(high.weight_kg, 200.0);
        assert_eq!(high.systolic, 200);
        assert_eq!(high.diastolic, 150);
        assert_eq!(high.bmi, 32.0);
    }

    #[test]
    fn test_record_label() {
        let record = HealthRecord::new(day(9), 160.0, 85.0, 130, 85);
        assert_eq!(record.label(), "2024-03-09 - 85.0kg");
        assert_eq!(record.bmi, 33.2);
    }

    #[test]
    fn test_bounds() {
        assert!(HEIGHT_CM.contains(170.0));
        assert!(!WEIGHT_KG.contains(29.9));
        assert_eq!(SYSTOLIC.clamp(79.0), 80.0);
    }
}
