// ⚖️ BMI Classifier
// weight(kg) / height(m)², bucketed into five statuses.
//
// Buckets are half-open and checked in ascending order, so a value sitting
// exactly on a threshold (18.5, 23, 25, 30) lands in the upper bucket.

/// Reference range shown next to the live reading
pub const NORMAL_RANGE_LABEL: &str = "18.5–22.9";

const UNDERWEIGHT_BELOW: f64 = 18.5;
const NORMAL_BELOW: f64 = 23.0;
const OVERWEIGHT_BELOW: f64 = 25.0;
const OBESE_BELOW: f64 = 30.0;

// ============================================================================
// STATUS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BmiStatus {
    Underweight,
    Normal,
    Overweight,
    Obese,
    SeverelyObese,
}

impl BmiStatus {
    /// Classify a BMI value (first matching bucket wins)
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < UNDERWEIGHT_BELOW {
            BmiStatus::Underweight
        } else if bmi < NORMAL_BELOW {
            BmiStatus::Normal
        } else if bmi < OVERWEIGHT_BELOW {
            BmiStatus::Overweight
        } else if bmi < OBESE_BELOW {
            BmiStatus::Obese
        } else {
            BmiStatus::SeverelyObese
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BmiStatus::Underweight => "Underweight",
            BmiStatus::Normal => "Normal",
            BmiStatus::Overweight => "Overweight",
            BmiStatus::Obese => "Obese",
            BmiStatus::SeverelyObese => "Severely obese",
        }
    }

    pub fn indicator(&self) -> &'static str {
        match self {
            BmiStatus::Underweight => "🔵",
            BmiStatus::Normal => "🟢",
            BmiStatus::Overweight => "🟡",
            BmiStatus::Obese => "🟠",
            BmiStatus::SeverelyObese => "🔴",
        }
    }
}

impl std::fmt::Display for BmiStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Status and indicator for a BMI value
pub fn classify(bmi: f64) -> (BmiStatus, &'static str) {
    let status = BmiStatus::from_bmi(bmi);
    (status, status.indicator())
}

// ============================================================================
// COMPUTATION
// ============================================================================

/// Unrounded BMI for a height in centimetres and a weight in kilograms
pub fn compute_bmi(height_cm: f64, weight_kg: f64) -> f64 {
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

/// Round half away from zero to one decimal place
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// A live BMI value together with its classification
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BmiReading {
    pub bmi: f64,
    pub status: BmiStatus,
}

impl BmiReading {
    pub fn from_measurements(height_cm: f64, weight_kg: f64) -> Self {
        let bmi = compute_bmi(height_cm, weight_kg);
        BmiReading {
            bmi,
            status: BmiStatus::from_bmi(bmi),
        }
    }

    /// BMI formatted for display, e.g. "22.5"
    pub fn display_value(&self) -> String {
        format!("{:.1}", self.bmi)
    }
}

// ============================================================================
// TESTS
// ============================================================================
