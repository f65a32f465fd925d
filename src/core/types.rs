use serde::{Deserialize, Serialize};

/// The three user-adjustable inputs of the loan calculator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanTerms {
    pub principal: f64,
    pub annual_rate_percent: f64,
    pub term_months: u32,
}

/// Derived outputs, always recomputed as a whole from [`LoanTerms`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanQuote {
    pub monthly_payment: f64,
    pub total_payment: f64,
    pub total_interest: f64,
}

/// Bounds and step of a slider-style real-valued input.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SliderRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl SliderRange {
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

/// Bounds and step of the term slider, in whole months.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TermRange {
    pub min: u32,
    pub max: u32,
    pub step: u32,
}

impl TermRange {
    pub fn clamp(&self, value: u32) -> u32 {
        value.clamp(self.min, self.max)
    }
}

/// Configured input ranges for the calculator widget.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorLimits {
    pub principal: SliderRange,
    pub annual_rate_percent: SliderRange,
    pub term_months: TermRange,
}

impl Default for CalculatorLimits {
    fn default() -> Self {
        Self {
            principal: SliderRange {
                min: 10_000.0,
                max: 10_000_000.0,
                step: 10_000.0,
            },
            annual_rate_percent: SliderRange {
                min: 1.0,
                max: 30.0,
                step: 0.1,
            },
            term_months: TermRange {
                min: 3,
                max: 360,
                step: 3,
            },
        }
    }
}
