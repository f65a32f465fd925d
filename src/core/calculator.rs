use super::types::{CalculatorLimits, LoanQuote, LoanTerms};

/// Inputs the calculator starts from on first display.
pub const DEFAULT_TERMS: LoanTerms = LoanTerms {
    principal: 100_000.0,
    annual_rate_percent: 10.0,
    term_months: 12,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum QuoteError {
    #[error("{field} {requirement}")]
    InvalidInput {
        field: &'static str,
        requirement: &'static str,
    },
    #[error("quote exceeds the representable numeric range")]
    Overflow,
}

/// Fixed monthly payment and totals for an amortizing loan.
///
/// Out-of-domain inputs (principal <= 0, rate <= 0, term < 1, or non-finite
/// values) are rejected with [`QuoteError::InvalidInput`]; nothing is clamped.
/// A result whose outputs are not finite is reported as
/// [`QuoteError::Overflow`] instead of being returned.
pub fn quote(terms: LoanTerms) -> Result<LoanQuote, QuoteError> {
    validate(terms)?;

    let monthly_rate = terms.annual_rate_percent / 100.0 / 12.0;
    let growth = (1.0 + monthly_rate).powi(terms.term_months as i32);
    let monthly_payment = terms.principal * monthly_rate * growth / (growth - 1.0);
    let total_payment = monthly_payment * terms.term_months as f64;
    let total_interest = total_payment - terms.principal;

    if !monthly_payment.is_finite() || !total_payment.is_finite() || !total_interest.is_finite() {
        return Err(QuoteError::Overflow);
    }

    Ok(LoanQuote {
        monthly_payment,
        total_payment,
        total_interest,
    })
}

fn validate(terms: LoanTerms) -> Result<(), QuoteError> {
    if !terms.principal.is_finite() || terms.principal <= 0.0 {
        return Err(QuoteError::InvalidInput {
            field: "principal",
            requirement: "must be a finite amount greater than zero",
        });
    }
    if !terms.annual_rate_percent.is_finite() || terms.annual_rate_percent <= 0.0 {
        return Err(QuoteError::InvalidInput {
            field: "annualRatePercent",
            requirement: "must be a finite rate greater than zero",
        });
    }
    if terms.term_months < 1 {
        return Err(QuoteError::InvalidInput {
            field: "termMonths",
            requirement: "must be at least 1",
        });
    }
    Ok(())
}

/// Widget state: the current inputs and the quote derived from them.
///
/// Every update clamps the new value to the configured slider range, then
/// replaces inputs and outputs together; a failed update leaves the previous
/// state intact, so the quote can never be read out of sync with the inputs.
#[derive(Debug, Clone)]
pub struct CalculatorState {
    limits: CalculatorLimits,
    terms: LoanTerms,
    quote: LoanQuote,
}

impl CalculatorState {
    pub fn new(limits: CalculatorLimits) -> Result<Self, QuoteError> {
        let terms = LoanTerms {
            principal: limits.principal.clamp(DEFAULT_TERMS.principal),
            annual_rate_percent: limits
                .annual_rate_percent
                .clamp(DEFAULT_TERMS.annual_rate_percent),
            term_months: limits.term_months.clamp(DEFAULT_TERMS.term_months),
        };
        let quote = quote(terms)?;
        Ok(Self {
            limits,
            terms,
            quote,
        })
    }

    pub fn limits(&self) -> &CalculatorLimits {
        &self.limits
    }

    pub fn terms(&self) -> LoanTerms {
        self.terms
    }

    pub fn quote(&self) -> LoanQuote {
        self.quote
    }

    pub fn set_principal(&mut self, value: f64) -> Result<(), QuoteError> {
        self.apply(LoanTerms {
            principal: self.limits.principal.clamp(value),
            ..self.terms
        })
    }

    pub fn set_annual_rate_percent(&mut self, value: f64) -> Result<(), QuoteError> {
        self.apply(LoanTerms {
            annual_rate_percent: self.limits.annual_rate_percent.clamp(value),
            ..self.terms
        })
    }

    pub fn set_term_months(&mut self, value: u32) -> Result<(), QuoteError> {
        self.apply(LoanTerms {
            term_months: self.limits.term_months.clamp(value),
            ..self.terms
        })
    }

    fn apply(&mut self, terms: LoanTerms) -> Result<(), QuoteError> {
        self.quote = quote(terms)?;
        self.terms = terms;
        Ok(())
    }
}
