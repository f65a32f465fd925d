mod calculator;
mod types;

pub use calculator::{CalculatorState, DEFAULT_TERMS, QuoteError, quote};
pub use types::{CalculatorLimits, LoanQuote, LoanTerms, SliderRange, TermRange};
