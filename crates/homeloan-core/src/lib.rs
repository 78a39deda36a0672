pub mod annuity;
pub mod config;
pub mod error;
pub mod types;

#[cfg(feature = "payment")]
pub mod payment;

#[cfg(feature = "affordability")]
pub mod affordability;

#[cfg(feature = "amortization")]
pub mod amortization;

#[cfg(feature = "refinance")]
pub mod refinance;

#[cfg(all(
    feature = "payment",
    feature = "affordability",
    feature = "amortization",
    feature = "refinance"
))]
pub mod engine;

pub use config::MortgageConfig;
pub use error::MortgageError;
pub use types::*;

#[cfg(all(
    feature = "payment",
    feature = "affordability",
    feature = "amortization",
    feature = "refinance"
))]
pub use engine::MortgageEngine;

/// Standard result type for all homeloan operations
pub type MortgageResult<T> = Result<T, MortgageError>;
