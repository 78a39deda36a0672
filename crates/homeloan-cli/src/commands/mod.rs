pub mod affordability;
pub mod amortization;
pub mod payment;
pub mod refinance;
