//! Immutable calculation settings shared by every calculator.
//!
//! A `MortgageConfig` is built once (defaults, or parsed from JSON/YAML) and
//! then only ever read. Partial documents are accepted: any field that is
//! missing keeps its default value.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::annuity::{MAX_ANNUAL_RATE, MAX_TERM_YEARS};
use crate::error::MortgageError;
use crate::types::{Money, Percent};
use crate::MortgageResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Debt-to-income ceilings, as percentages of gross monthly income.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DtiLimits {
    /// Front-end ratio: housing payment only.
    pub housing: Percent,
    /// Back-end ratio: housing payment plus all other monthly debts.
    pub total: Percent,
}

impl Default for DtiLimits {
    fn default() -> Self {
        Self {
            housing: dec!(28),
            total: dec!(36),
        }
    }
}

/// Baseline values used when a caller leaves an input unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub home_price: Money,
    /// Share of the home price assumed as down payment when none is given.
    pub down_payment_percent: Percent,
    pub interest_rate: Percent,
    pub property_tax_rate: Percent,
    pub home_insurance_year: Money,
    /// Annual PMI premium as a percentage of the loan amount.
    pub pmi_rate: Percent,
    /// PMI applies while the rounded down payment percentage is below this.
    pub pmi_equity_threshold: Percent,
    /// Term assumed by the affordability solver, which takes no term input.
    pub term_years: u32,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            home_price: dec!(400_000),
            down_payment_percent: dec!(20),
            interest_rate: dec!(6.5),
            property_tax_rate: dec!(1.2),
            home_insurance_year: dec!(1_500),
            pmi_rate: dec!(0.5),
            pmi_equity_threshold: dec!(20),
            term_years: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MortgageConfig {
    /// Term lengths, in years, offered for purchase loans.
    pub loan_terms: Vec<u32>,
    pub dti_limits: DtiLimits,
    pub defaults: Defaults,
}

impl Default for MortgageConfig {
    fn default() -> Self {
        Self {
            loan_terms: vec![15, 20, 30],
            dti_limits: DtiLimits::default(),
            defaults: Defaults::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

impl MortgageConfig {
    /// Parse a JSON document and validate the result.
    pub fn from_json(text: &str) -> MortgageResult<Self> {
        let config: MortgageConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a YAML document and validate the result.
    pub fn from_yaml(text: &str) -> MortgageResult<Self> {
        let config: MortgageConfig = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> MortgageResult<()> {
        if self.loan_terms.is_empty() {
            return Err(MortgageError::InvalidConfig(
                "loan_terms must list at least one term".into(),
            ));
        }
        if let Some(bad) = self
            .loan_terms
            .iter()
            .find(|t| **t == 0 || **t > MAX_TERM_YEARS)
        {
            return Err(MortgageError::InvalidConfig(format!(
                "loan term {bad} is outside 1..={MAX_TERM_YEARS} years"
            )));
        }

        let dti = &self.dti_limits;
        if dti.housing <= Decimal::ZERO || dti.total <= Decimal::ZERO {
            return Err(MortgageError::InvalidConfig(
                "DTI limits must be positive".into(),
            ));
        }
        if dti.housing > dti.total {
            return Err(MortgageError::InvalidConfig(format!(
                "housing DTI limit {}% exceeds total DTI limit {}%",
                dti.housing, dti.total
            )));
        }
        if dti.total > dec!(100) {
            return Err(MortgageError::InvalidConfig(
                "total DTI limit cannot exceed 100%".into(),
            ));
        }

        let d = &self.defaults;
        let non_negative = [
            ("defaults.home_price", d.home_price),
            ("defaults.down_payment_percent", d.down_payment_percent),
            ("defaults.interest_rate", d.interest_rate),
            ("defaults.property_tax_rate", d.property_tax_rate),
            ("defaults.home_insurance_year", d.home_insurance_year),
            ("defaults.pmi_rate", d.pmi_rate),
            ("defaults.pmi_equity_threshold", d.pmi_equity_threshold),
        ];
        for (name, value) in non_negative {
            if value < Decimal::ZERO {
                return Err(MortgageError::InvalidConfig(format!(
                    "{name} cannot be negative"
                )));
            }
        }
        if d.down_payment_percent > dec!(100) || d.pmi_equity_threshold > dec!(100) {
            return Err(MortgageError::InvalidConfig(
                "percentage-of-price defaults cannot exceed 100".into(),
            ));
        }
        if d.interest_rate > MAX_ANNUAL_RATE {
            return Err(MortgageError::InvalidConfig(format!(
                "default interest rate cannot exceed {MAX_ANNUAL_RATE}%"
            )));
        }
        if d.term_years == 0 || d.term_years > MAX_TERM_YEARS {
            return Err(MortgageError::InvalidConfig(format!(
                "default term must be within 1..={MAX_TERM_YEARS} years"
            )));
        }
        if !self.loan_terms.contains(&d.term_years) {
            return Err(MortgageError::InvalidConfig(format!(
                "default term of {} years is not among loan_terms {:?}",
                d.term_years, self.loan_terms
            )));
        }
        Ok(())
    }

    /// Reject purchase terms the configuration does not offer.
    pub fn check_loan_term(&self, term_years: u32) -> MortgageResult<()> {
        if self.loan_terms.contains(&term_years) {
            Ok(())
        } else {
            Err(MortgageError::InvalidInput {
                field: "term_years".into(),
                reason: format!(
                    "{term_years}-year term is not offered (available: {:?})",
                    self.loan_terms
                ),
            })
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config_is_valid() {
        let config = MortgageConfig::default();
        config.validate().unwrap();
        assert_eq!(config.loan_terms, vec![15, 20, 30]);
        assert_eq!(config.dti_limits.housing, dec!(28));
    }

    #[test]
    fn test_partial_json_merges_over_defaults() {
        let config = MortgageConfig::from_json(r#"{"dti_limits": {"total": 43}}"#).unwrap();
        assert_eq!(config.dti_limits.housing, dec!(28));
        assert_eq!(config.dti_limits.total, dec!(43));
        assert_eq!(config.defaults, Defaults::default());
    }

    #[test]
    fn test_yaml_config() {
        let yaml = "loan_terms: [10, 15, 30]\ndefaults:\n  pmi_rate: 0.75\n";
        let config = MortgageConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.loan_terms, vec![10, 15, 30]);
        assert_eq!(config.defaults.pmi_rate, dec!(0.75));
        assert_eq!(config.defaults.interest_rate, dec!(6.5));
    }

    #[test]
    fn test_housing_above_total_rejected() {
        let err = MortgageConfig::from_json(r#"{"dti_limits": {"housing": 40, "total": 36}}"#)
            .unwrap_err();
        assert!(matches!(err, MortgageError::InvalidConfig(_)));
    }

    #[test]
    fn test_empty_loan_terms_rejected() {
        let config = MortgageConfig {
            loan_terms: vec![],
            ..MortgageConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_term_beyond_supported_range_rejected() {
        let config = MortgageConfig {
            loan_terms: vec![30, 60],
            ..MortgageConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_term_must_be_offered() {
        let err = MortgageConfig::from_yaml("loan_terms: [15, 20]\n").unwrap_err();
        match err {
            MortgageError::InvalidConfig(msg) => assert!(msg.contains("30")),
            other => panic!("Expected InvalidConfig, got {other:?}"),
        }

        let yaml = "loan_terms: [15, 20]\ndefaults:\n  term_years: 20\n";
        let config = MortgageConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.defaults.term_years, 20);
    }

    #[test]
    fn test_malformed_json_is_serialization_error() {
        let err = MortgageConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, MortgageError::SerializationError(_)));
    }

    #[test]
    fn test_check_loan_term() {
        let config = MortgageConfig::default();
        assert!(config.check_loan_term(30).is_ok());
        match config.check_loan_term(25).unwrap_err() {
            MortgageError::InvalidInput { field, .. } => assert_eq!(field, "term_years"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }
}
