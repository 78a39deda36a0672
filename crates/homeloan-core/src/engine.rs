//! A calculator bound to one validated configuration.

use crate::affordability::{self, AffordabilityInput, AffordabilityOutput};
use crate::amortization::{self, AmortizationInput, AmortizationOutput};
use crate::config::MortgageConfig;
use crate::payment::{self, MortgageOutput, PurchaseInput};
use crate::refinance::{self, RefinanceInput, RefinanceOutput};
use crate::types::ComputationOutput;
use crate::MortgageResult;

/// Holds the configuration so callers do not have to thread it through
/// every call. Cheap to clone and safe to share across threads.
#[derive(Debug, Clone, Default)]
pub struct MortgageEngine {
    config: MortgageConfig,
}

impl MortgageEngine {
    pub fn new(config: MortgageConfig) -> MortgageResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &MortgageConfig {
        &self.config
    }

    pub fn mortgage(
        &self,
        input: &PurchaseInput,
    ) -> MortgageResult<ComputationOutput<MortgageOutput>> {
        payment::calculate_mortgage(&self.config, input)
    }

    pub fn affordability(
        &self,
        input: &AffordabilityInput,
    ) -> MortgageResult<ComputationOutput<AffordabilityOutput>> {
        affordability::calculate_affordability(&self.config, input)
    }

    pub fn amortization(
        &self,
        input: &AmortizationInput,
    ) -> MortgageResult<ComputationOutput<AmortizationOutput>> {
        amortization::generate_amortization_schedule(input)
    }

    pub fn refinance(
        &self,
        input: &RefinanceInput,
    ) -> MortgageResult<ComputationOutput<RefinanceOutput>> {
        refinance::calculate_refinance(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MortgageError;
    use rust_decimal_macros::dec;

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = MortgageConfig::default();
        config.dti_limits.housing = dec!(50);
        let err = MortgageEngine::new(config).unwrap_err();
        assert!(matches!(err, MortgageError::InvalidConfig(_)));
    }

    #[test]
    fn test_bound_config_drives_calculations() {
        let mut config = MortgageConfig::default();
        config.loan_terms = vec![10];
        config.defaults.term_years = 10;
        let engine = MortgageEngine::new(config).unwrap();

        let out = engine.mortgage(&PurchaseInput::new(dec!(300_000))).unwrap();
        assert_eq!(out.assumptions["term_years"], 10);

        let mut input = PurchaseInput::new(dec!(300_000));
        input.term_years = Some(30);
        assert!(engine.mortgage(&input).is_err());
    }

    #[test]
    fn test_engine_is_shareable_across_threads() {
        let engine = std::sync::Arc::new(MortgageEngine::default());
        let handles: Vec<_> = (1..=4u32)
            .map(|i| {
                let engine = engine.clone();
                std::thread::spawn(move || {
                    engine
                        .refinance(&RefinanceInput {
                            current_balance: dec!(200_000),
                            current_rate: dec!(7),
                            remaining_years: 20,
                            new_rate: dec!(6),
                            closing_costs: rust_decimal::Decimal::from(i * 1_000),
                        })
                        .unwrap()
                        .result
                        .break_even
                })
            })
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap().months().is_some());
        }
    }
}
