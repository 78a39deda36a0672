use napi::Result as NapiResult;
use napi_derive::napi;

use homeloan_core::{MortgageConfig, MortgageEngine};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Build an engine from an optional JSON config; `None` uses the defaults.
fn engine(config_json: Option<String>) -> NapiResult<MortgageEngine> {
    match config_json {
        Some(text) => {
            let config = MortgageConfig::from_json(&text).map_err(to_napi_error)?;
            MortgageEngine::new(config).map_err(to_napi_error)
        }
        None => Ok(MortgageEngine::default()),
    }
}

// ---------------------------------------------------------------------------
// Purchase
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_mortgage(input_json: String, config_json: Option<String>) -> NapiResult<String> {
    let input: homeloan_core::payment::PurchaseInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = engine(config_json)?
        .mortgage(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn calculate_affordability(
    input_json: String,
    config_json: Option<String>,
) -> NapiResult<String> {
    let input: homeloan_core::affordability::AffordabilityInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = engine(config_json)?
        .affordability(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Existing loans
// ---------------------------------------------------------------------------

#[napi]
pub fn generate_amortization_schedule(input_json: String) -> NapiResult<String> {
    let input: homeloan_core::amortization::AmortizationInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = homeloan_core::amortization::generate_amortization_schedule(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn calculate_refinance(input_json: String) -> NapiResult<String> {
    let input: homeloan_core::refinance::RefinanceInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        homeloan_core::refinance::calculate_refinance(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[napi]
pub fn default_config() -> NapiResult<String> {
    serde_json::to_string(&MortgageConfig::default()).map_err(to_napi_error)
}
