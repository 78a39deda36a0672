use homeloan_core::affordability::{self, AffordabilityInput, DtiConstraint};
use homeloan_core::amortization::{self, AmortizationInput};
use homeloan_core::payment::{self, PurchaseInput};
use homeloan_core::refinance::{self, BreakEven, RefinanceInput};
use homeloan_core::{MortgageConfig, MortgageEngine, MortgageError};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Purchase -> schedule
// ===========================================================================

#[test]
fn test_purchase_and_schedule_agree() {
    // 400k home, 20% down, 6.5% over 30y: loan 320k, P&I ~2,022.62
    let mut input = PurchaseInput::new(dec!(400_000));
    input.annual_rate = Some(dec!(6.5));
    input.term_years = Some(30);
    let purchase = payment::calculate_mortgage(&MortgageConfig::default(), &input)
        .unwrap()
        .result;
    assert_eq!(purchase.loan_amount, dec!(320_000));
    assert!(
        (purchase.monthly_pi - dec!(2022.62)).abs() < dec!(0.01),
        "Expected P&I ~2,022.62, got {}",
        purchase.monthly_pi
    );
    // 400k * 1.2% / 12 = 400; 1,500 / 12 = 125
    assert_eq!(purchase.monthly_tax, dec!(400));
    assert_eq!(purchase.monthly_insurance, dec!(125));
    assert!(!purchase.has_pmi);

    let schedule = amortization::generate_amortization_schedule(&AmortizationInput {
        loan_amount: purchase.loan_amount,
        annual_rate: dec!(6.5),
        term_years: 30,
        include_monthly: false,
    })
    .unwrap()
    .result;
    assert_eq!(schedule.monthly_payment, purchase.monthly_pi);
    assert_eq!(schedule.total_payments, purchase.total_payments);
    assert!((schedule.total_interest - purchase.total_interest).abs() < dec!(0.01));
}

// ===========================================================================
// Affordability -> purchase
// ===========================================================================

#[test]
fn test_buying_at_max_price_hits_payment_capacity() {
    let config = MortgageConfig::default();
    let afford = affordability::calculate_affordability(
        &config,
        &AffordabilityInput {
            annual_income: dec!(150_000),
            monthly_debts: dec!(800),
            down_payment: dec!(60_000),
            annual_rate: Some(dec!(7)),
        },
    )
    .unwrap()
    .result;
    // front = 3,500; back = 4,500 - 800 = 3,700
    assert_eq!(afford.binding_constraint, DtiConstraint::Housing);
    assert_eq!(afford.max_monthly_payment, dec!(3_500));

    let mut purchase = PurchaseInput::new(afford.max_home_price);
    purchase.down_payment = Some(afford.down_payment);
    purchase.annual_rate = Some(dec!(7));
    purchase.term_years = Some(afford.term_years);
    let out = payment::calculate_mortgage(&config, &purchase).unwrap().result;
    assert!(
        (out.monthly_pi - afford.max_monthly_payment).abs() < dec!(0.0001),
        "P&I at the max price should equal capacity, got {}",
        out.monthly_pi
    );
}

// ===========================================================================
// Refinance
// ===========================================================================

#[test]
fn test_refinance_current_payment_matches_schedule() {
    let refi = refinance::calculate_refinance(&RefinanceInput {
        current_balance: dec!(250_000),
        current_rate: dec!(7.25),
        remaining_years: 27,
        new_rate: dec!(6),
        closing_costs: dec!(4_500),
    })
    .unwrap();
    let schedule = amortization::generate_amortization_schedule(&AmortizationInput {
        loan_amount: dec!(250_000),
        annual_rate: dec!(7.25),
        term_years: 27,
        include_monthly: false,
    })
    .unwrap()
    .result;
    assert_eq!(refi.result.current_payment, schedule.monthly_payment);
    let months = refi.result.break_even.months().unwrap();
    assert!(Decimal::from(months) * refi.result.monthly_savings >= dec!(4_500));
    assert!(Decimal::from(months - 1) * refi.result.monthly_savings < dec!(4_500));
}

#[test]
fn test_refinance_envelope_json_shape() {
    let out = refinance::calculate_refinance(&RefinanceInput {
        current_balance: dec!(200_000),
        current_rate: dec!(5),
        remaining_years: 20,
        new_rate: dec!(6),
        closing_costs: dec!(3_000),
    })
    .unwrap();
    assert_eq!(out.result.break_even, BreakEven::Never);
    let json = serde_json::to_value(&out).unwrap();
    assert_eq!(json["result"]["break_even"], serde_json::json!("never"));
    assert_eq!(json["metadata"]["precision"], "rust_decimal_128bit");
    assert_eq!(json["warnings"].as_array().unwrap().len(), 1);
}

// ===========================================================================
// Engine with a loaded configuration
// ===========================================================================

#[test]
fn test_engine_with_yaml_config() {
    let yaml = "loan_terms: [10, 15]\ndefaults:\n  term_years: 15\n";
    let engine = MortgageEngine::new(MortgageConfig::from_yaml(yaml).unwrap()).unwrap();

    let mut input = PurchaseInput::new(dec!(300_000));
    input.term_years = Some(10);
    assert!(engine.mortgage(&input).is_ok());

    input.term_years = Some(30);
    match engine.mortgage(&input).unwrap_err() {
        MortgageError::InvalidInput { field, .. } => assert_eq!(field, "term_years"),
        other => panic!("Expected InvalidInput, got {other:?}"),
    }
}

#[test]
fn test_engine_rejects_inverted_dti_limits() {
    let json = r#"{"dti_limits": {"housing": "40", "total": "36"}}"#;
    let err = MortgageConfig::from_json(json).unwrap_err();
    assert!(matches!(err, MortgageError::InvalidConfig(_)));
}
