//! Integration tests for module exports.
//!
//! Verify that public modules and types are accessible via absolute paths
//! and that the re-exports agree with their defining modules.

/// Test that distribution functions are accessible via absolute path.
#[test]
fn test_distribution_exports() {
    use exotic_core::math::distributions::{inverse_norm_cdf, norm_cdf, norm_pdf};

    assert!((norm_cdf(0.0_f64) - 0.5).abs() < 1e-7);
    assert!((norm_pdf(0.0_f64) - 0.398_942_280_4).abs() < 1e-9);
    assert_eq!(inverse_norm_cdf(0.5), exotic_core::math::inverse_norm_cdf(0.5));
}

/// Test that parameter types are re-exported at the crate root.
#[test]
fn test_type_exports() {
    use exotic_core::types::error::ParameterError;
    use exotic_core::types::params::ModelParameters;

    let params: exotic_core::ModelParameters = ModelParameters::new(100.0, 0.05, 0.2, 1.0, 4).unwrap();
    assert_eq!(params.steps(), 4);

    let err: exotic_core::ParameterError = ModelParameters::new(100.0, 0.05, 0.2, 1.0, 0).unwrap_err();
    assert!(matches!(err, ParameterError::InvalidParameter { name: "steps", .. }));
}

/// Test that closed-form references agree with each other.
#[test]
fn test_analytical_exports() {
    use exotic_core::analytical::{black_scholes_call, black_scholes_put, BlackScholes};

    let model = BlackScholes::new(100.0, 0.05, 0.2).unwrap();
    assert_eq!(model.price_call(105.0, 0.5), black_scholes_call(100.0, 105.0, 0.05, 0.2, 0.5));
    assert_eq!(model.price_put(105.0, 0.5), black_scholes_put(100.0, 105.0, 0.05, 0.2, 0.5));
}

/// Test that deserialised parameters are validated.
#[cfg(feature = "serde")]
#[test]
fn test_parameters_deserialise_with_validation() {
    use exotic_core::ModelParameters;

    let params: ModelParameters = toml::from_str(
        "spot = 100.0\nrate = 0.03\nvolatility = 0.25\nexpiry = 2.0\nsteps = 24\n",
    )
    .unwrap();
    assert_eq!(params.expiry(), 2.0);
    assert_eq!(params.steps(), 24);

    let invalid: Result<ModelParameters, _> = toml::from_str(
        "spot = 100.0\nrate = 0.03\nvolatility = -0.25\nexpiry = 2.0\nsteps = 24\n",
    );
    assert!(invalid.is_err());
}
