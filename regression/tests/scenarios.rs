use std::sync::Arc;

use regression::{
    ErrorKind, FEATURE_KEY, Pipeline, PredictErr, ValidationPolicy,
    arch::{LinearRegression, PolynomialFeatures},
};
use serde_json::json;

fn linear() -> Pipeline {
    Pipeline::new(Arc::new(LinearRegression::new([9000.0], 50000.0)))
}

fn polynomial() -> Pipeline {
    Pipeline::new(Arc::new(LinearRegression::new([10.0, 2.0, 1.0], 0.0)))
        .with_transform(Arc::new(PolynomialFeatures::new(2, true)))
}

#[test]
fn linear_model_predicts_salary() {
    let out = linear()
        .handle(&json!({ "YearsExperience": 5 }), ValidationPolicy::network())
        .unwrap();

    assert_eq!(out.years_experience, 5.0);
    assert_eq!(out.predicted_salary, 95000.0);
}

#[test]
fn empty_payload_is_missing_the_feature() {
    let err = linear()
        .handle(&json!({}), ValidationPolicy::network())
        .unwrap_err();

    assert_eq!(err, PredictErr::MissingField { key: FEATURE_KEY });
    assert!(err.to_string().contains("YearsExperience"));
}

#[test]
fn non_numeric_feature_is_invalid() {
    let err = linear()
        .handle(
            &json!({ "YearsExperience": "abc" }),
            ValidationPolicy::network(),
        )
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidValue);
}

#[test]
fn polynomial_model_predicts_salary() {
    let out = polynomial()
        .handle(&json!({ "YearsExperience": 2 }), ValidationPolicy::network())
        .unwrap();

    assert_eq!(out.predicted_salary, 18.0);
}

#[test]
fn envelope_is_truncated_to_its_first_record() {
    let payload = json!({
        "data": [{ "YearsExperience": 3.0 }, { "YearsExperience": 99.0 }]
    });

    let out = linear()
        .handle(&payload, ValidationPolicy::network())
        .unwrap();

    assert_eq!(out.years_experience, 3.0);
    assert_eq!(out.predicted_salary, 77000.0);
}

#[test]
fn negative_feature_depends_on_the_caller() {
    let payload = json!({ "YearsExperience": -2 });

    let out = linear()
        .handle(&payload, ValidationPolicy::network())
        .unwrap();
    assert_eq!(out.predicted_salary, 32000.0);

    let err = linear()
        .handle(&payload, ValidationPolicy::form())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidValue);
}
