use serde_json::{Map, Value};

use crate::{PredictErr, Result};

/// The name of the sole model input.
pub const FEATURE_KEY: &str = "YearsExperience";

/// The key some callers use to wrap a single record in a batch shaped envelope.
pub const ENVELOPE_KEY: &str = "data";

/// A validated, finite model input.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Feature(f64);

impl Feature {
    /// Creates a new `Feature`.
    ///
    /// # Arguments
    /// * `value` - The years of experience.
    ///
    /// # Returns
    /// The feature or an `InvalidValue` error if `value` is not finite.
    pub fn new(value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(PredictErr::invalid(
                FEATURE_KEY,
                format!("{value} is not a finite number"),
            ));
        }

        Ok(Self(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

/// Extra domain checks a call site opts into before the pipeline runs.
///
/// The network endpoint historically accepted negative experience while the form rejected it,
/// both call sites now state their choice through this policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationPolicy {
    pub reject_negative_feature: bool,
}

impl ValidationPolicy {
    /// Accepts any finite feature.
    pub fn network() -> Self {
        Self {
            reject_negative_feature: false,
        }
    }

    /// Also rejects negative features.
    pub fn form() -> Self {
        Self {
            reject_negative_feature: true,
        }
    }
}

/// Normalizes a raw payload into a feature using the permissive network policy.
///
/// # Arguments
/// * `payload` - The decoded request body.
///
/// # Returns
/// The feature or the reason the payload was rejected.
pub fn normalize(payload: &Value) -> Result<Feature> {
    normalize_with(payload, ValidationPolicy::network())
}

/// Normalizes a raw payload into a feature.
///
/// Payloads of the form `{"data": [record, ...]}` are unwrapped to their first record, any other
/// record is dropped.
///
/// # Arguments
/// * `payload` - The decoded request body.
/// * `policy` - Extra checks to apply to the parsed value.
///
/// # Returns
/// The feature or the reason the payload was rejected.
pub fn normalize_with(payload: &Value, policy: ValidationPolicy) -> Result<Feature> {
    let record = unwrap_envelope(as_record(payload)?)?;

    let raw = record
        .get(FEATURE_KEY)
        .ok_or(PredictErr::MissingField { key: FEATURE_KEY })?;

    let feature = Feature::new(parse_number(raw)?)?;

    if policy.reject_negative_feature && feature.value() < 0.0 {
        return Err(PredictErr::invalid(
            FEATURE_KEY,
            "experience cannot be negative",
        ));
    }

    Ok(feature)
}

fn as_record(payload: &Value) -> Result<&Map<String, Value>> {
    match payload {
        Value::Object(map) => Ok(map),
        Value::Null => Err(PredictErr::malformed(format!(
            "request must be JSON with '{FEATURE_KEY}' or a nested '{ENVELOPE_KEY}' payload"
        ))),
        other => Err(PredictErr::malformed(format!(
            "expected a JSON object, got {}",
            type_name(other)
        ))),
    }
}

fn unwrap_envelope(record: &Map<String, Value>) -> Result<&Map<String, Value>> {
    let Some(Value::Array(items)) = record.get(ENVELOPE_KEY) else {
        return Ok(record);
    };

    let Some(first) = items.first() else {
        return Ok(record);
    };

    match first {
        Value::Object(inner) => Ok(inner),
        other => Err(PredictErr::malformed(format!(
            "'{ENVELOPE_KEY}' records must be JSON objects, got {}",
            type_name(other)
        ))),
    }
}

fn parse_number(raw: &Value) -> Result<f64> {
    match raw {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| PredictErr::invalid(FEATURE_KEY, format!("{n} is not representable"))),
        Value::String(s) => s.trim().parse::<f64>().map_err(|_| {
            PredictErr::invalid(FEATURE_KEY, format!("could not convert '{s}' to a number"))
        }),
        other => Err(PredictErr::invalid(
            FEATURE_KEY,
            format!("expected a number, got {}", type_name(other)),
        )),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::ErrorKind;

    fn kind(payload: Value) -> ErrorKind {
        normalize(&payload).unwrap_err().kind()
    }

    #[test]
    fn plain_number_is_accepted() {
        let feature = normalize(&json!({ "YearsExperience": 5.5 })).unwrap();
        assert_eq!(feature.value(), 5.5);
    }

    #[test]
    fn integer_is_accepted() {
        let feature = normalize(&json!({ "YearsExperience": 5 })).unwrap();
        assert_eq!(feature.value(), 5.0);
    }

    #[test]
    fn numeric_string_is_accepted() {
        let feature = normalize(&json!({ "YearsExperience": " 7.25 " })).unwrap();
        assert_eq!(feature.value(), 7.25);
    }

    #[test]
    fn null_and_scalars_are_malformed() {
        assert_eq!(kind(Value::Null), ErrorKind::MalformedRequest);
        assert_eq!(kind(json!(3.0)), ErrorKind::MalformedRequest);
        assert_eq!(kind(json!("YearsExperience")), ErrorKind::MalformedRequest);
        assert_eq!(kind(json!([{ "YearsExperience": 1 }])), ErrorKind::MalformedRequest);
    }

    #[test]
    fn missing_key_names_the_feature() {
        let err = normalize(&json!({ "years": 3 })).unwrap_err();
        assert_eq!(err, PredictErr::MissingField { key: FEATURE_KEY });
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert_eq!(kind(json!({ "YearsExperience": "abc" })), ErrorKind::InvalidValue);
        assert_eq!(kind(json!({ "YearsExperience": null })), ErrorKind::InvalidValue);
        assert_eq!(kind(json!({ "YearsExperience": true })), ErrorKind::InvalidValue);
        assert_eq!(kind(json!({ "YearsExperience": [1] })), ErrorKind::InvalidValue);
        assert_eq!(kind(json!({ "YearsExperience": "" })), ErrorKind::InvalidValue);
    }

    #[test]
    fn non_finite_strings_are_rejected() {
        for s in ["nan", "NaN", "inf", "-infinity", "1e400"] {
            assert_eq!(
                kind(json!({ "YearsExperience": s })),
                ErrorKind::InvalidValue,
                "{s}"
            );
        }
    }

    #[test]
    fn envelope_keeps_only_the_first_record() {
        let payload = json!({
            "data": [{ "YearsExperience": 3.0 }, { "YearsExperience": 99.0 }]
        });

        assert_eq!(normalize(&payload).unwrap().value(), 3.0);
    }

    #[test]
    fn envelope_record_must_be_an_object() {
        assert_eq!(kind(json!({ "data": [4.0] })), ErrorKind::MalformedRequest);
    }

    #[test]
    fn empty_or_scalar_envelope_is_ignored() {
        let payload = json!({ "data": [], "YearsExperience": 2 });
        assert_eq!(normalize(&payload).unwrap().value(), 2.0);

        let payload = json!({ "data": "x", "YearsExperience": 4 });
        assert_eq!(normalize(&payload).unwrap().value(), 4.0);

        assert_eq!(kind(json!({ "data": [] })), ErrorKind::MissingField);
    }

    #[test]
    fn envelope_missing_feature() {
        assert_eq!(kind(json!({ "data": [{}] })), ErrorKind::MissingField);
    }

    #[test]
    fn negatives_depend_on_policy() {
        let payload = json!({ "YearsExperience": -1.5 });

        let feature = normalize_with(&payload, ValidationPolicy::network()).unwrap();
        assert_eq!(feature.value(), -1.5);

        let err = normalize_with(&payload, ValidationPolicy::form()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
        assert!(err.to_string().contains("negative"));
    }

    #[test]
    fn zero_passes_the_form_policy() {
        let payload = json!({ "YearsExperience": 0 });
        let feature = normalize_with(&payload, ValidationPolicy::form()).unwrap();
        assert_eq!(feature.value(), 0.0);
    }

    #[test]
    fn feature_rejects_non_finite() {
        assert!(Feature::new(f64::NAN).is_err());
        assert!(Feature::new(f64::INFINITY).is_err());
        assert!(Feature::new(f64::NEG_INFINITY).is_err());
    }
}
