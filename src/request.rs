// Copyright 2026 Hypermesh Foundation. All rights reserved.
// House Engine - Simulation Request

//! Validated simulation input.
//!
//! A [`SimulationRequest`] can be built three ways: the builder methods,
//! JSON ([`SimulationRequest::from_json`] or any serde deserializer), and
//! decoded form/query pairs ([`SimulationRequest::from_params`]). The last
//! two share one validation path: unknown fields are rejected, threshold and
//! seed inputs may be integers or numeric strings, and an empty string (or
//! `null`) means "absent".

use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, ValidationResult};

pub const DEFAULT_MAX_ITERATIONS: u64 = 10_000_000;

const FIELDS: [&str; 7] = [
    "initial_spare_tokens",
    "stop_on_counter_threshold",
    "stop_on_resource_a_threshold",
    "stop_on_resource_b_threshold",
    "stop_on_mana_threshold",
    "seed",
    "max_iterations",
];

/// Short form keys accepted by [`SimulationRequest::from_params`].
const PARAM_ALIASES: [(&str, &str); 2] = [
    ("untapped", "initial_spare_tokens"),
    ("stop_at_100", "stop_on_counter_threshold"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RequestObject")]
pub struct SimulationRequest {
    initial_spare_tokens: u64,
    stop_on_counter_threshold: bool,
    stop_on_resource_a_threshold: Option<u64>,
    stop_on_resource_b_threshold: Option<u64>,
    stop_on_mana_threshold: Option<u64>,
    seed: Option<i64>,
    max_iterations: u64,
}

impl SimulationRequest {
    /// Request with every stop condition disabled, no seed and the default
    /// iteration cap.
    pub fn new(initial_spare_tokens: u64) -> Self {
        Self {
            initial_spare_tokens,
            stop_on_counter_threshold: false,
            stop_on_resource_a_threshold: None,
            stop_on_resource_b_threshold: None,
            stop_on_mana_threshold: None,
            seed: None,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    pub fn with_counter_stop(mut self, enabled: bool) -> Self {
        self.stop_on_counter_threshold = enabled;
        self
    }

    pub fn with_resource_a_threshold(mut self, threshold: Option<u64>) -> Self {
        self.stop_on_resource_a_threshold = threshold;
        self
    }

    pub fn with_resource_b_threshold(mut self, threshold: Option<u64>) -> Self {
        self.stop_on_resource_b_threshold = threshold;
        self
    }

    pub fn with_mana_threshold(mut self, threshold: Option<u64>) -> Self {
        self.stop_on_mana_threshold = threshold;
        self
    }

    pub fn with_seed(mut self, seed: Option<i64>) -> Self {
        self.seed = seed;
        self
    }

    /// The cap is raised to 1 if `max_iterations` is 0.
    pub fn with_max_iterations(mut self, max_iterations: u64) -> Self {
        self.max_iterations = max_iterations.max(1);
        self
    }

    pub fn initial_spare_tokens(&self) -> u64 {
        self.initial_spare_tokens
    }

    pub fn stop_on_counter_threshold(&self) -> bool {
        self.stop_on_counter_threshold
    }

    pub fn stop_on_resource_a_threshold(&self) -> Option<u64> {
        self.stop_on_resource_a_threshold
    }

    pub fn stop_on_resource_b_threshold(&self) -> Option<u64> {
        self.stop_on_resource_b_threshold
    }

    pub fn stop_on_mana_threshold(&self) -> Option<u64> {
        self.stop_on_mana_threshold
    }

    pub fn seed(&self) -> Option<i64> {
        self.seed
    }

    pub fn max_iterations(&self) -> u64 {
        self.max_iterations
    }

    /// Parses and validates a JSON object. Any other JSON value is malformed.
    pub fn from_json(input: &str) -> ValidationResult<Self> {
        match serde_json::from_str::<serde_json::Value>(input)? {
            serde_json::Value::Object(object) => Self::try_from(object),
            other => Err(ValidationError::Malformed {
                reason: format!("expected a JSON object, found {}", json_kind(&other)),
            }),
        }
    }

    /// Builds a request from decoded form or query-string pairs.
    ///
    /// Every value is text. Booleans accept `1`, `true`, `yes` or `on`
    /// (any case); an empty value leaves the field at its default, and an
    /// empty or missing spare-token count means 0.
    pub fn from_params<I, K, V>(params: I) -> ValidationResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut raw = RawRequest::default();
        for (key, value) in params {
            let key = key.as_ref();
            let value = value.as_ref().trim();
            let field = PARAM_ALIASES
                .iter()
                .find(|(alias, _)| *alias == key)
                .map_or(key, |(_, canonical)| *canonical);
            let text = || Some(IntInput::Text(value.to_string()));
            match field {
                "initial_spare_tokens" => raw.initial_spare_tokens = text(),
                "stop_on_counter_threshold" => {
                    raw.stop_on_counter_threshold = parse_bool(field, value)?
                }
                "stop_on_resource_a_threshold" => raw.stop_on_resource_a_threshold = text(),
                "stop_on_resource_b_threshold" => raw.stop_on_resource_b_threshold = text(),
                "stop_on_mana_threshold" => raw.stop_on_mana_threshold = text(),
                "seed" => raw.seed = text(),
                "max_iterations" => raw.max_iterations = text(),
                _ => return Err(ValidationError::UnknownField { field: key.to_string() }),
            }
        }
        if optional_int("initial_spare_tokens", raw.initial_spare_tokens.as_ref())?.is_none() {
            raw.initial_spare_tokens = Some(IntInput::Int(0));
        }
        Self::try_from(raw)
    }
}

impl Default for SimulationRequest {
    fn default() -> Self {
        Self::new(0)
    }
}

// ─── Raw input ───────────────────────────────────────────────────────────────

/// Keyed request input. Deserializing through a map means positional
/// sequences never reach [`RawRequest`].
type RequestObject = serde_json::Map<String, serde_json::Value>;

impl TryFrom<RequestObject> for SimulationRequest {
    type Error = ValidationError;

    fn try_from(object: RequestObject) -> Result<Self, Self::Error> {
        if let Some(field) = object.keys().find(|k| !FIELDS.contains(&k.as_str())) {
            return Err(ValidationError::UnknownField { field: field.clone() });
        }
        let raw: RawRequest = serde_json::from_value(serde_json::Value::Object(object))?;
        Self::try_from(raw)
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// Integer input as it arrives from JSON or a form.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum IntInput {
    Int(i64),
    Text(String),
    /// Fractional, out of range, or not a number at all.
    Other(serde_json::Value),
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRequest {
    initial_spare_tokens: Option<IntInput>,
    #[serde(default)]
    stop_on_counter_threshold: bool,
    #[serde(default)]
    stop_on_resource_a_threshold: Option<IntInput>,
    #[serde(default)]
    stop_on_resource_b_threshold: Option<IntInput>,
    #[serde(default)]
    stop_on_mana_threshold: Option<IntInput>,
    #[serde(default)]
    seed: Option<IntInput>,
    #[serde(default)]
    max_iterations: Option<IntInput>,
}

impl TryFrom<RawRequest> for SimulationRequest {
    type Error = ValidationError;

    fn try_from(raw: RawRequest) -> Result<Self, Self::Error> {
        let initial_spare_tokens =
            optional_non_negative("initial_spare_tokens", raw.initial_spare_tokens.as_ref())?
                .ok_or_else(|| ValidationError::Malformed {
                    reason: "missing field `initial_spare_tokens`".to_string(),
                })?;
        let max_iterations =
            optional_non_negative("max_iterations", raw.max_iterations.as_ref())?
                .unwrap_or(DEFAULT_MAX_ITERATIONS);
        if max_iterations == 0 {
            return Err(ValidationError::ZeroIterations);
        }

        Ok(Self {
            initial_spare_tokens,
            stop_on_counter_threshold: raw.stop_on_counter_threshold,
            stop_on_resource_a_threshold: optional_non_negative(
                "stop_on_resource_a_threshold",
                raw.stop_on_resource_a_threshold.as_ref(),
            )?,
            stop_on_resource_b_threshold: optional_non_negative(
                "stop_on_resource_b_threshold",
                raw.stop_on_resource_b_threshold.as_ref(),
            )?,
            stop_on_mana_threshold: optional_non_negative(
                "stop_on_mana_threshold",
                raw.stop_on_mana_threshold.as_ref(),
            )?,
            seed: optional_int("seed", raw.seed.as_ref())?,
            max_iterations,
        })
    }
}

fn optional_int(field: &str, input: Option<&IntInput>) -> ValidationResult<Option<i64>> {
    match input {
        None => Ok(None),
        Some(IntInput::Int(v)) => Ok(Some(*v)),
        Some(IntInput::Text(s)) => {
            let s = s.trim();
            if s.is_empty() {
                return Ok(None);
            }
            s.parse::<i64>()
                .map(Some)
                .map_err(|_| ValidationError::not_an_integer(field, s))
        }
        Some(IntInput::Other(v)) => Err(ValidationError::not_an_integer(field, &v.to_string())),
    }
}

fn optional_non_negative(field: &str, input: Option<&IntInput>) -> ValidationResult<Option<u64>> {
    match optional_int(field, input)? {
        None => Ok(None),
        Some(v) => u64::try_from(v)
            .map(Some)
            .map_err(|_| ValidationError::negative(field, v)),
    }
}

fn parse_bool(field: &str, value: &str) -> ValidationResult<bool> {
    match value.to_ascii_lowercase().as_str() {
        "" | "0" | "false" | "no" | "off" => Ok(false),
        "1" | "true" | "yes" | "on" => Ok(true),
        _ => Err(ValidationError::InvalidBool {
            field: field.to_string(),
            value: value.to_string(),
        }),
    }
}
