// Copyright 2026 Hypermesh Foundation. All rights reserved.
// House Engine - generator/untap resource economy simulator

pub mod error;
pub mod types;
pub mod pool;
pub mod selector;
pub mod production;
pub mod stop;
pub mod request;
pub mod trace;
pub mod simulation;

pub use error::{ValidationError, ValidationResult};
pub use pool::{KindCount, ResourcePool};
pub use production::{production_for_roll, ProductionOdds};
pub use request::{SimulationRequest, DEFAULT_MAX_ITERATIONS};
pub use selector::{choose_tap_targets, TapDecision, UNTAP_COST};
pub use simulation::{run, Simulation, PRNG_NAME};
pub use stop::COUNTER_STOP_THRESHOLD;
pub use trace::TrajectoryPoint;
pub use types::*;

use serde::Serialize;
use std::collections::HashMap;
use wasm_bindgen::prelude::*;

// ─── WASM Interface ──────────────────────────────────────────────────────────

fn install_panic_hook() {
    #[cfg(target_arch = "wasm32")]
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));
}

/// Maps become plain objects, so `roll_histogram` reads as `{ "1": n, .. }`.
fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Largest integer a JS number holds exactly.
const MAX_SAFE_INTEGER: i64 = (1 << 53) - 1;

/// Seed as handed to JS: a number while exact, decimal text beyond that.
/// Text seeds are accepted back by every request entry point.
struct JsSeed(i64);

impl Serialize for JsSeed {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if (-MAX_SAFE_INTEGER..=MAX_SAFE_INTEGER).contains(&self.0) {
            serializer.serialize_i64(self.0)
        } else {
            serializer.collect_str(&self.0)
        }
    }
}

/// [`SimulationResult`] with a JS-safe seed.
#[derive(Serialize)]
struct JsResult<'a> {
    run_timestamp: &'a str,
    seed: JsSeed,
    prng: &'static str,
    iterations: u64,
    termination: &'a Termination,
    log: &'a [IterationLogEntry],
    final_state: &'a BoardStateSnapshot,
    roll_histogram: &'a RollHistogram,
}

impl<'a> From<&'a SimulationResult> for JsResult<'a> {
    fn from(result: &'a SimulationResult) -> Self {
        Self {
            run_timestamp: &result.run_timestamp,
            seed: JsSeed(result.seed),
            prng: result.prng,
            iterations: result.iterations,
            termination: &result.termination,
            log: &result.log,
            final_state: &result.final_state,
            roll_histogram: &result.roll_histogram,
        }
    }
}

/// Runs a simulation from a JSON-shaped request object.
#[wasm_bindgen]
pub fn simulate(request: JsValue) -> Result<JsValue, JsValue> {
    install_panic_hook();
    let request: SimulationRequest = serde_wasm_bindgen::from_value(request)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    to_js(&JsResult::from(&run(&request)))
}

/// Runs a simulation from a flat `{ key: string }` map of form fields.
#[wasm_bindgen]
pub fn simulate_form(params: JsValue) -> Result<JsValue, JsValue> {
    install_panic_hook();
    let params: HashMap<String, String> = serde_wasm_bindgen::from_value(params)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    let request = SimulationRequest::from_params(params)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    to_js(&JsResult::from(&run(&request)))
}

/// Same as [`simulate`], plus the reconstructed trajectory and summary line.
#[wasm_bindgen]
pub fn simulate_detailed(request: JsValue) -> Result<JsValue, JsValue> {
    install_panic_hook();
    let request: SimulationRequest = serde_wasm_bindgen::from_value(request)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    let result = run(&request);

    #[derive(Serialize)]
    struct Detailed<'a> {
        result: JsResult<'a>,
        trajectory: Vec<TrajectoryPoint>,
        summary: String,
    }
    to_js(&Detailed { trajectory: result.trajectory(), summary: result.summary(), result: JsResult::from(&result) })
}

/// Exact odds of the d20 production table.
#[wasm_bindgen]
pub fn production_odds() -> Result<JsValue, JsValue> {
    to_js(&ProductionOdds::d20())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn js_json(result: &SimulationResult) -> serde_json::Value {
        serde_json::to_value(JsResult::from(result)).expect("test: serialize")
    }

    #[test]
    fn js_result_keeps_exact_seeds_numeric() {
        let result = run(&SimulationRequest::new(2).with_seed(Some(-77)).with_max_iterations(5));
        let json = js_json(&result);
        assert_eq!(json["seed"], -77);
        assert_eq!(json["roll_histogram"].as_object().map(|h| h.len()), Some(20));
        assert_eq!(json["iterations"], result.iterations);
    }

    #[test]
    fn js_result_carries_large_seeds_as_text() {
        let seed = 1_i64 << 60;
        let result = run(&SimulationRequest::new(2).with_seed(Some(seed)).with_max_iterations(5));
        assert_eq!(js_json(&result)["seed"], "1152921504606846976");

        let back = SimulationRequest::from_json(r#"{"initial_spare_tokens": 2, "seed": "1152921504606846976"}"#)
            .expect("test: text seed");
        assert_eq!(back.seed(), Some(seed));
    }
}
