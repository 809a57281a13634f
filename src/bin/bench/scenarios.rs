// Built-in scenarios — spare-token sweeps plus each stop threshold

use house_engine::SimulationRequest;

use crate::config::ScenarioConfig;

/// Bench runs are capped well below the library default.
const BENCH_MAX_ITERATIONS: u64 = 100_000;

fn scenario(name: &str, label: &str, category: &str, request: SimulationRequest) -> ScenarioConfig {
    ScenarioConfig {
        name: name.to_string(),
        label: label.to_string(),
        category: category.to_string(),
        request: request.with_max_iterations(BENCH_MAX_ITERATIONS),
    }
}

pub fn default_scenarios() -> Vec<ScenarioConfig> {
    let mut all: Vec<ScenarioConfig> = [0u64, 2, 5, 10, 20, 50]
        .into_iter()
        .map(|spares| {
            scenario(
                &format!("SPARE_{spares}"),
                &format!("{spares} spare tokens, run dry"),
                "sweep",
                SimulationRequest::new(spares),
            )
        })
        .collect();

    all.extend([
        scenario(
            "COUNTER_100_SPARE_5",
            "5 spares, stop at roll total 100",
            "threshold",
            SimulationRequest::new(5).with_counter_stop(true),
        ),
        scenario(
            "COUNTER_100_SPARE_20",
            "20 spares, stop at roll total 100",
            "threshold",
            SimulationRequest::new(20).with_counter_stop(true),
        ),
        scenario(
            "TREASURE_3_SPARE_5",
            "5 spares, stop at 3 treasures",
            "threshold",
            SimulationRequest::new(5).with_resource_b_threshold(Some(3)),
        ),
        scenario(
            "ROBOT_10_SPARE_10",
            "10 spares, stop at 10 robots",
            "threshold",
            SimulationRequest::new(10).with_resource_a_threshold(Some(10)),
        ),
        scenario(
            "MANA_25_SPARE_10",
            "10 spares, stop at 25 mana",
            "threshold",
            SimulationRequest::new(10).with_mana_threshold(Some(25)),
        ),
    ]);
    all
}
