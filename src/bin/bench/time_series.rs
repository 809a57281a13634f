// Per-iteration JSONL trajectory writer
// One JSON line per iteration, rebuilt from the run's log

use house_engine::{SimulationResult, TrajectoryPoint};
use std::io::Write;
use std::path::Path;

pub fn write_jsonl(result: &SimulationResult, path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::File::create(path)?;
    write_points(&result.trajectory(), std::io::BufWriter::new(file))
}

fn write_points<W: Write>(points: &[TrajectoryPoint], mut out: W) -> std::io::Result<()> {
    for point in points {
        let line = serde_json::to_string(point)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        writeln!(out, "{}", line)?;
    }
    out.flush()
}
