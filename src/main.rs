use u_speciate::evolution::{EvolutionConfig, SimulationRunner, SNAPSHOT_PATH};
use u_speciate::snapshot::CsvSnapshotWriter;

fn main() -> u_speciate::Result<()> {
    env_logger::init();

    let config = EvolutionConfig::default();
    let mut writer = CsvSnapshotWriter::open_append(SNAPSHOT_PATH, config.snapshot_stride)?;
    let result = SimulationRunner::run(&config, &mut writer)?;

    log::info!(
        "finished: {:?} after {} generations, best fitness {}, {} snapshots in {}",
        result.final_state,
        result.generations,
        result.best_fitness,
        result.snapshots_written,
        SNAPSHOT_PATH
    );
    Ok(())
}
