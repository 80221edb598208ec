//! Dataset file I/O
//!
//! Reads and writes the flat CSV artifact that downstream analysis
//! consumes. Row layout comes from the serde renames on
//! `TelemetrySample`; this module pins the header and adds the file
//! plumbing.

use anyhow::{Context, Result};
use freno_core::TelemetrySample;
use std::fs::File;
use std::path::Path;
use tracing::debug;

/// Default artifact name, shared by the generator and every consumer
pub const DEFAULT_DATASET_FILE: &str = "brake_data.csv";

/// Dataset column headers, in writing order
///
/// These match the serde renames on `TelemetrySample` field for field;
/// keeping them spelled out here lets the writer emit a header even for
/// an empty series.
pub const COLUMNS: [&str; 6] = [
    "Tiempo_s",
    "Velocidad_kmh",
    "Deceleracion_ms2",
    "Energia_Disipada_kJ",
    "Tipo_Frenado",
    "Temperatura_Ambiente_C",
];

/// Write a whole series to `path`, header included
pub fn write_csv(samples: &[TelemetrySample], path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create dataset file {}", path.display()))?;
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(file);

    writer
        .write_record(COLUMNS)
        .context("failed to write dataset header")?;
    for sample in samples {
        writer
            .serialize(sample)
            .with_context(|| format!("failed to write sample at t={}", sample.elapsed_s))?;
    }
    writer.flush().context("failed to flush dataset file")?;

    debug!(rows = samples.len(), path = %path.display(), "dataset written");
    Ok(())
}

/// Read a series back from `path`
///
/// Rows come back in file order; the generator always writes them in
/// ascending time.
pub fn read_csv(path: &Path) -> Result<Vec<TelemetrySample>> {
    let file = File::open(path)
        .with_context(|| format!("failed to open dataset file {}", path.display()))?;
    let mut reader = csv::Reader::from_reader(file);

    let mut samples = Vec::new();
    for (i, row) in reader.deserialize().enumerate() {
        // Header row is consumed by the reader, so data rows start at line 2
        let sample: TelemetrySample =
            row.with_context(|| format!("malformed dataset row at line {}", i + 2))?;
        samples.push(sample);
    }

    debug!(rows = samples.len(), path = %path.display(), "dataset read");
    Ok(samples)
}
