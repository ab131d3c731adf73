use csv::Writer;
use std::fs::File;
use std::io::{self, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write file: {0}")]
    Io(#[from] io::Error),
    #[error("failed to write csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to draw plot: {0}")]
    Plot(String),
    #[error("no finite samples to plot")]
    NothingToPlot,
}

/// Tab separated table of samples, first line is the header `arg<TAB>function`.
pub fn save_samples_to_file(
    samples: &[(f64, f64)],
    arg: &str,
    function: &str,
    filename: &str,
) -> Result<(), ExportError> {
    let mut file = File::create(filename)?;
    writeln!(file, "{}\t{}", arg, function)?;
    for (x, y) in samples {
        writeln!(file, "{}\t{}", x, y)?;
    }
    Ok(())
}

pub fn save_samples_to_csv(
    samples: &[(f64, f64)],
    arg: &str,
    function: &str,
    filename: &str,
) -> Result<(), ExportError> {
    let file = File::create(filename)?;
    let mut writer = Writer::from_writer(file);
    writer.write_record([arg, function])?;
    for (x, y) in samples {
        writer.write_record([x.to_string(), y.to_string()])?;
    }
    writer.flush()?;
    Ok(())
}
