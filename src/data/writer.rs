use std::io::Write;

use crate::data::reader::{INPUT_LABEL, OUTPUT_LABEL, TOPOLOGY_LABEL};
use crate::data::sample::Sample;
use crate::error::DataError;

/// Emits the format read by [`TrainingDataReader`](crate::data::reader::TrainingDataReader).
pub struct TrainingDataWriter<W: Write> {
    inner: W,
}

impl<W: Write> TrainingDataWriter<W> {
    pub fn new(inner: W) -> Self {
        TrainingDataWriter { inner }
    }

    pub fn write_topology(&mut self, topology: &[usize]) -> Result<(), DataError> {
        let sizes: Vec<String> = topology.iter().map(|n| n.to_string()).collect();
        writeln!(self.inner, "{} {}", TOPOLOGY_LABEL, sizes.join(" "))?;
        Ok(())
    }

    pub fn write_sample(&mut self, sample: &Sample) -> Result<(), DataError> {
        writeln!(self.inner, "{} {}", INPUT_LABEL, format_values(&sample.inputs))?;
        writeln!(self.inner, "{} {}", OUTPUT_LABEL, format_values(&sample.targets))?;
        Ok(())
    }

    /// Writes the header followed by every sample.
    pub fn write_dataset<'a, I>(&mut self, topology: &[usize], samples: I) -> Result<(), DataError>
    where
        I: IntoIterator<Item = &'a Sample>,
    {
        self.write_topology(topology)?;
        for sample in samples {
            self.write_sample(sample)?;
        }
        self.inner.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

// `{:?}` keeps a trailing `.0` on integral values.
fn format_values(values: &[f64]) -> String {
    values.iter().map(|v| format!("{:?}", v)).collect::<Vec<_>>().join(" ")
}
