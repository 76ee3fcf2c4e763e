use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use tracing::warn;

use crate::data::sample::Sample;
use crate::error::DataError;
use crate::network::network::validate_topology;

pub const TOPOLOGY_LABEL: &str = "topology:";
pub const INPUT_LABEL: &str = "in:";
pub const OUTPUT_LABEL: &str = "out:";

/// Streams a line-oriented training file:
///
/// ```text
/// topology: 2 4 1
/// in: 1.0 0.0
/// out: 1.0
/// in: 1.0 1.0
/// out: 0.0
/// ```
///
/// The topology line is read eagerly by [`TrainingDataReader::new`]; samples
/// are read one `in:`/`out:` pair at a time. Blank lines are skipped. The
/// reader cannot be rewound, and after the first error it yields nothing more.
pub struct TrainingDataReader<R> {
    lines: Lines<R>,
    line_no: usize,
    topology: Vec<usize>,
    finished: bool,
}

impl TrainingDataReader<BufReader<File>> {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DataError> {
        let file = File::open(path)?;
        TrainingDataReader::new(BufReader::new(file))
    }
}

impl<R: BufRead> TrainingDataReader<R> {
    pub fn new(reader: R) -> Result<Self, DataError> {
        let mut data = TrainingDataReader {
            lines: reader.lines(),
            line_no: 0,
            topology: Vec::new(),
            finished: false,
        };

        let (line, text) = data.next_line()?.ok_or(DataError::MissingTopology)?;
        let values = expect_label(line, &text, TOPOLOGY_LABEL)?;
        let topology = values
            .map(|token| {
                token.parse::<usize>().map_err(|_| DataError::InvalidNumber {
                    line,
                    token: token.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        validate_topology(&topology).map_err(|source| DataError::InvalidTopology { line, source })?;

        data.topology = topology;
        Ok(data)
    }

    /// Per-layer unit counts from the header line.
    pub fn topology(&self) -> &[usize] {
        &self.topology
    }

    /// True once the data is exhausted or an error has been returned.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Reads the next `in:`/`out:` pair; `Ok(None)` signals end of data.
    pub fn next_sample(&mut self) -> Result<Option<Sample>, DataError> {
        if self.finished {
            return Ok(None);
        }
        let result = self.read_sample();
        if !matches!(result, Ok(Some(_))) {
            self.finished = true;
        }
        result
    }

    fn read_sample(&mut self) -> Result<Option<Sample>, DataError> {
        let (line, text) = match self.next_line()? {
            Some(next) => next,
            None => return Ok(None),
        };
        let inputs = self.parse_values(line, &text, INPUT_LABEL, self.topology[0])?;

        let (line, text) = match self.next_line()? {
            Some(next) => next,
            None => {
                warn!(line, "training data ends after an `in:` line without targets");
                return Ok(None);
            }
        };
        let outputs = self.topology[self.topology.len() - 1];
        let targets = self.parse_values(line, &text, OUTPUT_LABEL, outputs)?;

        Ok(Some(Sample::new(inputs, targets)))
    }

    fn parse_values(
        &self,
        line: usize,
        text: &str,
        label: &'static str,
        expected: usize,
    ) -> Result<Vec<f64>, DataError> {
        let values = expect_label(line, text, label)?
            .map(|token| {
                token.parse::<f64>().map_err(|_| DataError::InvalidNumber {
                    line,
                    token: token.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if values.len() != expected {
            return Err(DataError::SampleSizeMismatch { line, expected, actual: values.len() });
        }
        Ok(values)
    }

    /// Next non-blank line with its 1-based number.
    fn next_line(&mut self) -> Result<Option<(usize, String)>, DataError> {
        for text in self.lines.by_ref() {
            self.line_no += 1;
            let text = text?;
            if !text.trim().is_empty() {
                return Ok(Some((self.line_no, text)));
            }
        }
        Ok(None)
    }
}

impl<R: BufRead> Iterator for TrainingDataReader<R> {
    type Item = Result<Sample, DataError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_sample().transpose()
    }
}

/// Splits `text` on whitespace and checks the first token is `label`.
fn expect_label<'a>(
    line: usize,
    text: &'a str,
    label: &'static str,
) -> Result<impl Iterator<Item = &'a str>, DataError> {
    let mut tokens = text.split_whitespace();
    match tokens.next() {
        Some(found) if found == label => Ok(tokens),
        found => Err(DataError::UnexpectedLabel {
            line,
            expected: label,
            found: found.unwrap_or_default().to_string(),
        }),
    }
}
