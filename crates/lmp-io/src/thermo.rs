use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use lmp_core::error::{LmpError, LmpResult};
use lmp_core::table::ThermoTable;

const HEADER_MARKER: &str = "Step";
const TIME_COLUMN: &str = "Time";

/// Source of the derived `Time` column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TimeAxis {
    /// 1-based row index in the log (before any filtering) times the time step.
    #[default]
    RowIndex,
    /// Value of the `Step` column times the time step.
    StepColumn,
}

#[derive(Clone, Copy, Debug)]
pub struct ThermoOptions {
    pub time_step: Option<f64>,
    pub time_axis: TimeAxis,
    /// Rows with 1-based index `<= first_frame` are skipped.
    pub first_frame: usize,
    /// Keep rows whose 1-based index `i` satisfies `(i - 1) % stride == 0`.
    pub stride: usize,
    /// Reading stops after row `last_frame + 1`. `Some(0)` is no bound.
    pub last_frame: Option<usize>,
    /// Which `Step` header block of a multi-run log to read (0-based).
    pub run: usize,
}

impl Default for ThermoOptions {
    fn default() -> Self {
        Self {
            time_step: None,
            time_axis: TimeAxis::RowIndex,
            first_frame: 0,
            stride: 1,
            last_frame: None,
            run: 0,
        }
    }
}

impl ThermoOptions {
    pub fn validate(&self) -> LmpResult<()> {
        if self.stride == 0 {
            return Err(LmpError::Invalid("thermo stride must be at least 1".into()));
        }
        if let Some(dt) = self.time_step {
            if !dt.is_finite() || dt <= 0.0 {
                return Err(LmpError::Invalid(format!(
                    "time step must be positive and finite, got {dt}"
                )));
            }
        }
        Ok(())
    }
}

pub struct ThermoLogReader<R: BufRead> {
    reader: R,
    line_no: usize,
}

impl ThermoLogReader<BufReader<File>> {
    pub fn open(path: impl AsRef<Path>) -> LmpResult<Self> {
        let file = File::open(path.as_ref())?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> ThermoLogReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, line_no: 0 }
    }

    fn next_line(&mut self) -> LmpResult<Option<String>> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        self.line_no += 1;
        Ok(Some(line))
    }

    fn find_header(&mut self, run: usize) -> LmpResult<Vec<String>> {
        let mut seen = 0usize;
        while let Some(line) = self.next_line()? {
            let mut tokens = line.split_whitespace().peekable();
            if tokens.peek() != Some(&HEADER_MARKER) {
                continue;
            }
            if seen == run {
                log::debug!("thermo header found at line {}", self.line_no);
                return Ok(tokens.map(str::to_string).collect());
            }
            seen += 1;
        }
        Err(LmpError::MarkerNotFound(format!(
            "thermo header starting with '{HEADER_MARKER}' for run {run} ({seen} found before end of log)"
        )))
    }

    pub fn read_table(&mut self, options: &ThermoOptions) -> LmpResult<ThermoTable> {
        options.validate()?;
        let columns = self.find_header(options.run)?;
        let n_columns = columns.len();
        let mut table = ThermoTable::new(columns)?;
        let mut times = Vec::new();

        let last_frame = options.last_frame.filter(|&last| last > 0);
        let mut index = 0usize;
        while let Some(line) = self.next_line()? {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.len() != n_columns {
                break;
            }
            index += 1;
            if index % 100_000 == 0 {
                log::debug!("thermo row {index}");
            }
            if index > options.first_frame && (index - 1) % options.stride == 0 {
                self.push_row(&tokens, index, options, &mut table, &mut times)?;
            }
            if matches!(last_frame, Some(last) if index > last) {
                break;
            }
        }

        if options.time_step.is_some() {
            table.insert_column(0, TIME_COLUMN, times)?;
        }
        log::info!(
            "read {} of {index} thermo rows with {} columns",
            table.n_rows(),
            n_columns
        );
        Ok(table)
    }

    fn push_row(
        &self,
        tokens: &[&str],
        index: usize,
        options: &ThermoOptions,
        table: &mut ThermoTable,
        times: &mut Vec<f64>,
    ) -> LmpResult<()> {
        let mut row = Vec::with_capacity(tokens.len());
        for (col, tok) in tokens.iter().enumerate() {
            let value = tok.parse::<f64>().map_err(|_| {
                LmpError::parse_at(
                    self.line_no,
                    format!(
                        "non-numeric value '{tok}' in column '{}'",
                        table.columns()[col]
                    ),
                )
            })?;
            row.push(value);
        }
        if let Some(dt) = options.time_step {
            let t = match options.time_axis {
                TimeAxis::RowIndex => index as f64 * dt,
                TimeAxis::StepColumn => row[0] * dt,
            };
            times.push(t);
        }
        table.push_row(row)?;
        Ok(())
    }
}

/// Reads the thermo block of a LAMMPS log file.
pub fn read_thermo_log(path: impl AsRef<Path>, options: &ThermoOptions) -> LmpResult<ThermoTable> {
    let path = path.as_ref();
    log::debug!("reading thermo data from {}", path.display());
    ThermoLogReader::open(path)?.read_table(options)
}
