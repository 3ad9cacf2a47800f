use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use lmp_core::error::{LmpError, LmpResult};
use lmp_core::table::{LabelledTable, ThermoTable};

fn check_header(name: &str) -> LmpResult<()> {
    if name.contains(',') || name.contains('\n') {
        return Err(LmpError::Invalid(format!(
            "column name '{name}' cannot be written to csv"
        )));
    }
    Ok(())
}

pub fn write_table<W: Write>(mut out: W, table: &ThermoTable) -> LmpResult<()> {
    for name in table.columns() {
        check_header(name)?;
    }
    writeln!(out, "{}", table.columns().join(","))?;
    for row in table.rows() {
        let fields: Vec<String> = row.iter().map(|v| v.to_string()).collect();
        writeln!(out, "{}", fields.join(","))?;
    }
    out.flush()?;
    Ok(())
}

pub fn write_table_csv(path: impl AsRef<Path>, table: &ThermoTable) -> LmpResult<()> {
    let file = File::create(path.as_ref())?;
    write_table(BufWriter::new(file), table)
}

/// Writes equally long columns side by side.
pub fn write_columns_csv(
    path: impl AsRef<Path>,
    headers: &[&str],
    columns: &[&[f64]],
) -> LmpResult<()> {
    if headers.len() != columns.len() {
        return Err(LmpError::Mismatch(format!(
            "{} headers for {} columns",
            headers.len(),
            columns.len()
        )));
    }
    let n_rows = columns.first().map(|c| c.len()).unwrap_or(0);
    if columns.iter().any(|c| c.len() != n_rows) {
        return Err(LmpError::Mismatch("csv columns differ in length".into()));
    }
    let rows: Vec<Vec<f64>> = (0..n_rows)
        .map(|i| columns.iter().map(|c| c[i]).collect())
        .collect();
    let table = ThermoTable::from_rows(headers.iter().map(|h| h.to_string()).collect(), rows)?;
    write_table_csv(path, &table)
}

/// Writes the row labels as a leading column headed by the index name.
pub fn write_labelled<W: Write>(mut out: W, labelled: &LabelledTable) -> LmpResult<()> {
    let table = labelled.table();
    check_header(labelled.index_name())?;
    for name in table.columns().iter().chain(labelled.labels()) {
        check_header(name)?;
    }
    writeln!(out, "{},{}", labelled.index_name(), table.columns().join(","))?;
    for (label, row) in labelled.labels().iter().zip(table.rows()) {
        let fields: Vec<String> = row.iter().map(|v| v.to_string()).collect();
        writeln!(out, "{label},{}", fields.join(","))?;
    }
    out.flush()?;
    Ok(())
}

pub fn write_labelled_csv(path: impl AsRef<Path>, labelled: &LabelledTable) -> LmpResult<()> {
    let file = File::create(path.as_ref())?;
    write_labelled(BufWriter::new(file), labelled)
}

pub fn read_labelled<R: BufRead>(reader: R) -> LmpResult<LabelledTable> {
    let mut lines = reader.lines();
    let header = lines
        .next()
        .transpose()?
        .ok_or_else(|| LmpError::MarkerNotFound("csv header row".into()))?;
    let mut fields = header.split(',').map(|s| s.trim().to_string());
    let index_name = fields.next().unwrap_or_default();
    let mut table = ThermoTable::new(fields.collect())?;
    let mut labels = Vec::new();
    for (idx, line) in lines.enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let line_no = idx + 2;
        let mut fields = line.split(',');
        let label = fields.next().unwrap_or_default().trim().to_string();
        let row = fields
            .map(|field| {
                field.trim().parse::<f64>().map_err(|_| {
                    LmpError::parse_at(line_no, format!("non-numeric csv field '{field}'"))
                })
            })
            .collect::<LmpResult<Vec<f64>>>()?;
        table
            .push_row(row)
            .map_err(|e| LmpError::parse_at(line_no, e))?;
        labels.push(label);
    }
    LabelledTable::new(index_name, labels, table)
}

pub fn read_labelled_csv(path: impl AsRef<Path>) -> LmpResult<LabelledTable> {
    let file = File::open(path.as_ref())?;
    read_labelled(BufReader::new(file))
}

pub fn read_table<R: BufRead>(reader: R) -> LmpResult<ThermoTable> {
    let mut lines = reader.lines();
    let header = lines
        .next()
        .transpose()?
        .ok_or_else(|| LmpError::MarkerNotFound("csv header row".into()))?;
    let columns: Vec<String> = header.split(',').map(|s| s.trim().to_string()).collect();
    let mut table = ThermoTable::new(columns)?;
    for (idx, line) in lines.enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let line_no = idx + 2;
        let row = line
            .split(',')
            .map(|field| {
                field.trim().parse::<f64>().map_err(|_| {
                    LmpError::parse_at(line_no, format!("non-numeric csv field '{field}'"))
                })
            })
            .collect::<LmpResult<Vec<f64>>>()?;
        table
            .push_row(row)
            .map_err(|e| LmpError::parse_at(line_no, e))?;
    }
    Ok(table)
}

pub fn read_table_csv(path: impl AsRef<Path>) -> LmpResult<ThermoTable> {
    let file = File::open(path.as_ref())?;
    read_table(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_round_trip() {
        let table = ThermoTable::from_rows(
            vec!["Time".into(), "Step".into(), "PotEng".into()],
            vec![
                vec![2e-15, 0.0, -1234.567890123],
                vec![4e-15, 40.0, 1.0 / 3.0],
                vec![6e-15, 80.0, f64::MIN_POSITIVE],
            ],
        )
        .unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("thermo.csv");
        write_table_csv(&path, &table).unwrap();
        let back = read_table_csv(&path).unwrap();
        assert_eq!(back, table);
    }

    #[test]
    fn writes_header_and_rows() {
        let table = ThermoTable::from_rows(
            vec!["Time".into(), "MSD".into()],
            vec![vec![0.0, 0.0], vec![1.5, 2.25]],
        )
        .unwrap();
        let mut buf = Vec::new();
        write_table(&mut buf, &table).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "Time,MSD\n0,0\n1.5,2.25\n");
    }

    #[test]
    fn column_writer_checks_lengths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cols.csv");
        let t = [0.0, 1.0];
        let c = [1.0];
        assert!(write_columns_csv(&path, &["Time", "C"], &[&t[..], &c[..]]).is_err());
        write_columns_csv(&path, &["Time", "C"], &[&t[..], &t[..]]).unwrap();
        let back = read_table_csv(&path).unwrap();
        assert_eq!(back.column("C").unwrap(), vec![0.0, 1.0]);
    }

    #[test]
    fn labelled_rows_keep_their_names() {
        let table = ThermoTable::from_rows(
            vec!["Step".into(), "Temp".into()],
            vec![vec![2.0, 2.0], vec![20.0, 299.5]],
        )
        .unwrap();
        let labelled =
            LabelledTable::new("", vec!["count".into(), "mean".into()], table).unwrap();
        let mut buf = Vec::new();
        write_labelled(&mut buf, &labelled).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, ",Step,Temp\ncount,2,2\nmean,20,299.5\n");
        let back = read_labelled(text.as_bytes()).unwrap();
        assert_eq!(back.get("mean", "Temp"), Some(299.5));
        assert_eq!(back.index_name(), "");
    }

    #[test]
    fn ragged_csv_is_rejected() {
        let text = "a,b\n1,2\n3\n";
        assert!(read_table(text.as_bytes()).is_err());
    }
}
