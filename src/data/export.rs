use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};

use super::aggregate::AggregateRow;

/// Write the summary table to `path`, choosing CSV or JSON by extension.
///
/// Both formats use the on-screen headers (`Name`, `Team`, `# Starts`,
/// `Av. PTS`); JSON is an array of records.
pub fn export_table(rows: &[AggregateRow], path: &Path) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let file = match ext.as_str() {
        "csv" | "json" => File::create(path)
            .with_context(|| format!("creating {}", path.display()))?,
        other => bail!("Unsupported export extension: .{other}"),
    };

    let out = BufWriter::new(file);
    if ext == "csv" {
        write_csv(rows, out)?;
    } else {
        write_json(rows, out)?;
    }

    log::info!("Exported {} rows to {}", rows.len(), path.display());
    Ok(())
}

pub fn write_csv<W: Write>(rows: &[AggregateRow], out: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    if rows.is_empty() {
        writer
            .write_record(AggregateRow::HEADERS)
            .context("writing CSV header")?;
    }
    for row in rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

pub fn write_json<W: Write>(rows: &[AggregateRow], mut out: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut out, rows).context("serializing JSON")?;
    out.flush().context("flushing JSON")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rows() -> Vec<AggregateRow> {
        vec![
            AggregateRow {
                name: "Linus Ullmark".into(),
                team: "BOS".into(),
                starts: 49,
                avg_points: 9.87,
            },
            AggregateRow {
                name: "Ilya Samsonov".into(),
                team: "TOR".into(),
                starts: 40,
                avg_points: 7.5,
            },
        ]
    }

    #[test]
    fn test_csv_uses_display_headers() {
        let mut buf = Vec::new();
        write_csv(&rows(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "Name,Team,# Starts,Av. PTS\nLinus Ullmark,BOS,49,9.87\nIlya Samsonov,TOR,40,7.5\n"
        );
    }

    #[test]
    fn test_empty_csv_still_has_header() {
        let mut buf = Vec::new();
        write_csv(&[], &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "Name,Team,# Starts,Av. PTS\n");
    }

    #[test]
    fn test_json_records_round_trip() {
        let mut buf = Vec::new();
        write_json(&rows(), &mut buf).unwrap();
        let back: Vec<AggregateRow> = serde_json::from_slice(&buf).unwrap();
        assert_eq!(back, rows());
    }

    #[test]
    fn test_export_to_file_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.csv");
        export_table(&rows(), &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("Name,Team"));

        let bad = dir.path().join("table.txt");
        assert!(export_table(&rows(), &bad).is_err());
        assert!(!bad.exists());
    }
}
