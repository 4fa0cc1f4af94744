//! CSV rendering of flattened rows.
//!
//! The flattening itself lives in `threadsift_core::export`; this module
//! only serializes the resulting rows. Fields containing delimiters,
//! quotes, or line breaks are quoted per RFC 4180.

use anyhow::Result;
use std::io::Write;

fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn write_row<W: Write>(writer: &mut W, fields: &[String]) -> Result<()> {
    let line: Vec<String> = fields.iter().map(|f| escape(f)).collect();
    writeln!(writer, "{}", line.join(","))?;
    Ok(())
}

/// Writes a header row and data rows to the given writer.
pub fn write_csv<W: Write>(writer: &mut W, columns: &[&str], rows: &[Vec<String>]) -> Result<()> {
    let header: Vec<String> = columns.iter().map(ToString::to_string).collect();
    write_row(writer, &header)?;
    for row in rows {
        write_row(writer, row)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_fields_pass_through() {
        assert_eq!(escape("hello"), "hello");
    }

    #[test]
    fn fields_with_delimiters_are_quoted() {
        assert_eq!(escape("a,b"), "\"a,b\"");
        assert_eq!(escape("line\nbreak"), "\"line\nbreak\"");
        assert_eq!(escape("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn writes_header_then_rows() {
        let mut buffer = Vec::new();
        let rows = vec![
            vec!["1".to_string(), "a,b".to_string()],
            vec!["2".to_string(), "plain".to_string()],
        ];
        write_csv(&mut buffer, &["id", "title"], &rows).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "id,title");
        assert_eq!(lines[1], "1,\"a,b\"");
        assert_eq!(lines[2], "2,plain");
    }
}
