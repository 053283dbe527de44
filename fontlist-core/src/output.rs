//! JSON output helpers

use std::io::Write;

use serde::Serialize;

use crate::error::Result;
use crate::model::FontFamily;

/// Write any serializable value (a family list, a single family) as prettified JSON.
pub fn write_json_pretty<T>(value: &T, mut w: impl Write) -> Result<(), OutputError>
where
    T: Serialize + ?Sized,
{
    serde_json::to_writer_pretty(&mut w, value)?;
    w.write_all(b"\n")?;
    Ok(())
}

/// Write families as newline-delimited JSON (NDJSON), one family per line.
pub fn write_ndjson(families: &[FontFamily], mut w: impl Write) -> Result<(), OutputError> {
    for family in families {
        let line = serde_json::to_string(family)?;
        w.write_all(line.as_bytes())?;
        w.write_all(b"\n")?;
    }
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("failed to serialize fonts: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Font, FontStyle};

    fn sample_family(name: &str) -> FontFamily {
        FontFamily::new(name).with_fonts(vec![Font::new(
            FontStyle::Normal,
            400,
            format!("/fonts/{name}.ttf"),
        )])
    }

    #[test]
    fn ndjson_writes_one_line_per_family() {
        let families = vec![sample_family("A"), sample_family("B")];
        let mut buf = Vec::new();

        write_ndjson(&families, &mut buf).expect("write ndjson");

        let text = String::from_utf8(buf).expect("utf8");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);

        let parsed: FontFamily = serde_json::from_str(lines[1]).expect("parse");
        assert_eq!(parsed, families[1]);
    }

    #[test]
    fn pretty_json_accepts_a_single_family() {
        let mut buf = Vec::new();
        write_json_pretty(&sample_family("Solo"), &mut buf).expect("write json");

        let parsed: FontFamily = serde_json::from_slice(&buf).expect("parse");
        assert_eq!(parsed.name, "Solo");
    }
}
