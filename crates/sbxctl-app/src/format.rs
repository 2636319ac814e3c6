//! Plain-text tables and timestamps for command output.

use chrono::{DateTime, Utc};

/// Right-pad `s` with spaces to `width` characters.
pub fn pad_end(s: &str, width: usize) -> String {
    let len = s.chars().count();
    if len >= width {
        s.to_string()
    } else {
        format!("{s}{}", " ".repeat(width - len))
    }
}

/// `YYYY-MM-DD HH:MM:SSZ`.
pub fn format_date(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d %H:%M:%SZ").to_string()
}

/// Render a table: header row, a dash rule, then one line per row. Columns
/// are separated by two spaces and padded to their widest cell.
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            rows.iter()
                .filter_map(|r| r.get(i))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(h.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |cells: Vec<String>| cells.join("  ");

    let mut out = Vec::with_capacity(rows.len() + 2);
    out.push(line(
        headers
            .iter()
            .zip(&widths)
            .map(|(h, w)| pad_end(h, *w))
            .collect(),
    ));
    out.push(line(widths.iter().map(|w| "-".repeat(*w)).collect()));
    for row in rows {
        out.push(line(
            widths
                .iter()
                .enumerate()
                .map(|(i, w)| pad_end(row.get(i).map(String::as_str).unwrap_or(""), *w))
                .collect(),
        ));
    }
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn pads_short_strings_only() {
        assert_eq!(pad_end("ID", 5), "ID   ");
        assert_eq!(pad_end("running", 5), "running");
    }

    #[test]
    fn date_format() {
        let dt = Utc.with_ymd_and_hms(2025, 3, 9, 7, 5, 1).unwrap();
        assert_eq!(format_date(&dt), "2025-03-09 07:05:01Z");
    }

    #[test]
    fn table_layout() {
        let rows = vec![
            vec!["iq3c9f0u2".to_string(), "running".to_string()],
            vec!["x".to_string(), "paused".to_string()],
        ];
        let table = render_table(&["ID", "STATE"], &rows);
        let expected = [
            "ID         STATE  ",
            "---------  -------",
            "iq3c9f0u2  running",
            "x          paused ",
        ]
        .join("\n");
        assert_eq!(table, expected);
    }

    #[test]
    fn empty_table_has_header_and_rule() {
        let table = render_table(&["ID", "STATE"], &[]);
        assert_eq!(table, "ID  STATE\n--  -----");
    }
}
