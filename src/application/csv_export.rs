// CSV export for table panels
const UTF8_BOM: &str = "\u{feff}";

/// Rows that can be exported as CSV.
pub trait CsvRecord {
    const HEADERS: &'static [&'static str];

    fn fields(&self) -> Vec<String>;
}

fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\r', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn write_line<'a>(out: &mut String, fields: impl Iterator<Item = &'a str>) {
    let line: Vec<String> = fields.map(escape_field).collect();
    out.push_str(&line.join(","));
    out.push_str("\r\n");
}

/// Render rows with a BOM so spreadsheet tools pick up UTF-8 (Chinese
/// headers otherwise come out garbled).
pub fn to_csv<T: CsvRecord>(rows: &[T]) -> String {
    let mut out = String::from(UTF8_BOM);
    write_line(&mut out, T::HEADERS.iter().copied());
    for row in rows {
        let fields = row.fields();
        write_line(&mut out, fields.iter().map(String::as_str));
    }
    out
}
