//! Rendering of shop records for terminal output.

use sps_core::Shop;

const HEADERS: [&str; 3] = ["Slug", "Hostname", "Name"];

/// Output format for shop listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Bordered grid table.
    Table,
    /// Pretty-printed JSON array.
    Json,
}

/// Formats shops in the requested format.
pub fn format_shops(shops: &[Shop], format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Table => Ok(shops_to_table(shops)),
        OutputFormat::Json => serde_json::to_string_pretty(shops).map_err(|e| e.to_string()),
    }
}

fn shops_to_table(shops: &[Shop]) -> String {
    let rows: Vec<[&str; 3]> = shops
        .iter()
        .map(|shop| [shop.slug.as_str(), shop.hostname.as_str(), shop.name.as_str()])
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let border = |fill: char| {
        let mut line = String::from("+");
        for width in widths {
            line.extend(std::iter::repeat_n(fill, width + 2));
            line.push('+');
        }
        line.push('\n');
        line
    };
    let row_line = |cells: &[&str; 3]| {
        let mut line = String::from("|");
        for (cell, width) in cells.iter().zip(widths) {
            line.push_str(&format!(" {cell:<width$} |"));
        }
        line.push('\n');
        line
    };

    let mut out = border('-');
    out.push_str(&row_line(&HEADERS));
    out.push_str(&border('='));
    for row in &rows {
        out.push_str(&row_line(row));
        out.push_str(&border('-'));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_layout() {
        let shops = vec![
            Shop::new("acme", "acme.io", "Acme Store"),
            Shop::new("example", "example.com", ""),
        ];
        let table = format_shops(&shops, OutputFormat::Table).unwrap();
        let expected = "\
+---------+-------------+------------+
| Slug    | Hostname    | Name       |
+=========+=============+============+
| acme    | acme.io     | Acme Store |
+---------+-------------+------------+
| example | example.com |            |
+---------+-------------+------------+
";
        assert_eq!(table, expected);
    }

    #[test]
    fn test_table_header_only_when_empty() {
        let table = format_shops(&[], OutputFormat::Table).unwrap();
        assert_eq!(table.lines().count(), 3);
    }

    #[test]
    fn test_json_output() {
        let shops = vec![Shop::new("acme", "acme.io", "")];
        let json = format_shops(&shops, OutputFormat::Json).unwrap();
        let parsed: Vec<Shop> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, shops);
    }
}
