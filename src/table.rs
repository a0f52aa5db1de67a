//! Availability table rendering.

use crate::store::LotCollection;

const HEADERS: [&str; 5] = ["#", "Parqueo", "Cap", "Ocup", "Libres"];

/// Builds the text cells for each lot: 1-based position, name, capacity,
/// occupied and free spaces.
pub fn table_rows(lots: &LotCollection) -> Vec<[String; 5]> {
    lots.iter()
        .enumerate()
        .map(|(i, lot)| {
            [
                (i + 1).to_string(),
                lot.name.clone(),
                lot.capacity.to_string(),
                lot.occupied.to_string(),
                lot.free_spaces().to_string(),
            ]
        })
        .collect()
}

/// Formats the availability table.
///
/// Columns are left-justified to the widest of header and cells, separated by
/// a single space, with a dashed rule under the header. The result starts and
/// ends with a newline.
pub fn format_table(lots: &LotCollection) -> String {
    let rows = table_rows(lots);

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let header = join_padded(HEADERS.iter().copied(), &widths);
    let rule = widths
        .iter()
        .map(|w| "-".repeat(*w))
        .collect::<Vec<_>>()
        .join(" ");
    let body = rows
        .iter()
        .map(|row| join_padded(row.iter().map(String::as_str), &widths))
        .collect::<Vec<_>>()
        .join("\n");

    format!("\n{}\n{}\n{}\n", header, rule, body)
}

fn join_padded<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lot::Lot;

    #[test]
    fn test_default_table_layout() {
        let table = format_table(&LotCollection::default_lots());
        let expected = "\n\
# Parqueo   Cap Ocup Libres\n\
- --------- --- ---- ------\n\
1 Parqueo A 5   2    3     \n\
2 Parqueo B 3   3    0     \n\
3 El Hoyo   4   1    3     \n\
4 Puerta B  6   4    2     \n";
        assert_eq!(table, expected);
    }

    #[test]
    fn test_columns_widen_for_long_cells() {
        let lots = LotCollection::new(vec![Lot::new("X", 12345, 7)]);
        let table = format_table(&lots);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines[1], "# Parqueo Cap   Ocup Libres");
        assert_eq!(lines[2], "- ------- ----- ---- ------");
        assert_eq!(lines[3], "1 X       12345 7    12338 ");
    }

    #[test]
    fn test_over_capacity_shows_zero_free() {
        let lots = LotCollection::new(vec![Lot::new("Lleno", 2, 4)]);
        let rows = table_rows(&lots);
        assert_eq!(rows[0][4], "0");
    }

    #[test]
    fn test_width_counts_characters_not_bytes() {
        let lots = LotCollection::new(vec![Lot::new("Ñandú Norte", 1, 0)]);
        let table = format_table(&lots);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[2], "- ----------- --- ---- ------");
        assert_eq!(lines[3], "1 Ñandú Norte 1   0    1     ");
    }
}
