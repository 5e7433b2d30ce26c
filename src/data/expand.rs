use crate::config::SECTION_SEPARATOR;

use super::model::Table;

// ---------------------------------------------------------------------------
// Multi-section row expansion
// ---------------------------------------------------------------------------

/// Explode cells of `column` holding several blank-line separated blocks into
/// one row per block.
///
/// The first block stays on the original row; every further block gets a new
/// row, inserted right below, where all other columns are empty. Cells with a
/// single block (or none) are left untouched, and so is a table lacking
/// `column`.
pub fn expand_sections(table: &Table, column: &str) -> Table {
    if !table.has_column(column) {
        return table.clone();
    }

    let mut expanded = table.with_rows(Vec::with_capacity(table.len()));

    for row in &table.rows {
        let cell = row.get(column).map(String::as_str).unwrap_or("");
        let mut blocks = cell.split(SECTION_SEPARATOR);

        let (Some(first), Some(second)) = (blocks.next(), blocks.next()) else {
            expanded.rows.push(row.clone());
            continue;
        };

        let mut head = row.clone();
        head.insert(column.to_string(), first.trim().to_string());
        expanded.rows.push(head);

        for block in std::iter::once(second).chain(blocks) {
            let mut extra = table.blank_row();
            extra.insert(column.to_string(), block.trim().to_string());
            expanded.rows.push(extra);
        }
    }

    log::debug!(
        "Expanded '{column}': {} rows -> {} rows",
        table.len(),
        expanded.len()
    );
    expanded
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn table(rows: Vec<Vec<&str>>) -> Table {
        Table::from_records(vec!["Ref".into(), "x".into(), "y".into()], rows)
    }

    #[test]
    fn three_blocks_become_three_rows() {
        let input = table(vec![vec!["A\n\nB\n\nC", "1", "2"]]);
        let out = expand_sections(&input, "Ref");

        let expected = table(vec![
            vec!["A", "1", "2"],
            vec!["B", "", ""],
            vec!["C", "", ""],
        ]);
        assert_eq!(out, expected);
    }

    #[test]
    fn single_blocks_are_unchanged() {
        let input = table(vec![
            vec!["  one  ", "1", "2"],
            vec!["", "3", "4"],
            vec!["line\nbreak", "5", "6"],
        ]);
        assert_eq!(expand_sections(&input, "Ref"), input);

        let again = expand_sections(&expand_sections(&input, "Ref"), "Ref");
        assert_eq!(again, input);
    }

    #[test]
    fn order_is_preserved_around_expanded_rows() {
        let input = table(vec![
            vec!["r1", "a", ""],
            vec![" p \n\n q ", "b", "z"],
            vec!["r3", "c", ""],
        ]);
        let out = expand_sections(&input, "Ref");

        let refs: Vec<&str> = (0..out.len()).map(|i| out.cell(i, "Ref").unwrap()).collect();
        let xs: Vec<&str> = (0..out.len()).map(|i| out.cell(i, "x").unwrap()).collect();
        assert_eq!(refs, vec!["r1", "p", "q", "r3"]);
        assert_eq!(xs, vec!["a", "b", "", "c"]);
    }

    #[test]
    fn absent_column_is_a_no_op() {
        let input = table(vec![vec!["A\n\nB", "1", "2"]]);
        assert_eq!(expand_sections(&input, "Missing"), input);
    }
}
