use comfy_table::presets::UTF8_NO_BORDERS;
use comfy_table::{Cell, CellAlignment, Table};

/// Tabular rendering shared by the `Display` impls of every output.
pub trait PrintExt {
    fn table(&self) -> Table;

    fn print_table(&self) {
        println!("{}", self.table());
    }
}

/// Table with a row label column on the left and right aligned values.
pub(crate) fn labeled_table<I, S>(header: I) -> Table
where
    I: IntoIterator<Item = S>,
    S: ToString,
{
    let mut table = Table::new();
    table
        .load_preset(UTF8_NO_BORDERS)
        .set_header(header.into_iter().map(|h| Cell::new(h.to_string())).collect::<Vec<_>>());
    for column in table.column_iter_mut().skip(1) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    table
}
