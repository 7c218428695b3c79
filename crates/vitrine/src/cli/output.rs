//! Output formatting utilities

use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, Color, ContentArrangement, Table};
use vitrine_facets::{Facet, ItemPage, Product, Selection};

/// Print a table with headers and rows
pub fn print_table(headers: &[&str], rows: Vec<Vec<String>>) {
    println!("{}", build_table(headers, rows));
}

fn build_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let header_cells: Vec<Cell> = headers
        .iter()
        .map(|h| Cell::new(h).fg(Color::Cyan))
        .collect();
    table.set_header(header_cells);

    for row in rows {
        table.add_row(row);
    }
    table
}

/// One row per term, in vocabulary order.
pub fn facet_rows(facets: &[Facet], selection: &Selection) -> Vec<Vec<String>> {
    facets
        .iter()
        .flat_map(|facet| {
            facet.terms.iter().map(move |term| {
                let mark = if selection.is_selected(&facet.name, term.uid.as_str()) {
                    "[x]"
                } else if term.disabled {
                    "[-]"
                } else {
                    "[ ]"
                };
                vec![
                    facet.name.clone(),
                    format!("{} {}", mark, term.name),
                    term.uid.to_string(),
                    term.count.to_string(),
                ]
            })
        })
        .collect()
}

pub fn print_facets(facets: &[Facet], selection: &Selection) {
    print_table(
        &["CATEGORY", "TERM", "UID", "COUNT"],
        facet_rows(facets, selection),
    );
}

pub fn format_price(price: Option<f64>) -> String {
    price.map(|p| format!("{:.2}", p)).unwrap_or_else(|| "-".to_string())
}

fn product_row(product: &Product) -> Vec<String> {
    vec![
        product.uid.to_string(),
        product.title.clone(),
        format_price(product.price),
        product.url.clone().unwrap_or_default(),
    ]
}

pub fn print_page(page: &ItemPage) {
    print_table(
        &["UID", "TITLE", "PRICE", "URL"],
        page.items.iter().map(product_row).collect(),
    );
    println!("{} of {} products", page.items.len(), page.total_count);
}
