//! Leads list example - a page integrating the filter panel and the table.
//!
//! This example shows the shape of every list screen in the dashboard:
//! the page owns a master row list, applies the filter panel's criteria
//! with `filter_records`, and hands the result to the table engine, which
//! does the searching, sorting and paginating.
//!
//! Run with `cargo run --example leads`; the walkthrough prints each view
//! to stdout and logs transitions to `leads-example.log`.

use std::fs::File;

use girder::filter::{FilterCategory, FilterPanel, filter_records};
use girder::table::{Column, Table};
use girder_model::{Direction, Record};
use log::LevelFilter;
use simplelog::{Config, WriteLogger};

// =============================================================================
// Simulated API
// =============================================================================

/// The rows a leads endpoint would return.
fn fetch_leads() -> Vec<Record> {
    let raw = [
        ("Contoso", "Tech", "Ana", "2024-01-10", 125_000i64),
        ("Acme", "Retail", "Bruno", "2023-11-02", 40_000),
        ("Borealis Energy Partners", "Energy", "Ana", "2024-02-01", 310_000),
        ("Globex", "Tech", "Carla", "2023-12-18", 87_500),
        ("Initech", "Tech", "Bruno", "2024-01-22", 15_000),
        ("Umbrella", "Retail", "Carla", "2024-03-05", 230_000),
    ];
    raw.into_iter()
        .map(|(name, industry, salesman, created, amount)| {
            Record::new()
                .set("name", name)
                .set("industry", industry)
                .set("salesman", Record::new().set("name", salesman))
                .set("created", created)
                .set("amount", amount)
        })
        .collect()
}

fn print_view(table: &Table) {
    let columns = table.columns();
    let view = table.view();
    let headers: Vec<String> = columns.iter().map(|c| c.header.clone()).collect();
    println!("  {}", headers.join(" | "));
    for row in view.rows() {
        let cells: Vec<String> = columns.iter().map(|c| c.cell(row).text).collect();
        println!("  {}", cells.join(" | "));
    }
    println!(
        "  page {}/{} ({} rows)\n",
        view.page_number(),
        view.page_count(),
        view.total_count()
    );
}

fn main() -> std::io::Result<()> {
    WriteLogger::init(
        LevelFilter::Debug,
        Config::default(),
        File::create("leads-example.log")?,
    )
    .expect("failed to initialize logger");

    let master = fetch_leads();

    let columns = vec![
        Column::new("name", "Name").flex(2),
        Column::new("industry", "Industry"),
        Column::new("salesman.name", "Salesman"),
        Column::new("created", "Created"),
        Column::new("amount", "Amount")
            .render(|row| match row.get_i64("amount") {
                Ok(Some(amount)) => format!("${amount}"),
                _ => "-".to_string(),
            }),
    ];

    let table = Table::with_rows(columns, master.clone())
        .with_search_keys(["name", "salesman.name"])
        .with_sort("created", Direction::Desc)
        .with_page_size(4);

    println!("All leads, newest first:");
    print_view(&table);

    // The filter panel reports changes back to the page, which re-derives
    // the table's rows from its master list.
    let refilter = {
        let table = table.clone();
        let master = master.clone();
        move |criteria: &[girder::filter::Criterion]| {
            table.set_rows(filter_records(&master, criteria));
        }
    };
    let panel = FilterPanel::new(vec![
        FilterCategory::new("industry", "Industry", ["Tech", "Retail", "Energy"]),
        FilterCategory::new("salesman.name", "Salesman", ["Ana", "Bruno", "Carla"]),
    ])
    .on_change(refilter);

    panel.open();
    panel.toggle_option("Tech");
    panel.apply();
    println!("Filtered to {:?}:", panel.pills());
    print_view(&table);

    table.set_search_text("bruno");
    println!("Searching for \"bruno\" within the filtered rows:");
    print_view(&table);

    table.set_search_text("");
    table.toggle_sort("amount");
    println!("Sorted by amount, ascending:");
    print_view(&table);

    panel.remove_criterion("industry");
    println!("Pill removed, back to every lead:");
    print_view(&table);

    Ok(())
}
