use girder::table::{Column, Table};
use girder_model::{Direction, Record, Value};

fn record(json: serde_json::Value) -> Record {
    serde_json::from_value(json).expect("test row should deserialize")
}

fn names(view: &girder::table::TableView) -> Vec<String> {
    view.rows()
        .iter()
        .map(|r| r.get_string("name").unwrap().unwrap_or_default().to_string())
        .collect()
}

fn lead_columns() -> Vec<Column> {
    vec![
        Column::new("name", "Name"),
        Column::new("industry", "Industry"),
        Column::new("salesman.name", "Salesman"),
    ]
}

fn leads() -> Vec<Record> {
    vec![
        record(serde_json::json!({
            "name": "Contoso", "industry": "Tech",
            "salesman": { "name": "Ana" },
        })),
        record(serde_json::json!({
            "name": "acme", "industry": "Retail",
            "salesman": { "name": "Bruno" },
        })),
        record(serde_json::json!({
            "name": "Borealis", "industry": "Energy",
            "salesman": { "name": "Ana" },
        })),
    ]
}

#[test]
fn test_toggle_sort_orders_ascending_case_insensitively() {
    let table = Table::with_rows(lead_columns(), leads());
    table.toggle_sort("name");
    assert_eq!(names(&table.view()), vec!["acme", "Borealis", "Contoso"]);
}

#[test]
fn test_toggle_sort_flips_direction_and_twice_restores() {
    let table = Table::with_rows(lead_columns(), leads());
    table.toggle_sort("name");
    let first = names(&table.view());

    table.toggle_sort("name");
    assert_eq!(table.sort().unwrap().1, Direction::Desc);
    assert_eq!(names(&table.view()), vec!["Contoso", "Borealis", "acme"]);

    table.toggle_sort("name");
    assert_eq!(names(&table.view()), first);
}

#[test]
fn test_numeric_strings_sort_numerically() {
    let rows = vec![
        record(serde_json::json!({ "name": "a", "age": "9" })),
        record(serde_json::json!({ "name": "b", "age": "10" })),
        record(serde_json::json!({ "name": "c", "age": "2" })),
    ];
    let table = Table::with_rows(vec![Column::new("age", "Age")], rows);
    table.toggle_sort("age");
    let ages: Vec<String> = table
        .view()
        .rows()
        .iter()
        .map(|r| r.get_string("age").unwrap().unwrap().to_string())
        .collect();
    assert_eq!(ages, vec!["2", "9", "10"]);
}

#[test]
fn test_date_strings_sort_chronologically() {
    let rows = vec![
        record(serde_json::json!({ "name": "a", "created": "2024-01-10" })),
        record(serde_json::json!({ "name": "b", "created": "2023-12-31" })),
        record(serde_json::json!({ "name": "c", "created": "2024-01-02" })),
    ];
    let table = Table::with_rows(
        vec![Column::new("name", "Name"), Column::new("created", "Created")],
        rows,
    );
    table.toggle_sort("created");
    assert_eq!(names(&table.view()), vec!["b", "c", "a"]);
}

#[test]
fn test_sort_by_nested_key() {
    let table = Table::with_rows(lead_columns(), leads());
    table.toggle_sort("salesman.name");
    // Stable sort: the two "Ana" rows keep their arrival order.
    assert_eq!(names(&table.view()), vec!["Contoso", "Borealis", "acme"]);
}

#[test]
fn test_unsorted_view_preserves_arrival_order() {
    let table = Table::with_rows(lead_columns(), leads());
    assert_eq!(names(&table.view()), vec!["Contoso", "acme", "Borealis"]);
}

#[test]
fn test_unsortable_column_is_a_noop() {
    let columns = vec![
        Column::new("name", "Name"),
        Column::new("notes", "Notes").sortable(false),
    ];
    let table = Table::with_rows(columns, leads());
    assert!(table.toggle_sort("notes").is_none());
    assert!(table.sort().is_none());
}

#[test]
fn test_unknown_sort_key_is_a_noop() {
    let table = Table::with_rows(lead_columns(), leads());
    assert!(table.toggle_sort("website").is_none());
    assert!(table.sort().is_none());
}

#[test]
fn test_search_matches_declared_keys_case_insensitively() {
    let table = Table::with_rows(lead_columns(), leads()).with_search_keys(["name"]);
    table.set_search_text("ACME");
    assert_eq!(names(&table.view()), vec!["acme"]);
}

#[test]
fn test_search_ignores_undeclared_columns() {
    let table = Table::with_rows(lead_columns(), leads()).with_search_keys(["name"]);
    // "Tech" only appears under the industry key, which is not searched.
    table.set_search_text("Tech");
    assert_eq!(table.view().total_count(), 0);
}

#[test]
fn test_search_defaults_to_all_column_keys() {
    let table = Table::with_rows(lead_columns(), leads());
    table.set_search_text("bruno");
    assert_eq!(names(&table.view()), vec!["acme"]);
}

#[test]
fn test_absent_values_never_match() {
    let mut rows = leads();
    rows.push(record(serde_json::json!({ "industry": "Tech" })));
    let table = Table::with_rows(lead_columns(), rows).with_search_keys(["name"]);
    table.set_search_text("o");
    // Only rows with a name containing "o"; the nameless row never matches.
    assert_eq!(names(&table.view()), vec!["Contoso", "Borealis"]);
}

#[test]
fn test_empty_search_matches_everything() {
    let table = Table::with_rows(lead_columns(), leads());
    table.set_search_text("bor");
    table.set_search_text("");
    assert_eq!(table.view().total_count(), 3);
}

fn numbered_rows(count: usize) -> Vec<Record> {
    (0..count)
        .map(|i| {
            Record::new()
                .set("id", i as i64)
                .set("name", format!("Lead {i:02}"))
        })
        .collect()
}

#[test]
fn test_page_count_and_clamping() {
    let table =
        Table::with_rows(vec![Column::new("name", "Name")], numbered_rows(45)).with_page_size(20);

    let view = table.view();
    assert_eq!(view.page_count(), 3);
    assert_eq!(view.total_count(), 45);
    assert_eq!(view.len(), 20);
    assert!(!view.has_prev());
    assert!(view.has_next());

    table.set_page(99);
    let view = table.view();
    assert_eq!(view.page_number(), 3);
    assert_eq!(view.len(), 5);
    assert!(!view.has_next());
    assert_eq!(
        view.rows()[0].get_i64("id").unwrap(),
        Some(40),
        "clamped page shows the last page's rows"
    );
}

#[test]
fn test_empty_row_set_still_has_one_page() {
    let table = Table::new(vec![Column::new("name", "Name")]);
    let view = table.view();
    assert_eq!(view.page_count(), 1);
    assert_eq!(view.page_number(), 1);
    assert!(view.is_empty());
}

#[test]
fn test_page_resets_on_search_size_and_rows_but_not_sort() {
    let table =
        Table::with_rows(vec![Column::new("name", "Name")], numbered_rows(45)).with_page_size(10);

    table.set_page(3);
    table.set_search_text("lead");
    assert_eq!(table.requested_page(), 1);

    table.set_page(3);
    table.set_page_size(20);
    assert_eq!(table.requested_page(), 1);

    table.set_page(2);
    table.set_rows(numbered_rows(45));
    assert_eq!(table.requested_page(), 1);

    table.set_page(2);
    table.toggle_sort("name");
    assert_eq!(table.view().page_number(), 2);
}

#[test]
fn test_sort_survives_row_replacement() {
    let table = Table::with_rows(lead_columns(), leads()).with_sort("name", Direction::Desc);
    table.set_rows(leads());
    assert_eq!(
        table.sort(),
        Some(("name".into(), Direction::Desc)),
        "sort state is preserved when rows arrive"
    );
    assert_eq!(names(&table.view()), vec!["Contoso", "Borealis", "acme"]);
}

#[test]
fn test_next_and_prev_page_move_from_the_visible_page() {
    let table =
        Table::with_rows(vec![Column::new("name", "Name")], numbered_rows(45)).with_page_size(20);

    table.next_page();
    assert_eq!(table.view().page_number(), 2);
    table.next_page();
    table.next_page();
    assert_eq!(table.view().page_number(), 3, "cannot advance past the end");
    table.prev_page();
    assert_eq!(table.view().page_number(), 2);
}

#[test]
fn test_cell_truncates_with_tooltip() {
    let column = Column::new("name", "Name");
    let row = Record::new().set("name", "International Business Machines");
    let cell = column.cell(&row);
    assert_eq!(cell.text, "International Busin…");
    assert_eq!(
        cell.tooltip.as_deref(),
        Some("International Business Machines")
    );

    let short = column.cell(&Record::new().set("name", "Acme"));
    assert_eq!(short.text, "Acme");
    assert!(short.tooltip.is_none());
}

#[test]
fn test_cell_placeholder_for_empty_and_absent() {
    let column = Column::new("name", "Name");
    assert_eq!(column.cell(&Record::new()).text, "-");
    assert_eq!(column.cell(&Record::new().set("name", "")).text, "-");
    assert_eq!(column.cell(&Record::new().set("name", Value::Null)).text, "-");
}

#[test]
fn test_render_override_wins_verbatim() {
    let column = Column::new("amount", "Amount")
        .render(|row| format!("${}", row.get_i64("amount").unwrap().unwrap_or(0)));
    let row = Record::new().set("amount", 1500i64);
    let cell = column.cell(&row);
    assert_eq!(cell.text, "$1500");
    assert!(cell.tooltip.is_none());
}

#[test]
fn test_shared_handles_see_the_same_state() {
    let table = Table::with_rows(lead_columns(), leads());
    let handle = table.clone();
    handle.set_search_text("contoso");
    assert_eq!(table.view().total_count(), 1);
    assert!(table.is_dirty());
}
