use super::ui;
use comfy_table::Cell;

// Illustrative reference values for a fixed 12% annual return. These are a
// display-only copy of the published reference table, not derived from the
// projection calculator.
const REFERENCE_ROWS: &[(&str, &str, &str)] = &[
    ("1 year", "100", "0 Lakhs"),
    ("5 years", "100", "0.1 Lakhs"),
    ("8 years", "100", "0.2 Lakhs"),
    ("10 years", "100", "0.2 Lakhs"),
    ("12 years", "100", "0.3 Lakhs"),
    ("15 years", "100", "0.5 Lakhs"),
    ("18 years", "100", "0.8 Lakhs"),
    ("20 years", "100", "1 Lakhs"),
];

pub fn run() {
    println!(
        "\n{}",
        ui::style_text(
            "Projected SIP returns for various durations [@12%]",
            ui::StyleType::Title
        )
    );

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Duration"),
        ui::header_cell("SIP Amount (₹)"),
        ui::header_cell("Future Value (₹)"),
    ]);

    for (duration, amount, value) in REFERENCE_ROWS {
        table.add_row(vec![
            Cell::new(duration),
            ui::amount_cell(amount.to_string()),
            ui::amount_cell(value.to_string()),
        ]);
    }

    println!("{table}");
    println!(
        "{}",
        ui::style_text(
            "Reference values are illustrative, not computed live.",
            ui::StyleType::Subtle
        )
    );
}
