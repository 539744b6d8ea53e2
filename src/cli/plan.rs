use super::ui;
use crate::core::config::SipPlan;
use crate::core::sip::{self, Projection, ProjectionInput};
use anyhow::Result;
use chrono::{Months, NaiveDate, Utc};
use comfy_table::{Attribute, Cell, CellAlignment, Color};
use rust_decimal::{Decimal, prelude::*};
use rust_finprim::rate::cagr;
use tracing::info;

struct PlanRow {
    name: String,
    input: ProjectionInput,
    projection: Projection,
    effective_cagr: Option<f64>,
    maturity: Option<NaiveDate>,
}

pub fn run(plans: &[SipPlan], currency: &str) -> Result<()> {
    if plans.is_empty() {
        println!(
            "No SIP plans found. Add plans to the config file, or pass --years, --monthly and --rate."
        );
        return Ok(());
    }

    info!("Projecting {} SIP plan(s)", plans.len());

    let mut rows = Vec::new();
    for plan in plans {
        let input = ProjectionInput::new(
            plan.period_years,
            plan.monthly_contribution,
            plan.annual_return_pct,
        );
        let projection = sip::project(&input)?;
        let effective_cagr = effective_cagr(&projection, plan.period_years);
        let maturity = maturity_date(projection.months);
        rows.push(PlanRow {
            name: plan.name.clone(),
            input,
            projection,
            effective_cagr,
            maturity,
        });
    }

    display_plan_rows(&rows, currency);
    Ok(())
}

/// Annualized growth of the invested amount into the projected value,
/// as a percentage.
fn effective_cagr(projection: &Projection, period_years: u32) -> Option<f64> {
    if projection.invested <= Decimal::ZERO || period_years == 0 {
        return None;
    }

    let rate = cagr(
        projection.invested,
        projection.future_value,
        Decimal::from(period_years),
    );
    (rate * Decimal::from(100)).to_f64()
}

fn maturity_date(months: u32) -> Option<NaiveDate> {
    Utc::now().date_naive().checked_add_months(Months::new(months))
}

fn display_plan_rows(rows: &[PlanRow], currency: &str) {
    println!(
        "\n{}",
        ui::style_text("SIP Projections", ui::StyleType::Title)
    );

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Plan"),
        ui::header_cell(&format!("Monthly ({currency})")),
        ui::header_cell("Years"),
        ui::header_cell("Rate (%)"),
        ui::header_cell(&format!("Invested ({currency})")),
        ui::header_cell(&format!("Future Value ({currency})")),
        ui::header_cell(&format!("Gain ({currency})")),
        ui::header_cell("CAGR"),
        ui::header_cell("Maturity"),
    ]);

    for row in rows {
        let cagr_cell = match row.effective_cagr {
            Some(value) => ui::format_percentage_cell(value, |v| format!("{v:.2}%")),
            None => ui::na_cell(false),
        };

        table.add_row(vec![
            Cell::new(&row.name),
            ui::amount_cell(format!("{:.2}", row.input.monthly_contribution)),
            ui::amount_cell(row.input.period_years.to_string()),
            ui::amount_cell(format!("{:.2}", row.input.annual_return_pct)),
            ui::amount_cell(row.projection.invested.to_string()),
            ui::amount_cell(row.projection.future_value.to_string()),
            ui::amount_cell(row.projection.gain.to_string()),
            cagr_cell,
            ui::format_optional_cell(row.maturity, |d| d.format("%Y-%m-%d").to_string()),
        ]);
    }

    if rows.len() > 1 {
        let combined_invested: Decimal = rows.iter().map(|r| r.projection.invested).sum();
        let combined_value: Decimal = rows.iter().map(|r| r.projection.future_value).sum();
        table.add_row(vec![
            Cell::new("Combined").add_attribute(Attribute::Bold),
            ui::na_cell(false),
            ui::na_cell(false),
            ui::na_cell(false),
            ui::amount_cell(combined_invested.to_string()),
            Cell::new(combined_value.to_string())
                .add_attribute(Attribute::Bold)
                .fg(Color::Green)
                .set_alignment(CellAlignment::Right),
            ui::amount_cell((combined_value - combined_invested).to_string()),
            ui::na_cell(false),
            ui::na_cell(false),
        ]);
    }

    println!("{table}");
}
