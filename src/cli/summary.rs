//! Summary and month range commands

use crate::api::ExpenseApi;
use crate::config::Settings;
use crate::display::category::format_budget_progress;
use crate::error::CostbookResult;
use crate::models::Month;
use crate::reports::MonthSummary;

/// Print the month overview: totals, top category and budget progress
pub fn handle_summary(
    api: &dyn ExpenseApi,
    settings: &Settings,
    month: Month,
) -> CostbookResult<()> {
    let categories = api.list_categories()?;
    let transactions = api.list_transactions(&month.range())?;
    let summary = MonthSummary::generate(month, &transactions, &categories);
    print!("{}", summary.format_terminal(&settings.currency_code));
    Ok(())
}

/// Print budget progress only
pub fn handle_budgets(
    api: &dyn ExpenseApi,
    settings: &Settings,
    month: Month,
) -> CostbookResult<()> {
    let categories = api.list_categories()?;
    let transactions = api.list_transactions(&month.range())?;
    let summary = MonthSummary::generate(month, &transactions, &categories);
    println!("Budgets for {}", month);
    print!(
        "{}",
        format_budget_progress(&summary.budgets, &settings.currency_code)
    );
    Ok(())
}

/// Describe the resolved bounds of a month (no network access)
pub fn format_range(month: Month) -> String {
    let range = month.range();
    let [(_, from), (_, to)] = range.query_params();
    format!(
        "Month: {}\nFirst day: {}\nLast day: {}\nStart: {}\nEnd: {}\nQuery: from={}&to={}\n",
        month,
        month.first_day(),
        month.last_day(),
        range.from.format("%Y-%m-%d %H:%M:%S%.3f"),
        range.to.format("%Y-%m-%d %H:%M:%S%.3f"),
        from,
        to
    )
}
