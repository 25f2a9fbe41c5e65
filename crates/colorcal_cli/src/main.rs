//! CLI month grid probe.
//!
//! # Responsibility
//! - Render one month grid as text through the public `colorcal_core` API.
//! - Keep output deterministic for a given month and start weekday.
//!
//! Usage: `colorcal_cli [YYYY-MM] [start-weekday]`

use colorcal_core::{
    Calendar, CalendarConfig, CalendarDate, CalendarOptions, CellOrigin, DayCell,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args) {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(message) => {
            eprintln!("colorcal_cli: {message}");
            ExitCode::from(2)
        }
    }
}

fn run(args: &[String]) -> Result<String, String> {
    let current_date = args.first().map(|value| parse_month(value)).transpose()?;
    let start_weekday = match args.get(1) {
        Some(value) => value
            .parse::<u8>()
            .map_err(|_| format!("start weekday must be 0..=6, got `{value}`"))?,
        None => 0,
    };

    let config = CalendarConfig {
        current_date,
        start_weekday,
        select_initial_date: false,
        ..CalendarConfig::default()
    };
    let calendar: Calendar<()> =
        Calendar::initialize(CalendarOptions::new(config)).map_err(|err| err.to_string())?;
    Ok(render(&calendar))
}

fn parse_month(value: &str) -> Result<CalendarDate, String> {
    let invalid = || format!("expected YYYY-MM, got `{value}`");
    let (year, month) = value.split_once('-').ok_or_else(invalid)?;
    let year = year.parse::<i32>().map_err(|_| invalid())?;
    let month = month.parse::<u8>().map_err(|_| invalid())?;
    if month == 0 {
        return Err(invalid());
    }
    CalendarDate::new(year, month - 1, 1).map_err(|err| err.to_string())
}

fn render(calendar: &Calendar<()>) -> String {
    let mut out = format!(
        "colorcal_core {}\n{}\n",
        colorcal_core::core_version(),
        calendar.display_month()
    );
    let header: Vec<String> = calendar
        .weekday_labels()
        .iter()
        .map(|label| format!("{label:>5}"))
        .collect();
    out.push_str(&header.concat());
    out.push('\n');
    for week in calendar.grid().weeks() {
        let row: Vec<String> = week.iter().map(render_cell).collect();
        out.push_str(&row.concat());
        out.push('\n');
    }
    out
}

fn render_cell(cell: &DayCell<()>) -> String {
    let marker = if cell.is_today { "*" } else { " " };
    match cell.origin {
        CellOrigin::CurrentMonth => format!("  {:>2}{marker}", cell.day_number),
        CellOrigin::PrevMonth | CellOrigin::NextMonth => {
            format!(" [{:>2}]", cell.day_number)
        }
    }
}
