use colored::Colorize;

use crate::chart::ChartConfig;
use crate::deck::REVENUE_DATA;
use crate::format;
use crate::theme::Theme;

pub fn run(json: bool) -> anyhow::Result<()> {
    if json {
        let config = ChartConfig::revenue(&REVENUE_DATA, &Theme::light());
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    let Some(last) = REVENUE_DATA.last() else {
        return Ok(());
    };
    println!("{}", "Monthly Revenue ($)".bold());
    for point in &REVENUE_DATA {
        let share = if last.revenue > 0.0 {
            point.revenue / last.revenue
        } else {
            0.0
        };
        let note = format!(
            "{} of {}",
            format::format_percentage(share),
            format::month_label(last.month)
        );
        println!(
            "  {:<10} {:>12}  {}",
            format::month_label(point.month),
            format::format_currency(point.revenue).green(),
            note.dimmed(),
        );
    }
    Ok(())
}
