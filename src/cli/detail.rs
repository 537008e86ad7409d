use super::ui;
use crate::core::stats::{self, CountryStats, LineChart};
use crate::core::{Country, OlympicService};
use anyhow::{Result, anyhow};
use comfy_table::Cell;
use tracing::warn;

/// A single country's participation history.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryDetail {
    pub country: Country,
    pub stats: CountryStats,
    pub line: LineChart,
}

impl From<Country> for CountryDetail {
    fn from(country: Country) -> Self {
        CountryDetail {
            stats: CountryStats::from(&country),
            line: stats::medals_line(&country),
            country,
        }
    }
}

impl CountryDetail {
    pub fn display_as_table(&self) -> String {
        let mut participations: Vec<_> = self.country.participations.iter().collect();
        participations.sort_by_key(|p| p.year);

        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("Year"),
            ui::header_cell("City"),
            ui::header_cell("Medals"),
            ui::header_cell("Athletes"),
        ]);

        // The line series and the sorted participations share the same order
        for (point, participation) in self.line.series.iter().zip(participations) {
            table.add_row(vec![
                Cell::new(&point.name),
                Cell::new(&participation.city),
                ui::number_cell(point.value),
                ui::number_cell(participation.athlete_count),
            ]);
        }

        let mut output = ui::page_title(&self.line.name);
        output.push_str(&ui::stat_line("Number of entries", self.stats.entries));
        output.push_str(&ui::stat_line(
            "Total number medals",
            self.stats.total_medals,
        ));
        output.push_str(&ui::stat_line(
            "Total number of athletes",
            self.stats.total_athletes,
        ));
        output.push('\n');
        output.push_str(&table.to_string());
        output
    }
}

pub async fn run(service: &OlympicService, name: &str) -> Result<()> {
    let indicator = ui::LoadingIndicator::spawn(service.is_loading(), super::LOADING_MESSAGE);
    let found = service.find_by_name(name).await;
    indicator.stop().await;

    match found {
        Some(country) => {
            println!("{}", CountryDetail::from(country).display_as_table());
            Ok(())
        }
        None if service.get_snapshot().is_none() => {
            let error = service
                .current_error()
                .unwrap_or_else(|| "Olympic data unavailable".to_string());
            eprintln!("{}", ui::style_text(&error, ui::StyleType::Error));
            Err(anyhow!(error))
        }
        None => {
            let display_name = urlencoding::decode(name)
                .map(|n| n.into_owned())
                .unwrap_or_else(|_| name.to_string());
            warn!("Country not found: {display_name}");
            println!(
                "{}",
                ui::style_text(
                    &format!("No data for country \"{display_name}\""),
                    ui::StyleType::Subtle
                )
            );
            Ok(())
        }
    }
}
