use super::ui;
use crate::core::stats::{self, PieSlice};
use crate::core::{Country, OlympicService};
use anyhow::Result;
use comfy_table::Cell;
use tracing::debug;

const BAR_WIDTH: usize = 30;

/// The home screen: medals per country plus dataset-wide counts.
#[derive(Debug, Clone, PartialEq)]
pub struct Overview {
    pub games: usize,
    pub slices: Vec<PieSlice>,
}

impl Overview {
    pub fn new(countries: &[Country]) -> Self {
        Overview {
            games: stats::distinct_games(countries),
            slices: stats::medals_pie(countries),
        }
    }

    pub fn total_medals(&self) -> u64 {
        self.slices.iter().map(|s| s.value).sum()
    }

    pub fn display_as_table(&self) -> String {
        let total = self.total_medals();

        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("Country"),
            ui::header_cell("Medals"),
            ui::header_cell("Share (%)"),
            ui::header_cell(""),
        ]);

        for slice in &self.slices {
            let pct = stats::share_pct(slice.value, total);
            table.add_row(vec![
                Cell::new(&slice.name),
                ui::number_cell(slice.value),
                ui::number_cell(format!("{pct:.2}%")),
                Cell::new(ui::bar(pct, BAR_WIDTH)),
            ]);
        }

        let mut output = ui::page_title("Medals per Country");
        output.push_str(&ui::stat_line("Number of JOs", self.games));
        output.push_str(&ui::stat_line("Number of countries", self.slices.len()));
        output.push('\n');
        output.push_str(&table.to_string());
        output.push_str(&format!(
            "\n\n{}",
            ui::style_text(
                "Run `olympics detail <country>` for a country's history.",
                ui::StyleType::Subtle
            )
        ));
        output
    }
}

pub async fn run(service: &OlympicService) -> Result<()> {
    let snapshot = super::load_snapshot(service).await?;
    debug!(countries = snapshot.len(), "Rendering overview");

    println!("{}", Overview::new(&snapshot).display_as_table());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Participation;

    fn country(name: &str, medals: &[(u16, u32)]) -> Country {
        Country {
            id: None,
            country: name.to_string(),
            participations: medals
                .iter()
                .enumerate()
                .map(|(i, (year, count))| Participation {
                    id: i as u32 + 1,
                    year: *year,
                    city: "Somewhere".to_string(),
                    medals_count: *count,
                    athlete_count: 10,
                })
                .collect(),
        }
    }

    #[test]
    fn test_overview_figures() {
        let countries = vec![
            country("Italy", &[(2012, 10), (2016, 4)]),
            country("Spain", &[(2016, 6), (2020, 0)]),
        ];
        let overview = Overview::new(&countries);

        assert_eq!(overview.games, 3);
        assert_eq!(overview.slices.len(), 2);
        assert_eq!(overview.total_medals(), 20);
    }

    #[test]
    fn test_display_lists_every_country() {
        let countries = vec![country("Italy", &[(2012, 10)]), country("Spain", &[(2012, 30)])];
        let output = console::strip_ansi_codes(&Overview::new(&countries).display_as_table())
            .to_string();

        assert!(output.contains("Medals per Country"));
        assert!(output.contains("Number of JOs: 1"));
        assert!(output.contains("Number of countries: 2"));
        assert!(output.contains("Italy"));
        assert!(output.contains("25.00%"));
        assert!(output.contains("75.00%"));
    }

    #[test]
    fn test_display_empty_dataset() {
        let output = console::strip_ansi_codes(&Overview::new(&[]).display_as_table()).to_string();
        assert!(output.contains("Number of JOs: 0"));
        assert!(output.contains("Number of countries: 0"));
    }
}
