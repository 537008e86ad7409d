use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    StatLabel,
    StatValue,
    Error,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::StatLabel => style(text).bold(),
        StyleType::StatValue => style(text).green().bold(),
        StyleType::Error => style(text).red(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Formats a page title followed by a blank line.
pub fn page_title(title: &str) -> String {
    format!("{}\n\n", style_text(title, StyleType::Title))
}

/// Formats a single `label: value` statistic line.
pub fn stat_line(label: &str, value: impl ToString) -> String {
    format!(
        "{}: {}\n",
        style_text(label, StyleType::StatLabel),
        style_text(&value.to_string(), StyleType::StatValue)
    )
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

/// Right-aligned cell for numeric values.
pub fn number_cell(value: impl ToString) -> Cell {
    Cell::new(value.to_string()).set_alignment(CellAlignment::Right)
}

/// Horizontal bar proportional to `pct` (0 to 100), `width` characters at most.
pub fn bar(pct: f64, width: usize) -> String {
    let filled = ((pct.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    "█".repeat(filled)
}

pub fn new_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}")
    {
        pb.set_style(spinner_style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Shows a spinner while the watched loading flag is set.
pub struct LoadingIndicator {
    stop: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

impl LoadingIndicator {
    pub fn spawn(mut loading: watch::Receiver<bool>, message: &'static str) -> Self {
        let (stop, mut stop_rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            let mut spinner: Option<ProgressBar> = None;
            loop {
                let is_loading = *loading.borrow_and_update();
                match (is_loading, spinner.take()) {
                    (true, None) => spinner = Some(new_spinner(message)),
                    (false, Some(pb)) => pb.finish_and_clear(),
                    (_, current) => spinner = current,
                }
                tokio::select! {
                    changed = loading.changed() => {
                        if changed.is_err() {
                            break;
                        }
                    }
                    _ = &mut stop_rx => break,
                }
            }
            if let Some(pb) = spinner {
                pb.finish_and_clear();
            }
        });
        LoadingIndicator { stop, handle }
    }

    /// Clears the spinner and waits for the background task to end.
    /// Returns `false` if the task panicked.
    pub async fn stop(self) -> bool {
        let _ = self.stop.send(());
        self.handle.await.is_ok()
    }
}
