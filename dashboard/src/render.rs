use crate::state::View;
use tracing::{info, warn};

const BAR_WIDTH: usize = 10;

/// Writes the current view to the log, one line per device card
pub fn render(view: &View) {
    match view {
        View::Loading => info!("Loading device data..."),
        View::Error(message) => {
            warn!("{}. Please check your connection to the device simulator.", message)
        }
        View::Devices {
            cards,
            banner,
            last_refreshed,
        } => {
            if let Some(message) = banner {
                warn!("{} (showing data from {})", message, last_refreshed.format("%H:%M:%S"));
            }
            info!(
                "Last updated: {} ({} devices)",
                last_refreshed.format("%H:%M:%S"),
                cards.len()
            );
            for card in cards {
                let t = &card.telemetry;
                info!(
                    device_id = %t.device_id,
                    status = ?card.status,
                    "heart rate {} BPM ({:?}) {}, steps {} {}, battery {}% ({:?}) {}, updated {:.1} min ago",
                    t.heart_rate,
                    card.heart_rate_tier,
                    bar(card.heart_rate_fraction),
                    t.steps,
                    bar(card.steps_fraction),
                    t.battery_level,
                    card.battery_tier,
                    bar(card.battery_fraction),
                    card.minutes_since_update
                );
            }
        }
    }
}

/// Fixed-width text progress bar for a fraction in [0, 1]
fn bar(fraction: f64) -> String {
    let filled = (fraction.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar() {
        assert_eq!(bar(0.0), "[----------]");
        assert_eq!(bar(0.75), "[########--]");
        assert_eq!(bar(1.0), "[##########]");
        assert_eq!(bar(3.0), "[##########]");
    }
}
