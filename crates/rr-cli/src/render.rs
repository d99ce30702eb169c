//! Plain-text rendering of carousels and results

use rr_spin::{AggregatedResult, CarouselResult};

/// Cells shown on each side of the pointer
pub const WINDOW_RADIUS: usize = 2;

/// Width of a full breakdown bar
const BAR_WIDTH: usize = 10;

/// Resting carousel: neighbours plus the bracketed winner
pub fn carousel_line(carousel: &CarouselResult) -> String {
    let window = carousel.window(WINDOW_RADIUS);
    let pointer = WINDOW_RADIUS.min(carousel.winning_slot());

    window
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            if i == pointer {
                format!("[ {cell} ]")
            } else {
                format!("  {cell}  ")
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Breakdown rows: value, bar proportional to share, `N×`; winner marked
pub fn breakdown_lines(result: &AggregatedResult) -> Vec<String> {
    let width = result
        .counts()
        .iter()
        .map(|c| c.value.chars().count())
        .max()
        .unwrap_or(0);

    result
        .counts()
        .iter()
        .map(|row| {
            let filled = (result.share(&row.value) * BAR_WIDTH as f64).round() as usize;
            let bar = format!("{}{}", "█".repeat(filled), "·".repeat(BAR_WIDTH - filled));
            let marker = if result.is_winner(&row.value) { "★" } else { " " };
            let pad = width - row.value.chars().count();
            format!(
                "{marker} {}{} {bar} {}×",
                row.value,
                " ".repeat(pad),
                row.count
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rr_core::Mode;
    use rr_spin::{RandomSource, SpinSession, aggregate, generate_carousel};

    #[test]
    fn test_carousel_line_brackets_winner() {
        let mut source = RandomSource::seeded(1);
        let carousel = generate_carousel(&Mode::options(["Only"]), &mut source).unwrap();
        assert_eq!(
            carousel_line(&carousel),
            "  Only     Only   [ Only ]   Only     Only  "
        );
    }

    #[test]
    fn test_breakdown() {
        let result = aggregate(&["Да", "Нет", "Да"]).unwrap();
        let lines = breakdown_lines(&result);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "★ Да  ███████··· 2×");
        assert_eq!(lines[1], "  Нет ███······· 1×");
    }

    #[test]
    fn test_breakdown_from_session() {
        let mut session = SpinSession::with_source(RandomSource::seeded(3));
        session.start(Mode::numeric(1, 3), 5).unwrap();
        for i in 0..5 {
            session.report_carousel_complete(i).unwrap();
        }
        let lines = breakdown_lines(session.result().unwrap());
        assert!(lines[0].starts_with('★'));
        assert!(lines.iter().skip(1).all(|l| l.starts_with(' ')));
    }
}
