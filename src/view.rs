//! Terminal rendering of the popup.

use sendarr::popup::{PopupView, ProfileOption, StatusKind};
use sendarr_common::MovieDetails;

/// Prints popup updates as they happen. Errors go to stderr.
#[derive(Debug, Default)]
pub struct ConsoleView;

impl PopupView for ConsoleView {
    fn set_message(&mut self, text: &str, is_error: bool) {
        if text.is_empty() {
            return;
        }
        if is_error {
            eprintln!("✗ {}", text);
        } else {
            println!("{}", text);
        }
    }

    fn set_status(&mut self, text: &str, kind: StatusKind) {
        match kind {
            StatusKind::Neutral => println!("{}", text),
            StatusKind::Success => println!("✓ {}", text),
            StatusKind::Error => eprintln!("✗ {}", text),
        }
    }

    fn show_movie(&mut self, movie: &MovieDetails) {
        println!("Movie: {}", movie.title);
        if let Some(ref year) = movie.year {
            println!("Year: {}", year);
        }
        println!("IMDb: {}", movie.imdb_id);
    }

    fn set_profiles(&mut self, options: &[ProfileOption]) {
        println!("Quality profiles:");
        for option in options {
            let marker = if option.selected { "*" } else { " " };
            println!("  {} {} ({})", marker, option.label, option.id);
        }
    }

    fn set_send_enabled(&mut self, enabled: bool) {
        tracing::trace!(enabled, "Send control toggled");
    }
}
