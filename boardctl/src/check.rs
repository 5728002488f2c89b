use std::path::Path;

use protoboard_io::{Diagnostic, Session};

/// Imports the given files into a fresh session, layout first.
///
/// Files that can't be imported leave a diagnostic in the session instead of
/// failing, so that every problem can be reported at once.
pub fn load_session(cards: Option<&Path>, layout: Option<&Path>) -> Session {
    let mut session = Session::default();
    if let Some(path) = layout {
        let _ = session.load_layout_file(path);
    }
    if let Some(path) = cards {
        let _ = session.load_cards_file(path);
    }
    session
}

/// What `boardctl check` found out about a pair of files.
#[derive(Debug)]
pub struct CheckReport {
    pub cards: usize,
    pub zones: usize,
    pub unplaced_zones: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
}

impl CheckReport {
    pub fn new(session: &mut Session) -> Self {
        let board = session.board();
        let cards = board.store().card_count();
        let zones = board.rows().iter().map(|row| row.zones.len()).sum();
        let unplaced_zones = board.unplaced_zones().to_vec();
        CheckReport {
            cards,
            zones,
            unplaced_zones,
            diagnostics: session.take_diagnostics(),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty() && self.unplaced_zones.is_empty()
    }
}

impl std::fmt::Display for CheckReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{} cards in {} zones", self.cards, self.zones)?;
        for zone in &self.unplaced_zones {
            writeln!(f, "- cards start in zone '{}', which is not laid out", zone)?;
        }
        for diagnostic in &self.diagnostics {
            writeln!(f, "- {}", diagnostic)?;
        }
        if self.is_clean() {
            writeln!(f, "No problems found")?;
        }
        Ok(())
    }
}
