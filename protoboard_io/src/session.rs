use std::path::{Path, PathBuf};

use protoboard::{Board, CardRecord, ZoneLayoutConfig};
use tracing::{info, warn};

use crate::{
    error_chain, parse_cards, parse_layout, write_cards, write_layout, DataError, DataSource,
    Diagnostic,
};

/// File name of the card table written by [`Session::export_to_dir()`].
pub const CARDS_FILE_NAME: &str = "cards.csv";
/// File name of the layout document written by [`Session::export_to_dir()`].
pub const LAYOUT_FILE_NAME: &str = "layout.json";

/// The loaded data and the board built from it.
///
/// Every successful import replaces the cards or the layout as a whole and
/// seeds a fresh board. A failed import leaves everything as it was and only
/// adds a diagnostic.
pub struct Session {
    cards: Vec<CardRecord>,
    layout: ZoneLayoutConfig,
    board: Board,
    diagnostics: Vec<Diagnostic>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(ZoneLayoutConfig::default(), Vec::new())
    }
}

impl Session {
    pub fn new(layout: ZoneLayoutConfig, cards: Vec<CardRecord>) -> Self {
        let board = Board::assemble(&layout, &cards);
        Self {
            cards,
            layout,
            board,
            diagnostics: Vec::new(),
        }
    }

    pub fn cards(&self) -> &[CardRecord] {
        &self.cards
    }

    pub fn layout(&self) -> &ZoneLayoutConfig {
        &self.layout
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Replaces the cards with the readable rows of a card table.
    ///
    /// Returns the number of cards loaded.
    pub fn import_cards(&mut self, text: &str) -> Result<usize, DataError> {
        match parse_cards(text) {
            Ok(parsed) => {
                self.diagnostics.extend(parsed.diagnostics);
                self.cards = parsed.cards;
                self.reseed();
                info!(cards = self.cards.len(), "Imported cards");
                Ok(self.cards.len())
            }
            Err(err) => Err(self.reject(DataSource::Cards, err)),
        }
    }

    /// Replaces the layout. When the document lists cards, they replace the
    /// current cards too.
    pub fn import_layout(&mut self, text: &str) -> Result<(), DataError> {
        match parse_layout(text) {
            Ok(layout) => {
                if !layout.cards.is_empty() {
                    self.cards = layout.cards.clone();
                }
                self.layout = layout;
                self.reseed();
                info!(players = self.layout.players, "Imported layout");
                Ok(())
            }
            Err(err) => Err(self.reject(DataSource::Layout, err)),
        }
    }

    pub fn load_cards_file(&mut self, path: &Path) -> Result<usize, DataError> {
        let text = self.read(DataSource::Cards, path)?;
        self.import_cards(&text)
    }

    pub fn load_layout_file(&mut self, path: &Path) -> Result<(), DataError> {
        let text = self.read(DataSource::Layout, path)?;
        self.import_layout(&text)
    }

    /// The imported cards as a card table.
    ///
    /// This is the data as it was imported. Where the cards are on the board
    /// right now is not written.
    pub fn export_cards(&self) -> Result<String, DataError> {
        write_cards(&self.cards)
    }

    pub fn export_layout(&self) -> Result<String, DataError> {
        write_layout(&self.layout)
    }

    /// Writes [`CARDS_FILE_NAME`] and [`LAYOUT_FILE_NAME`] into a directory.
    pub fn export_to_dir(&self, directory: &Path) -> Result<[PathBuf; 2], DataError> {
        let cards_path = directory.join(CARDS_FILE_NAME);
        let layout_path = directory.join(LAYOUT_FILE_NAME);
        std::fs::write(&cards_path, self.export_cards()?)?;
        std::fs::write(&layout_path, self.export_layout()?)?;
        info!(directory = %directory.display(), "Exported cards and layout");
        Ok([cards_path, layout_path])
    }

    fn read(&mut self, source: DataSource, path: &Path) -> Result<String, DataError> {
        std::fs::read_to_string(path).map_err(|err| self.reject(source, DataError::Io(err)))
    }

    fn reseed(&mut self) {
        self.board = Board::assemble(&self.layout, &self.cards);
    }

    fn reject(&mut self, source: DataSource, err: DataError) -> DataError {
        let diagnostic = Diagnostic {
            source,
            line: None,
            message: error_chain(&err),
        };
        warn!(%diagnostic, "Import failed, keeping the previous data");
        self.diagnostics.push(diagnostic);
        err
    }
}
