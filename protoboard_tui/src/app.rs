use std::path::PathBuf;

use protoboard::{
    reference_document, CardCommand, Click, DragController, DropTarget, MembershipChange,
    Rotation, WheelOutcome, ZoneType,
};
use protoboard_io::{error_chain, Session};
use ratatui::{
    crossterm::event::{
        Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
    },
    prelude::*,
    widgets::*,
};
use tracing::{debug, info};

use crate::geometry::{BoardGeometry, Hit};
use crate::widgets::{BoardWidget, ReferenceWidget};

/// Columns a wheel notch scrolls a bar by.
const WHEEL_STEP: i32 = 3;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Route {
    Board,
    Reference,
}

/// Files named on the command line.
#[derive(Clone, Debug, Default)]
pub struct Paths {
    pub cards: Option<PathBuf>,
    pub layout: Option<PathBuf>,
    pub export_dir: PathBuf,
}

/// A card under a pressed left button, before the pointer has moved.
#[derive(Clone, Debug, PartialEq, Eq)]
struct PressedCard {
    zone: String,
    card_id: String,
}

pub struct App {
    session: Session,
    paths: Paths,
    route: Route,
    drag: DragController,
    pressed: Option<PressedCard>,
    pointer: (u16, u16),
    /// The board area of the last frame.
    area: Rect,
    geometry: BoardGeometry,
    reference: String,
    reference_scroll: u16,
    status: String,
    should_quit: bool,
}

impl App {
    pub fn new(session: Session, paths: Paths) -> Self {
        Self {
            session,
            paths,
            route: Route::Board,
            drag: DragController::new(),
            pressed: None,
            pointer: (0, 0),
            area: Rect::default(),
            geometry: BoardGeometry::default(),
            reference: reference_document(),
            reference_scroll: 0,
            status: String::from("Drag cards with the mouse. Press Tab for the layout reference."),
            should_quit: false,
        }
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Imports the files named on the command line. The layout goes first, so
    /// that the card table wins over cards listed in the layout document.
    pub fn reload(&mut self) {
        let mut loaded = Vec::new();
        if let Some(path) = self.paths.layout.clone() {
            if self.session.load_layout_file(&path).is_ok() {
                loaded.push(String::from("layout"));
            }
        }
        if let Some(path) = self.paths.cards.clone() {
            if let Ok(count) = self.session.load_cards_file(&path) {
                loaded.push(format!("{} cards", count));
            }
        }
        // The old board is gone, and with it any card being dragged
        self.drag.cancel();
        self.pressed = None;
        self.relayout();

        let diagnostics = self.session.take_diagnostics();
        self.status = match diagnostics.last() {
            Some(diagnostic) if diagnostics.len() > 1 => {
                format!("{} (and {} more problems)", diagnostic, diagnostics.len() - 1)
            }
            Some(diagnostic) => diagnostic.to_string(),
            None if loaded.is_empty() => String::from("Nothing to import"),
            None => format!("Imported {}", loaded.join(" and ")),
        };
    }

    fn export(&mut self) {
        self.status = match self.session.export_to_dir(&self.paths.export_dir) {
            Ok([cards, layout]) => {
                format!("Exported {} and {}", cards.display(), layout.display())
            }
            Err(err) => format!("Export failed: {}", error_chain(&err)),
        };
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.on_key(key),
            Event::Mouse(mouse) => self.on_mouse(mouse),
            _ => {}
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        match key.code {
            KeyCode::Esc if self.drag.is_dragging() => {
                self.drag.cancel();
                self.pressed = None;
            }
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab => {
                self.route = match self.route {
                    Route::Board => Route::Reference,
                    Route::Reference => Route::Board,
                }
            }
            KeyCode::Char('r') => self.reload(),
            KeyCode::Char('e') => self.export(),
            KeyCode::Char('f') => self.command_at_pointer(CardCommand::Flip),
            KeyCode::Char('w') => self.command_at_pointer(CardCommand::Orient(Rotation::Normal)),
            KeyCode::Char('a') => self.command_at_pointer(CardCommand::Orient(Rotation::Left)),
            KeyCode::Char('d') => self.command_at_pointer(CardCommand::Orient(Rotation::Right)),
            KeyCode::Char('s') => self.command_at_pointer(CardCommand::Orient(Rotation::Reverse)),
            KeyCode::Down if self.route == Route::Reference => self.scroll_reference(1),
            KeyCode::Up if self.route == Route::Reference => self.scroll_reference(-1),
            _ => {}
        }
    }

    fn command_at_pointer(&mut self, command: CardCommand) {
        if self.route != Route::Board {
            return;
        }
        let (x, y) = self.pointer;
        if let Some(Hit::Card { zone, card_id, .. }) = self.geometry.hit(x, y) {
            if self
                .session
                .board_mut()
                .apply_card_command(&zone, &card_id, command)
            {
                self.relayout();
            }
        }
    }

    fn scroll_reference(&mut self, delta: i32) {
        let max = self.reference.lines().count() as i32;
        self.reference_scroll = (i32::from(self.reference_scroll) + delta).clamp(0, max) as u16;
    }

    fn on_mouse(&mut self, mouse: MouseEvent) {
        let (x, y) = (mouse.column, mouse.row);
        self.pointer = (x, y);
        if self.route == Route::Reference {
            match mouse.kind {
                MouseEventKind::ScrollDown => self.scroll_reference(WHEEL_STEP),
                MouseEventKind::ScrollUp => self.scroll_reference(-WHEEL_STEP),
                _ => {}
            }
            return;
        }

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.pressed = match self.geometry.hit(x, y) {
                    Some(Hit::Card { zone, card_id, .. }) => Some(PressedCard { zone, card_id }),
                    _ => None,
                };
            }
            MouseEventKind::Drag(MouseButton::Left) => self.on_drag(x, y),
            MouseEventKind::Up(MouseButton::Left) => {
                if self.drag.is_dragging() {
                    let target = self.geometry.drop_target(x, y);
                    let change = self.drag.drop(self.session.board_mut(), target.as_ref());
                    self.after_change(change);
                    self.relayout();
                } else if let Some(pressed) = self.pressed.take() {
                    self.click(&pressed.zone, &pressed.card_id, Click::Primary);
                }
                self.pressed = None;
            }
            MouseEventKind::Down(MouseButton::Right) => {
                if let Some(Hit::Card { zone, card_id, .. }) = self.geometry.hit(x, y) {
                    self.click(&zone, &card_id, Click::Secondary);
                }
            }
            MouseEventKind::ScrollDown => self.on_wheel(x, y, WHEEL_STEP),
            MouseEventKind::ScrollUp => self.on_wheel(x, y, -WHEEL_STEP),
            _ => {}
        }
    }

    fn on_drag(&mut self, x: u16, y: u16) {
        if !self.drag.is_dragging() {
            let Some(pressed) = self.pressed.take() else {
                return;
            };
            match self.session.board().drag_payload(&pressed.card_id) {
                Some(payload) => {
                    debug!(card_id = pressed.card_id, zone = pressed.zone, "Started dragging");
                    self.drag.begin(payload);
                }
                None => return,
            }
        }
        if let Some(target) = self.geometry.drop_target(x, y) {
            let change = self.drag.hover(self.session.board_mut(), &target);
            if change.is_some() {
                self.after_change(change);
                self.relayout();
            }
        }
    }

    fn on_wheel(&mut self, x: u16, y: u16, delta: i32) {
        let zone = match self.geometry.hit(x, y) {
            Some(Hit::Card { zone, .. } | Hit::Zone { zone, .. }) => zone,
            None => return,
        };
        let board = self.session.board_mut();
        let Some(view) = board.view_mut(&zone) else {
            return;
        };
        if view.zone_type() != ZoneType::Bar {
            return;
        }
        if view.scroll_mut().on_wheel(delta) == WheelOutcome::Consumed {
            self.relayout();
        }
    }

    fn click(&mut self, zone: &str, card_id: &str, click: Click) {
        if self.session.board_mut().click_card(zone, card_id, click) {
            self.relayout();
        }
    }

    fn after_change(&mut self, change: Option<MembershipChange>) {
        if let Some(change) = change {
            info!(
                card_id = change.card_id,
                to = change.to.zone,
                index = change.to.index,
                "Card moved"
            );
            self.status = format!(
                "Moved {} from {} to {}",
                change.card_id, change.from.zone, change.to.zone
            );
        }
    }

    /// Places everything within `area`, measuring the bars and fitting their
    /// scroll state to the new sizes.
    pub fn layout(&mut self, area: Rect) {
        self.area = area;
        self.relayout();
    }

    fn relayout(&mut self) {
        let board = self.session.board_mut();
        let mut geometry = BoardGeometry::compute(board, self.area);
        let mut scrolled = false;
        for zone in geometry.zones.iter().filter(|zone| zone.zone_type == ZoneType::Bar) {
            if let Some(view) = board.view_mut(&zone.zone) {
                let offset = view.scroll().offset();
                view.scroll_mut().resize(zone.content_width, u32::from(zone.inner.width));
                scrolled |= view.scroll().offset() != offset;
            }
        }
        if scrolled {
            geometry = BoardGeometry::compute(board, self.area);
        }
        self.geometry = geometry;
    }

    pub fn draw(&mut self, frame: &mut Frame) {
        let [header, body, footer] = main_areas(frame.size());
        if body != self.area {
            self.layout(body);
        }

        let selected = match self.route {
            Route::Board => 0,
            Route::Reference => 1,
        };
        frame.render_widget(
            Tabs::new(["Board", "Reference"])
                .select(selected)
                .highlight_style(Style::new().bold().yellow())
                .block(Block::bordered().title(" protoboard ")),
            header,
        );

        match self.route {
            Route::Board => {
                let (x, y) = self.pointer;
                let dragged = self.drag.payload().map(|payload| payload.card_id());
                let hovered_zone = match (dragged, self.geometry.drop_target(x, y)) {
                    (Some(_), Some(DropTarget::Zone { zone, .. } | DropTarget::Slot { zone, .. })) => {
                        Some(zone)
                    }
                    _ => None,
                };
                frame.render_widget(
                    BoardWidget {
                        board: self.session.board(),
                        geometry: &self.geometry,
                        dragged,
                        hovered_zone: hovered_zone.as_deref(),
                    },
                    body,
                );
            }
            Route::Reference => frame.render_widget(
                ReferenceWidget {
                    text: &self.reference,
                    scroll: self.reference_scroll,
                },
                body,
            ),
        }

        let help = " f flip · w/a/d/s turn · r reimport · e export · Tab switch · q quit ";
        let [status, keys] = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(help.chars().count() as u16)])
            .areas(footer);
        frame.render_widget(Paragraph::new(self.status.as_str()), status);
        frame.render_widget(Paragraph::new(help.dark_gray()), keys);
    }
}

fn main_areas(area: Rect) -> [Rect; 3] {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(area)
}
