use protoboard::{
    Board, BoardRow, CardPresentation, DropTarget, Point, Section, ZoneType, CARD_SIZE,
};
use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Height of a row of zones: an upright card and the zone border.
pub const ROW_HEIGHT: u16 = 9;
/// Width of a stack zone: a sideways card and the zone border.
pub const STACK_WIDTH: u16 = 20;
pub const CARD_GAP: u16 = 1;
/// Where the pointer holds a card on the table, in cells from its corner.
pub const TABLE_ANCHOR: Point = Point { x: 2, y: 2 };

/// Terminal cells taken up by a card, derived from its size in pixels.
pub fn card_cells(presentation: &CardPresentation) -> (u16, u16) {
    let size = presentation.bounding_box(CARD_SIZE);
    (size.width / 12, size.height / 28)
}

/// Where a card is drawn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardGeometry {
    pub card_id: String,
    /// Position in the zone's sequence.
    pub index: usize,
    /// The part of the card inside the zone.
    pub rect: Rect,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ZoneGeometry {
    pub zone: String,
    pub zone_type: ZoneType,
    pub outer: Rect,
    pub inner: Rect,
    /// In drawing order, so later cards cover earlier ones.
    pub cards: Vec<CardGeometry>,
    /// Width of all cards side by side, for scrolling bars. Wider than the
    /// screen coordinates, since a bar may hold thousands of cards.
    pub content_width: u32,
}

/// What is under a terminal cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Hit {
    Card {
        zone: String,
        index: usize,
        card_id: String,
    },
    Zone {
        zone: String,
        /// Relative to the inside of the zone.
        point: Point,
    },
}

/// The placement of everything on the board screen, used both for drawing and
/// for finding out what the pointer is over.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BoardGeometry {
    /// Frames around each player's area.
    pub player_frames: Vec<(u32, Rect)>,
    pub zones: Vec<ZoneGeometry>,
}

impl BoardGeometry {
    pub fn compute(board: &Board, area: Rect) -> Self {
        let mut geometry = BoardGeometry::default();

        let (table_rows, side_rows): (Vec<&BoardRow>, Vec<&BoardRow>) = board
            .rows_in(Section::Shared)
            .partition(|row| is_table_row(board, row));
        let top_height = if table_rows.is_empty() {
            ROW_HEIGHT * side_rows.len() as u16
        } else {
            (ROW_HEIGHT * side_rows.len() as u16).max(2 * ROW_HEIGHT)
        };

        let player_rows: Vec<Vec<&BoardRow>> = (1..=board.players())
            .map(|player| board.rows_in(Section::Player(player)).collect())
            .collect();
        let mut constraints = vec![Constraint::Length(top_height)];
        for rows in &player_rows {
            constraints.push(Constraint::Length(ROW_HEIGHT * rows.len() as u16 + 2));
        }
        constraints.push(Constraint::Min(0));
        let areas = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        // The table on the left, the other shared rows on the right
        let (table_area, side_area) = match (table_rows.is_empty(), side_rows.is_empty()) {
            (false, false) => {
                let halves = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
                    .split(areas[0]);
                (halves[0], halves[1])
            }
            (false, true) => (areas[0], Rect::default()),
            _ => (Rect::default(), areas[0]),
        };
        let table_constraints = vec![Constraint::Fill(1); table_rows.len()];
        geometry.add_rows(board, &table_rows, table_area, table_constraints);
        let side_constraints = vec![Constraint::Length(ROW_HEIGHT); side_rows.len()];
        geometry.add_rows(board, &side_rows, side_area, side_constraints);

        for (n, rows) in player_rows.iter().enumerate() {
            let frame = areas[n + 1];
            geometry.player_frames.push((n as u32 + 1, frame));
            let constraints = vec![Constraint::Length(ROW_HEIGHT); rows.len()];
            geometry.add_rows(board, rows, shrink(frame), constraints);
        }
        geometry
    }

    fn add_rows(
        &mut self,
        board: &Board,
        rows: &[&BoardRow],
        area: Rect,
        constraints: Vec<Constraint>,
    ) {
        if rows.is_empty() || area.is_empty() {
            return;
        }
        let row_areas = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);
        for (row, &row_area) in rows.iter().zip(row_areas.iter()) {
            let widths = row.zones.iter().map(|zone| {
                match board.view(zone).map(|view| view.zone_type()) {
                    Some(ZoneType::Stack) => Constraint::Length(STACK_WIDTH),
                    _ => Constraint::Min(12),
                }
            });
            let zone_areas = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(widths.collect::<Vec<_>>())
                .split(row_area);
            for (zone, &outer) in row.zones.iter().zip(zone_areas.iter()) {
                if let Some(zone_geometry) = zone_geometry(board, zone, outer) {
                    self.zones.push(zone_geometry);
                }
            }
        }
    }

    pub fn zone(&self, zone: &str) -> Option<&ZoneGeometry> {
        self.zones.iter().find(|geometry| geometry.zone == zone)
    }

    pub fn hit(&self, x: u16, y: u16) -> Option<Hit> {
        let zone = self.zones.iter().find(|zone| contains(zone.outer, x, y))?;
        if let Some(card) = zone.cards.iter().rev().find(|card| contains(card.rect, x, y)) {
            return Some(Hit::Card {
                zone: zone.zone.clone(),
                index: card.index,
                card_id: card.card_id.clone(),
            });
        }
        Some(Hit::Zone {
            zone: zone.zone.clone(),
            point: Point::new(
                i32::from(x) - i32::from(zone.inner.x),
                i32::from(y) - i32::from(zone.inner.y),
            ),
        })
    }

    /// The drop target under a cell.
    ///
    /// Only the cards of a bar are targets of their own. Anything else
    /// belongs to the surface of its zone.
    pub fn drop_target(&self, x: u16, y: u16) -> Option<DropTarget> {
        let hit = self.hit(x, y)?;
        let zone_geometry = match &hit {
            Hit::Card { zone, .. } | Hit::Zone { zone, .. } => self.zone(zone)?,
        };
        let point = Point::new(
            i32::from(x) - i32::from(zone_geometry.inner.x),
            i32::from(y) - i32::from(zone_geometry.inner.y),
        );
        let target = match hit {
            Hit::Card {
                zone,
                index,
                card_id,
            } if zone_geometry.zone_type.has_card_slots() => DropTarget::Slot {
                zone,
                index,
                card_id,
            },
            Hit::Card { zone, .. } | Hit::Zone { zone, .. } => DropTarget::Zone {
                zone,
                point: (zone_geometry.zone_type == ZoneType::Freeform).then_some(point),
            },
        };
        Some(target)
    }
}

fn is_table_row(board: &Board, row: &BoardRow) -> bool {
    !row.zones.is_empty()
        && row.zones.iter().all(|zone| {
            board.view(zone).map(|view| view.zone_type()) == Some(ZoneType::Freeform)
        })
}

fn zone_geometry(board: &Board, zone: &str, outer: Rect) -> Option<ZoneGeometry> {
    let view = board.view(zone)?;
    let inner = shrink(outer);
    let cards = board.zone_cards(zone);
    let visible = board.visible_cards(zone);
    // Index of the first visible card in the zone's sequence
    let first_index = cards.len() - visible.len();

    let mut geometry = ZoneGeometry {
        zone: String::from(zone),
        zone_type: view.zone_type(),
        outer,
        inner,
        cards: Vec::with_capacity(visible.len()),
        content_width: 0,
    };

    let mut cursor = i64::from(inner.x) - i64::from(view.scroll().offset());
    for (n, card) in visible.iter().enumerate() {
        let (width, height) = card_cells(&view.presentation(&card.id));
        let (x, y) = match view.zone_type() {
            ZoneType::Stack => (i64::from(inner.x), i64::from(inner.y)),
            ZoneType::Bar => {
                let x = cursor;
                cursor += i64::from(width + CARD_GAP);
                geometry.content_width = geometry
                    .content_width
                    .saturating_add(u32::from(width + CARD_GAP));
                (x, i64::from(inner.y))
            }
            ZoneType::Freeform => {
                let placement = view.placement(&card.id, TABLE_ANCHOR);
                (
                    i64::from(inner.x) + i64::from(placement.x),
                    i64::from(inner.y) + i64::from(placement.y),
                )
            }
        };
        if let Some(rect) = clip(x, y, width, height, inner) {
            geometry.cards.push(CardGeometry {
                card_id: card.id.clone(),
                index: first_index + n,
                rect,
            });
        }
    }
    geometry.content_width = geometry.content_width.saturating_sub(u32::from(CARD_GAP));
    Some(geometry)
}

/// The inside of a bordered block.
pub fn shrink(rect: Rect) -> Rect {
    Rect {
        x: rect.x.saturating_add(1),
        y: rect.y.saturating_add(1),
        width: rect.width.saturating_sub(2),
        height: rect.height.saturating_sub(2),
    }
}

fn contains(rect: Rect, x: u16, y: u16) -> bool {
    x >= rect.x && x < rect.right() && y >= rect.y && y < rect.bottom()
}

/// The part of a rectangle at a possibly negative position that lies within `area`.
fn clip(x: i64, y: i64, width: u16, height: u16, area: Rect) -> Option<Rect> {
    let left = x.max(i64::from(area.x));
    let top = y.max(i64::from(area.y));
    let right = (x + i64::from(width)).min(i64::from(area.right()));
    let bottom = (y + i64::from(height)).min(i64::from(area.bottom()));
    if left >= right || top >= bottom {
        return None;
    }
    Some(Rect {
        x: left as u16,
        y: top as u16,
        width: (right - left) as u16,
        height: (bottom - top) as u16,
    })
}
