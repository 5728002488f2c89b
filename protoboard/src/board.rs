use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::{
    player_zone_id, CardCommand, CardFace, CardPresentation, CardRecord, Click, DragPayload, DropHandler,
    MembershipChange, PlannedMove, Point, ZoneLayoutConfig, ZoneMembershipStore, ZoneSpec,
    ZoneType, ZoneView, DEFAULT_PLAY_ZONE,
};

/// Which part of the table a row belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Section {
    Shared,
    /// A player's area, numbered from 1.
    Player(u32),
}

/// One row of zones, as laid out on the table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardRow {
    pub name: String,
    pub section: Section,
    /// Zone identifiers, left to right.
    pub zones: Vec<String>,
}

/// The assembled board: the rows of zones from a layout, the membership
/// store seeded from the cards, and the display state of every zone.
#[derive(Clone, Debug)]
pub struct Board {
    players: u32,
    rows: Vec<BoardRow>,
    views: BTreeMap<String, ZoneView>,
    store: ZoneMembershipStore,
    /// Zones that cards were seeded into but that the layout doesn't show.
    unplaced_zones: Vec<String>,
}

impl Board {
    /// Builds the board for a layout and seeds it with cards.
    ///
    /// Each card goes to the zone named by its start zone and owner, in the
    /// order of `cards`. Cards that name a zone the layout doesn't have are
    /// kept in a zone of their own that is not laid out. A card id that was
    /// already seeded is skipped.
    pub fn assemble(layout: &ZoneLayoutConfig, cards: &[CardRecord]) -> Self {
        let mut rows = Vec::new();
        let mut views = BTreeMap::new();

        if layout.needs_default_play_zone() {
            let spec = ZoneSpec {
                name: String::from(DEFAULT_PLAY_ZONE),
                card_display: CardFace::Both,
                zone_type: ZoneType::Freeform,
                card_rotation: None,
                text_position: None,
            };
            views.insert(spec.name.clone(), ZoneView::new(spec));
            rows.push(BoardRow {
                name: String::from(DEFAULT_PLAY_ZONE),
                section: Section::Shared,
                zones: vec![String::from(DEFAULT_PLAY_ZONE)],
            });
        }
        for row in &layout.shared_zones {
            for zone in &row.zones {
                views
                    .entry(zone.name.clone())
                    .or_insert_with(|| ZoneView::new(zone.clone()));
            }
            rows.push(BoardRow {
                name: row.name.clone(),
                section: Section::Shared,
                zones: row.zones.iter().map(|zone| zone.name.clone()).collect(),
            });
        }
        for player in 1..=layout.players {
            for row in &layout.player_zones {
                let mut zone_ids = Vec::with_capacity(row.zones.len());
                for zone in &row.zones {
                    let zone_id = player_zone_id(&zone.name, player);
                    views
                        .entry(zone_id.clone())
                        .or_insert_with(|| ZoneView::new(zone.clone()));
                    zone_ids.push(zone_id);
                }
                rows.push(BoardRow {
                    name: row.name.clone(),
                    section: Section::Player(player),
                    zones: zone_ids,
                });
            }
        }

        // Group the cards by the zone they start in, keeping their order
        let mut seeded: BTreeMap<String, Vec<CardRecord>> =
            views.keys().map(|zone| (zone.clone(), Vec::new())).collect();
        let mut seen_ids = HashSet::new();
        for card in cards {
            if !seen_ids.insert(card.id.as_str()) {
                warn!(card_id = card.id, "Skipping card with duplicate id");
                continue;
            }
            seeded
                .entry(card.start_zone_id())
                .or_default()
                .push(card.clone());
        }

        let unplaced_zones: Vec<String> = seeded
            .keys()
            .filter(|zone| !views.contains_key(*zone))
            .cloned()
            .collect();
        for zone in &unplaced_zones {
            warn!(zone, "Cards start in a zone that is not part of the layout");
        }

        let store = ZoneMembershipStore::from_zones(seeded);
        for (zone, view) in views.iter_mut() {
            view.sync(store.zone(zone));
        }
        debug!(
            zones = views.len(),
            cards = store.card_count(),
            "Assembled board"
        );

        Self {
            players: layout.players,
            rows,
            views,
            store,
            unplaced_zones,
        }
    }

    pub fn players(&self) -> u32 {
        self.players
    }

    pub fn store(&self) -> &ZoneMembershipStore {
        &self.store
    }

    pub fn rows(&self) -> &[BoardRow] {
        &self.rows
    }

    pub fn rows_in(&self, section: Section) -> impl Iterator<Item = &BoardRow> {
        self.rows.iter().filter(move |row| row.section == section)
    }

    pub fn view(&self, zone: &str) -> Option<&ZoneView> {
        self.views.get(zone)
    }

    pub fn view_mut(&mut self, zone: &str) -> Option<&mut ZoneView> {
        self.views.get_mut(zone)
    }

    pub fn zone_cards(&self, zone: &str) -> &[Arc<CardRecord>] {
        self.store.zone(zone)
    }

    /// The cards of a zone that are drawn, see [`ZoneType::visible()`].
    pub fn visible_cards(&self, zone: &str) -> &[Arc<CardRecord>] {
        let cards = self.store.zone(zone);
        match self.views.get(zone) {
            Some(view) => view.zone_type().visible(cards),
            None => &[],
        }
    }

    pub fn unplaced_zones(&self) -> &[String] {
        &self.unplaced_zones
    }

    /// Starts dragging a card that is on the board.
    pub fn drag_payload(&self, card_id: &str) -> Option<DragPayload> {
        DragPayload::card(&self.store, card_id)
    }

    /// Moves a card to the end of a zone. See [`ZoneMembershipStore::move_to_zone()`].
    pub fn move_to_zone(&mut self, card_id: &str, zone: &str) -> Option<MembershipChange> {
        let moved = self
            .store
            .plan_move_to_zone(card_id, zone)
            .map(PlannedMove::execute_with_change);
        self.commit(moved, card_id)
    }

    /// Moves a card to a position in a zone. See [`ZoneMembershipStore::move_to_index()`].
    pub fn move_to_index(
        &mut self,
        card_id: &str,
        zone: &str,
        index: usize,
    ) -> Option<MembershipChange> {
        let moved = self
            .store
            .plan_move_to_index(card_id, zone, index)
            .map(PlannedMove::execute_with_change);
        self.commit(moved, card_id)
    }

    fn commit(
        &mut self,
        moved: Option<(ZoneMembershipStore, MembershipChange)>,
        card_id: &str,
    ) -> Option<MembershipChange> {
        let Some((store, change)) = moved else {
            trace!(card_id, "Card did not move");
            return None;
        };
        self.store = store;
        for zone in [&change.from.zone, &change.to.zone] {
            if let Some(view) = self.views.get_mut(zone) {
                view.sync(self.store.zone(zone));
            }
        }
        debug!(
            card_id,
            from = change.from.zone,
            from_index = change.from.index,
            to = change.to.zone,
            to_index = change.to.index,
            "Moved card"
        );
        Some(change)
    }

    /// Runs a toolbar command on a drawn card. Returns whether the card was found.
    pub fn apply_card_command(&mut self, zone: &str, card_id: &str, command: CardCommand) -> bool {
        match self.presentation_mut(zone, card_id) {
            Some(presentation) => {
                presentation.apply(command);
                true
            }
            None => false,
        }
    }

    /// Handles a click on a drawn card. Returns whether the card was found.
    pub fn click_card(&mut self, zone: &str, card_id: &str, click: Click) -> bool {
        match self.presentation_mut(zone, card_id) {
            Some(presentation) => {
                presentation.click(click);
                true
            }
            None => false,
        }
    }

    fn presentation_mut(&mut self, zone: &str, card_id: &str) -> Option<&mut CardPresentation> {
        self.views.get_mut(zone)?.presentation_mut(card_id)
    }
}

impl DropHandler for Board {
    fn on_hover_over_slot(
        &mut self,
        card_id: &str,
        zone: &str,
        index: usize,
    ) -> Option<MembershipChange> {
        self.move_to_index(card_id, zone, index)
    }

    fn on_drop_on_zone(
        &mut self,
        card_id: &str,
        zone: &str,
        point: Option<Point>,
    ) -> Option<MembershipChange> {
        let change = self.move_to_zone(card_id, zone);
        if let (Some(point), Some(view)) = (point, self.views.get_mut(zone)) {
            let in_zone = self.store.zone(zone).iter().any(|card| card.id == card_id);
            if view.zone_type() == ZoneType::Freeform && in_zone {
                view.record_drop(card_id, point);
            }
        }
        change
    }
}
