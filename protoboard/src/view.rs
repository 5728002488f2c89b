use std::collections::HashMap;
use std::sync::Arc;

use crate::{CardPresentation, CardRecord, ZoneSpec, ZoneType};

/// A position relative to the top-left corner of a zone.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Where the pointer holds a card while dragging it, in pixels from the card's corner.
pub const FREEFORM_ANCHOR: Point = Point { x: 30, y: 60 };

impl ZoneType {
    /// The part of a zone's cards that is drawn.
    ///
    /// A stack only shows its last card. The other cards are still in the zone.
    pub fn visible<T>(self, cards: &[T]) -> &[T] {
        match self {
            ZoneType::Stack => &cards[cards.len().saturating_sub(1)..],
            ZoneType::Bar | ZoneType::Freeform => cards,
        }
    }

    /// Whether the cards of this zone react to another card hovering over them.
    pub fn has_card_slots(self) -> bool {
        self == ZoneType::Bar
    }
}

/// What happened to a scroll wheel event.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WheelOutcome {
    /// The zone scrolled, the page must not.
    Consumed,
    PassThrough,
}

/// Horizontal scroll state of a bar zone.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct BarScroll {
    offset: u32,
    content_width: u32,
    viewport_width: u32,
}

impl BarScroll {
    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn is_scrollable(&self) -> bool {
        self.content_width > self.viewport_width
    }

    fn max_offset(&self) -> u32 {
        self.content_width.saturating_sub(self.viewport_width)
    }

    /// Updates the measured widths, keeping the offset in range.
    pub fn resize(&mut self, content_width: u32, viewport_width: u32) {
        self.content_width = content_width;
        self.viewport_width = viewport_width;
        self.offset = self.offset.min(self.max_offset());
    }

    /// Turns vertical wheel movement into horizontal scrolling, but only if
    /// the content overflows.
    pub fn on_wheel(&mut self, delta_y: i32) -> WheelOutcome {
        if !self.is_scrollable() {
            return WheelOutcome::PassThrough;
        }
        let offset = (i64::from(self.offset) + i64::from(delta_y)).clamp(0, i64::from(self.max_offset()));
        self.offset = offset as u32;
        WheelOutcome::Consumed
    }
}

/// The local display state of one zone.
///
/// Holds the presentation of each drawn card, the drop positions of a
/// freeform zone and the scroll state of a bar. None of this is part of the
/// shared board state, and all of it is thrown away for cards that leave.
#[derive(Clone, Debug)]
pub struct ZoneView {
    spec: ZoneSpec,
    presentations: HashMap<String, CardPresentation>,
    positions: HashMap<String, Point>,
    scroll: BarScroll,
}

impl ZoneView {
    pub fn new(spec: ZoneSpec) -> Self {
        Self {
            spec,
            presentations: HashMap::new(),
            positions: HashMap::new(),
            scroll: BarScroll::default(),
        }
    }

    pub fn spec(&self) -> &ZoneSpec {
        &self.spec
    }

    pub fn zone_type(&self) -> ZoneType {
        self.spec.zone_type
    }

    /// Brings the view in line with the cards now in the zone.
    ///
    /// Cards that are no longer drawn lose their presentation and position,
    /// cards that are newly drawn start with the zone's defaults.
    pub fn sync(&mut self, cards: &[Arc<CardRecord>]) {
        let visible = self.spec.zone_type.visible(cards);
        self.presentations
            .retain(|id, _| visible.iter().any(|card| &card.id == id));
        self.positions
            .retain(|id, _| cards.iter().any(|card| &card.id == id));
        for card in visible {
            if !self.presentations.contains_key(&card.id) {
                let presentation =
                    CardPresentation::for_zone(self.spec.card_display, self.spec.card_rotation);
                self.presentations.insert(card.id.clone(), presentation);
            }
        }
    }

    /// The presentation of a drawn card, or the zone default for any other card.
    pub fn presentation(&self, card_id: &str) -> CardPresentation {
        self.presentations
            .get(card_id)
            .copied()
            .unwrap_or_else(|| {
                CardPresentation::for_zone(self.spec.card_display, self.spec.card_rotation)
            })
    }

    pub fn presentation_mut(&mut self, card_id: &str) -> Option<&mut CardPresentation> {
        self.presentations.get_mut(card_id)
    }

    /// Remembers where a card was dropped.
    pub fn record_drop(&mut self, card_id: &str, point: Point) {
        self.positions.insert(String::from(card_id), point);
    }

    pub fn drop_point(&self, card_id: &str) -> Option<Point> {
        self.positions.get(card_id).copied()
    }

    /// Where a freeform card's top-left corner goes.
    ///
    /// Cards without a recorded drop sit at the origin.
    pub fn placement(&self, card_id: &str, anchor: Point) -> Point {
        match self.positions.get(card_id) {
            Some(point) => Point::new(point.x - anchor.x, point.y - anchor.y),
            None => Point::ORIGIN,
        }
    }

    pub fn scroll(&self) -> BarScroll {
        self.scroll
    }

    pub fn scroll_mut(&mut self) -> &mut BarScroll {
        &mut self.scroll
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{card_record, CardFace, Click, Face};

    fn spec(zone_type: ZoneType, card_display: CardFace) -> ZoneSpec {
        ZoneSpec {
            name: String::from("Z"),
            card_display,
            zone_type,
            card_rotation: None,
            text_position: None,
        }
    }

    fn cards(ids: &[&str]) -> Vec<Arc<CardRecord>> {
        ids.iter().map(|id| Arc::new(card_record!(*id, "Z"))).collect()
    }

    #[test]
    fn stack_shows_only_last_card() {
        let cards = cards(&["A", "B", "C"]);
        let visible = ZoneType::Stack.visible(&cards);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "C");
        assert_eq!(ZoneType::Bar.visible(&cards).len(), 3);
        assert!(ZoneType::Stack.visible::<Arc<CardRecord>>(&[]).is_empty());
    }

    #[test]
    fn sync_gives_defaults_and_forgets_departed_cards() {
        let mut view = ZoneView::new(spec(ZoneType::Bar, CardFace::FaceDown));
        view.sync(&cards(&["A", "B"]));
        view.presentation_mut("A").unwrap().flip();
        assert_eq!(view.presentation("A").face(), Face::Up);

        // A stays, its state stays
        view.sync(&cards(&["B", "A"]));
        assert_eq!(view.presentation("A").face(), Face::Up);

        // A leaves and comes back with the default
        view.sync(&cards(&["B"]));
        assert!(view.presentation_mut("A").is_none());
        view.sync(&cards(&["B", "A"]));
        assert_eq!(view.presentation("A").face(), Face::Down);
    }

    #[test]
    fn covered_stack_card_is_reset() {
        let mut view = ZoneView::new(spec(ZoneType::Stack, CardFace::FaceUp));
        view.sync(&cards(&["A"]));
        view.presentation_mut("A").unwrap().click(Click::Primary);
        view.sync(&cards(&["A", "B"]));
        assert!(view.presentation_mut("A").is_none());
        assert!(view.presentation_mut("B").is_some());
        view.sync(&cards(&["A"]));
        assert_eq!(view.presentation("A").rotation(), 0);
    }

    #[test]
    fn freeform_placement() {
        let mut view = ZoneView::new(spec(ZoneType::Freeform, CardFace::Both));
        view.sync(&cards(&["A", "B"]));
        view.record_drop("A", Point::new(100, 100));
        assert_eq!(view.placement("A", FREEFORM_ANCHOR), Point::new(70, 40));
        assert_eq!(view.placement("B", FREEFORM_ANCHOR), Point::ORIGIN);

        view.sync(&cards(&["B"]));
        assert_eq!(view.drop_point("A"), None);
    }

    #[test]
    fn wheel_scrolls_only_overflowing_bars() {
        let mut scroll = BarScroll::default();
        scroll.resize(50, 80);
        assert!(!scroll.is_scrollable());
        assert_eq!(scroll.on_wheel(3), WheelOutcome::PassThrough);

        scroll.resize(100, 80);
        assert_eq!(scroll.on_wheel(15), WheelOutcome::Consumed);
        assert_eq!(scroll.offset(), 15);
        assert_eq!(scroll.on_wheel(100), WheelOutcome::Consumed);
        assert_eq!(scroll.offset(), 20);
        assert_eq!(scroll.on_wheel(-50), WheelOutcome::Consumed);
        assert_eq!(scroll.offset(), 0);

        scroll.on_wheel(20);
        scroll.resize(90, 80);
        assert_eq!(scroll.offset(), 10);
    }

    #[test]
    fn very_wide_bar_scrolls_to_the_end() {
        let mut scroll = BarScroll::default();
        scroll.resize(100_000, 80);
        assert_eq!(scroll.on_wheel(i32::MAX), WheelOutcome::Consumed);
        assert_eq!(scroll.offset(), 99_920);
        assert_eq!(scroll.on_wheel(i32::MIN), WheelOutcome::Consumed);
        assert_eq!(scroll.offset(), 0);
    }
}
