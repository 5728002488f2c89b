use crate::{MembershipChange, Point, ZoneMembershipStore};

/// What a drag gesture carries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DragPayload {
    Card {
        id: String,
        /// Last known slot of the card. Updated while hovering, so that the
        /// next hover event is compared against where the card is now.
        zone: String,
        index: usize,
    },
}

impl DragPayload {
    /// Builds the payload for dragging a card, if the card is on the board.
    pub fn card(store: &ZoneMembershipStore, card_id: &str) -> Option<Self> {
        let location = store.locate(card_id)?;
        Some(DragPayload::Card {
            id: String::from(card_id),
            zone: location.zone,
            index: location.index,
        })
    }

    pub fn card_id(&self) -> &str {
        match self {
            DragPayload::Card { id, .. } => id,
        }
    }
}

/// The innermost thing under the pointer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DropTarget {
    /// A card inside an ordered zone.
    Slot {
        zone: String,
        index: usize,
        card_id: String,
    },
    /// The surface of a zone itself, not one of its cards.
    Zone { zone: String, point: Option<Point> },
}

/// Receives the interpreted gestures and turns them into membership changes.
pub trait DropHandler {
    /// A dragged card is over the card at `index` in `zone`.
    fn on_hover_over_slot(
        &mut self,
        card_id: &str,
        zone: &str,
        index: usize,
    ) -> Option<MembershipChange>;

    /// A dragged card was released directly over a zone. `point` is given
    /// for zones that keep drop positions.
    fn on_drop_on_zone(
        &mut self,
        card_id: &str,
        zone: &str,
        point: Option<Point>,
    ) -> Option<MembershipChange>;
}

/// Tracks the drag gesture in flight and routes hover and drop events to a
/// [`DropHandler`].
#[derive(Clone, Debug, Default)]
pub struct DragController {
    payload: Option<DragPayload>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, payload: DragPayload) {
        self.payload = Some(payload);
    }

    pub fn payload(&self) -> Option<&DragPayload> {
        self.payload.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.payload.is_some()
    }

    pub fn cancel(&mut self) {
        self.payload = None;
    }

    /// Handles the pointer moving over a target while dragging.
    ///
    /// Only card slots react to hovering. The card is moved to the hovered
    /// slot, i.e. in front of the card that is currently there.
    pub fn hover<H: DropHandler>(
        &mut self,
        handler: &mut H,
        target: &DropTarget,
    ) -> Option<MembershipChange> {
        let DropTarget::Slot {
            zone: hover_zone,
            index: hover_index,
            card_id: hover_card,
        } = target
        else {
            return None;
        };
        let DragPayload::Card { id, zone, index } = self.payload.as_mut()?;
        if hover_card == id || (zone == hover_zone && index == hover_index) {
            return None;
        }
        let change = handler.on_hover_over_slot(id, hover_zone, *hover_index);
        *zone = hover_zone.clone();
        *index = *hover_index;
        change
    }

    /// Ends the drag over a target.
    ///
    /// Only a release directly over a zone's surface moves the card. A
    /// release over a card slot is absorbed by that slot, whose hover has
    /// already placed the card.
    pub fn drop<H: DropHandler>(
        &mut self,
        handler: &mut H,
        target: Option<&DropTarget>,
    ) -> Option<MembershipChange> {
        let payload = self.payload.take()?;
        match target? {
            DropTarget::Zone { zone, point } => {
                handler.on_drop_on_zone(payload.card_id(), zone, *point)
            }
            DropTarget::Slot { .. } => None,
        }
    }
}
