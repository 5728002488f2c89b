use serde::{Deserialize, Serialize};

use crate::player_zone_id;

/// The owner id of cards that belong to no player.
pub const SHARED_OWNER: &str = "0";

/// One physical card of the game being prototyped.
///
/// The record never changes during a session. Which zone a card is in is
/// tracked by the [`ZoneMembershipStore`](crate::ZoneMembershipStore), not here.
///
/// The serialized field names are the column names of the card data table.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardRecord {
    /// Unique across the whole board.
    pub id: String,
    #[serde(rename = "cardName")]
    pub name: String,
    #[serde(rename = "cardType")]
    pub card_type: String,
    #[serde(rename = "cardText")]
    pub text: String,
    /// A presentation hint, usually a CSS-style color name or `#rrggbb`.
    #[serde(rename = "cardColor")]
    pub color: String,
    /// Name of the zone the card is placed in when the board is seeded.
    #[serde(rename = "startZone")]
    pub start_zone: String,
    /// `"0"` for shared cards, otherwise the ordinal of the owning player.
    #[serde(rename = "playerId")]
    pub owner_id: String,
}

impl CardRecord {
    pub fn is_shared(&self) -> bool {
        self.owner_id == SHARED_OWNER
    }

    /// The zone identifier this card is seeded into.
    pub fn start_zone_id(&self) -> String {
        if self.is_shared() {
            self.start_zone.clone()
        } else {
            player_zone_id(&self.start_zone, &self.owner_id)
        }
    }
}

impl std::fmt::Display for CardRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// Shorthand for building a [`CardRecord`] in tests.
///
/// ```
/// # use protoboard::card_record;
/// let card = card_record!("c1", "Deck");
/// assert_eq!(card.start_zone, "Deck");
/// assert!(card.is_shared());
/// ```
#[macro_export]
macro_rules! card_record {
    ($id:expr, $zone:expr) => {
        $crate::card_record!($id, $zone, "0")
    };
    ($id:expr, $zone:expr, $owner:expr) => {
        $crate::CardRecord {
            id: String::from($id),
            name: format!("Card {}", $id),
            card_type: String::from("Unit"),
            text: String::new(),
            color: String::from("white"),
            start_zone: String::from($zone),
            owner_id: String::from($owner),
        }
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn start_zone_id_depends_on_owner() {
        assert_eq!(card_record!("a", "Deck").start_zone_id(), "Deck");
        assert_eq!(card_record!("b", "Hand", "2").start_zone_id(), "Hand-2");
    }
}
