use quickcheck::{Arbitrary, Gen};

use crate::{card_record, CardRecord, ZoneMembershipStore};

const ZONES: [&str; 5] = ["Deck", "Discard", "Hand-1", "In Play-1", "Play"];

/// One call of the two store mutations.
#[derive(Clone, Debug)]
pub enum Move {
    ToZone {
        card_id: String,
        zone: String,
    },
    ToIndex {
        card_id: String,
        zone: String,
        index: usize,
    },
}

impl Move {
    pub fn apply(&self, store: &ZoneMembershipStore) -> ZoneMembershipStore {
        match self {
            Move::ToZone { card_id, zone } => store.move_to_zone(card_id, zone),
            Move::ToIndex {
                card_id,
                zone,
                index,
            } => store.move_to_index(card_id, zone, *index),
        }
    }
}

/// A seeded store and a sequence of moves on it.
///
/// Some moves name cards that don't exist, or zones that the store doesn't have yet.
#[derive(Clone, Debug)]
pub struct StoreWithMoves {
    pub store: ZoneMembershipStore,
    pub moves: Vec<Move>,
}

impl Arbitrary for StoreWithMoves {
    fn arbitrary(g: &mut Gen) -> Self {
        let num_cards = usize::arbitrary(g) % 12;
        // Only the first three zones exist at the start
        let mut zones: Vec<(String, Vec<CardRecord>)> = ZONES[..3]
            .iter()
            .map(|&zone| (String::from(zone), Vec::new()))
            .collect();
        for n in 0..num_cards {
            let zone_idx = usize::arbitrary(g) % zones.len();
            let zone = zones[zone_idx].0.clone();
            zones[zone_idx].1.push(card_record!(format!("c{}", n), zone));
        }

        let num_moves = usize::arbitrary(g) % 20;
        let moves = (0..num_moves)
            .map(|_| {
                // Ids past the last card refer to cards that are not on the board
                let card_id = format!("c{}", usize::arbitrary(g) % (num_cards + num_cards / 5 + 1));
                let zone = String::from(*g.choose(&ZONES).unwrap());
                if bool::arbitrary(g) {
                    Move::ToZone { card_id, zone }
                } else {
                    let index = usize::arbitrary(g) % 8;
                    Move::ToIndex {
                        card_id,
                        zone,
                        index,
                    }
                }
            })
            .collect();

        StoreWithMoves {
            store: ZoneMembershipStore::from_zones(zones),
            moves,
        }
    }
}
