use std::collections::BTreeMap;
use std::sync::Arc;

use crate::CardRecord;

/// Which zone a card is in, and where in that zone's sequence.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CardLocation {
    pub zone: String,
    pub index: usize,
}

/// A single card changing its place on the board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MembershipChange {
    pub card_id: String,
    pub from: CardLocation,
    /// The location of the card in the new store.
    pub to: CardLocation,
}

/// Maps zone identifiers to the ordered cards in that zone.
///
/// A store is never changed in place. The move operations produce a new
/// store, and zones that are not touched by a move are shared between the
/// old and the new store. Every card is in exactly one zone.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ZoneMembershipStore {
    zones: BTreeMap<String, Arc<Vec<Arc<CardRecord>>>>,
}

/// A move that has been checked against a store but not applied yet.
///
/// See [`ZoneMembershipStore::plan_move_to_zone()`] and
/// [`ZoneMembershipStore::plan_move_to_index()`].
pub struct PlannedMove<'a> {
    /// Ties the change to the store it was computed from.
    store: &'a ZoneMembershipStore,
    pub change: MembershipChange,
}

impl ZoneMembershipStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from zones and their cards, in the given order.
    ///
    /// The caller is responsible for not putting a card id into two zones.
    pub fn from_zones<I, C>(zones: I) -> Self
    where
        I: IntoIterator<Item = (String, C)>,
        C: IntoIterator<Item = CardRecord>,
    {
        let zones = zones
            .into_iter()
            .map(|(zone, cards)| (zone, Arc::new(cards.into_iter().map(Arc::new).collect())))
            .collect();
        Self { zones }
    }

    /// The cards of a zone. Zones that don't exist are empty.
    pub fn zone(&self, zone: &str) -> &[Arc<CardRecord>] {
        self.zones.get(zone).map(|cards| cards.as_slice()).unwrap_or(&[])
    }

    pub fn contains_zone(&self, zone: &str) -> bool {
        self.zones.contains_key(zone)
    }

    pub fn zone_ids(&self) -> impl Iterator<Item = &str> {
        self.zones.keys().map(String::as_str)
    }

    pub fn zones(&self) -> impl Iterator<Item = (&str, &[Arc<CardRecord>])> {
        self.zones
            .iter()
            .map(|(zone, cards)| (zone.as_str(), cards.as_slice()))
    }

    /// Total number of cards over all zones.
    pub fn card_count(&self) -> usize {
        self.zones.values().map(|cards| cards.len()).sum()
    }

    pub fn card(&self, card_id: &str) -> Option<&Arc<CardRecord>> {
        self.locate(card_id)
            .map(|location| &self.zones[&location.zone][location.index])
    }

    /// Finds the zone and position of a card with a linear scan.
    pub fn locate(&self, card_id: &str) -> Option<CardLocation> {
        self.zones.iter().find_map(|(zone, cards)| {
            cards
                .iter()
                .position(|card| card.id == card_id)
                .map(|index| CardLocation {
                    zone: zone.clone(),
                    index,
                })
        })
    }

    /// Returns a store that has the given zone, adding it empty if needed.
    pub fn with_zone(&self, zone: &str) -> Self {
        if self.contains_zone(zone) {
            return self.clone();
        }
        let mut zones = self.zones.clone();
        zones.insert(String::from(zone), Arc::new(Vec::new()));
        Self { zones }
    }

    /// Plans appending a card to the end of a zone.
    ///
    /// Returns `None` if the card doesn't exist, or if it already is the
    /// last card of that zone.
    pub fn plan_move_to_zone(&self, card_id: &str, target_zone: &str) -> Option<PlannedMove<'_>> {
        let from = self.locate(card_id)?;
        let target_len = self.zone(target_zone).len();
        let index = if from.zone == target_zone {
            target_len - 1
        } else {
            target_len
        };
        self.plan(card_id, from, target_zone, index)
    }

    /// Plans moving a card to a position in a zone.
    ///
    /// The index is clamped to the positions that exist in the target zone
    /// once the card has been taken out of its current place. Returns `None`
    /// if the card doesn't exist or is already at that position.
    pub fn plan_move_to_index(
        &self,
        card_id: &str,
        target_zone: &str,
        target_index: usize,
    ) -> Option<PlannedMove<'_>> {
        let from = self.locate(card_id)?;
        let target_len = self.zone(target_zone).len();
        let max_index = if from.zone == target_zone {
            target_len - 1
        } else {
            target_len
        };
        self.plan(card_id, from, target_zone, target_index.min(max_index))
    }

    /// Removes a card from its zone and appends it to `target_zone`.
    ///
    /// Unknown cards are ignored, the result is then equal to `self`.
    pub fn move_to_zone(&self, card_id: &str, target_zone: &str) -> Self {
        match self.plan_move_to_zone(card_id, target_zone) {
            Some(planned) => planned.execute(),
            None => self.clone(),
        }
    }

    /// Moves a card to `target_index` in `target_zone`, shifting the other
    /// cards of that zone.
    ///
    /// Within a zone this is a reorder: `[A, B, C]` with `C` moved to index
    /// 0 becomes `[C, A, B]`. Unknown cards are ignored, the result is then
    /// equal to `self`.
    pub fn move_to_index(&self, card_id: &str, target_zone: &str, target_index: usize) -> Self {
        match self.plan_move_to_index(card_id, target_zone, target_index) {
            Some(planned) => planned.execute(),
            None => self.clone(),
        }
    }

    fn plan(
        &self,
        card_id: &str,
        from: CardLocation,
        target_zone: &str,
        index: usize,
    ) -> Option<PlannedMove<'_>> {
        if from.zone == target_zone && from.index == index {
            return None;
        }
        Some(PlannedMove {
            store: self,
            change: MembershipChange {
                card_id: String::from(card_id),
                from,
                to: CardLocation {
                    zone: String::from(target_zone),
                    index,
                },
            },
        })
    }
}

impl<'a> PlannedMove<'a> {
    /// Computes the new store. The store the move was planned on is left as it was.
    pub fn execute(self) -> ZoneMembershipStore {
        let MembershipChange { from, to, .. } = &self.change;
        let mut zones = self.store.zones.clone();

        let mut source = Vec::clone(&zones[&from.zone]);
        let card = source.remove(from.index);

        if from.zone == to.zone {
            source.insert(to.index, card);
            zones.insert(from.zone.clone(), Arc::new(source));
        } else {
            let mut target = zones
                .get(&to.zone)
                .map(|cards| Vec::clone(cards))
                .unwrap_or_default();
            target.insert(to.index, card);
            zones.insert(from.zone.clone(), Arc::new(source));
            zones.insert(to.zone.clone(), Arc::new(target));
        }

        ZoneMembershipStore { zones }
    }

    /// Like [`Self::execute()`], but also hands back the change.
    pub fn execute_with_change(self) -> (ZoneMembershipStore, MembershipChange) {
        let change = self.change.clone();
        (self.execute(), change)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use quickcheck::quickcheck;

    use super::*;
    use crate::arbitrary::{Move, StoreWithMoves};
    use crate::card_record;

    fn ids(store: &ZoneMembershipStore, zone: &str) -> Vec<String> {
        store.zone(zone).iter().map(|card| card.id.clone()).collect()
    }

    fn id_multiset(store: &ZoneMembershipStore) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for (_, cards) in store.zones() {
            for card in cards {
                *counts.entry(card.id.clone()).or_insert(0) += 1;
            }
        }
        counts
    }

    fn hand_and_discard() -> ZoneMembershipStore {
        ZoneMembershipStore::from_zones([
            (
                String::from("Hand"),
                vec![card_record!("A", "Hand"), card_record!("B", "Hand")],
            ),
            (String::from("Discard"), vec![card_record!("X", "Discard")]),
        ])
    }

    quickcheck! {
        fn moves_never_lose_or_duplicate_cards(input: StoreWithMoves) -> bool {
            let before = id_multiset(&input.store);
            let mut store = input.store.clone();
            for mv in &input.moves {
                store = mv.apply(&store);
                let after = id_multiset(&store);
                if after != before || after.values().any(|&n| n != 1) {
                    return false;
                }
            }
            true
        }

        fn planned_change_matches_new_store(input: StoreWithMoves) -> bool {
            let mut store = input.store.clone();
            for mv in &input.moves {
                let planned = match mv {
                    Move::ToZone { card_id, zone } => store.plan_move_to_zone(card_id, zone),
                    Move::ToIndex { card_id, zone, index } => store.plan_move_to_index(card_id, zone, *index),
                };
                let Some(planned) = planned else { continue };
                let change = planned.change.clone();
                let next = planned.execute();
                if next.locate(&change.card_id) != Some(change.to.clone()) {
                    return false;
                }
                store = next;
            }
            true
        }

        fn move_to_current_position_is_identity(input: StoreWithMoves) -> bool {
            let store = &input.store;
            store.zones().flat_map(|(_, cards)| cards.iter()).all(|card| {
                let location = store.locate(&card.id).unwrap();
                store.move_to_index(&card.id, &location.zone, location.index) == *store
                    && store.plan_move_to_index(&card.id, &location.zone, location.index).is_none()
            })
        }
    }

    #[test]
    fn reorder_within_zone() {
        let store = ZoneMembershipStore::from_zones([(
            String::from("Z"),
            vec![
                card_record!("A", "Z"),
                card_record!("B", "Z"),
                card_record!("C", "Z"),
            ],
        )]);
        assert_eq!(ids(&store.move_to_index("C", "Z", 0), "Z"), ["C", "A", "B"]);
        assert_eq!(ids(&store.move_to_index("A", "Z", 2), "Z"), ["B", "C", "A"]);
        assert_eq!(ids(&store.move_to_index("A", "Z", 1), "Z"), ["B", "A", "C"]);
        // Past the end clamps to the last position
        assert_eq!(ids(&store.move_to_index("A", "Z", 10), "Z"), ["B", "C", "A"]);
    }

    #[test]
    fn move_to_zone_appends() {
        let store = hand_and_discard().move_to_zone("A", "Discard");
        assert_eq!(ids(&store, "Hand"), ["B"]);
        assert_eq!(ids(&store, "Discard"), ["X", "A"]);
    }

    #[test]
    fn move_to_index_across_zones_inserts() {
        let store = hand_and_discard().move_to_index("B", "Discard", 0);
        assert_eq!(ids(&store, "Hand"), ["A"]);
        assert_eq!(ids(&store, "Discard"), ["B", "X"]);

        let store = hand_and_discard().move_to_index("B", "Discard", 5);
        assert_eq!(ids(&store, "Discard"), ["X", "B"]);
    }

    #[test]
    fn missing_target_zone_is_created() {
        let store = hand_and_discard().move_to_zone("A", "Play");
        assert!(store.contains_zone("Play"));
        assert_eq!(ids(&store, "Play"), ["A"]);

        let store = hand_and_discard().move_to_index("A", "Removed-1", 3);
        assert_eq!(ids(&store, "Removed-1"), ["A"]);
    }

    #[test]
    fn unknown_card_is_a_noop() {
        let store = hand_and_discard();
        assert!(store.plan_move_to_zone("nope", "Discard").is_none());
        assert_eq!(store.move_to_zone("nope", "Discard"), store);
        assert_eq!(store.move_to_index("nope", "Hand", 0), store);
        assert!(!store.move_to_zone("nope", "Play").contains_zone("Play"));
    }

    #[test]
    fn moving_last_card_to_own_zone_is_a_noop() {
        let store = hand_and_discard();
        assert!(store.plan_move_to_zone("B", "Hand").is_none());
        assert_eq!(ids(&store.move_to_zone("A", "Hand"), "Hand"), ["B", "A"]);
    }

    #[test]
    fn old_snapshot_is_untouched() {
        let before = hand_and_discard();
        let after = before.move_to_zone("A", "Discard");
        assert_eq!(ids(&before, "Hand"), ["A", "B"]);
        assert_eq!(ids(&before, "Discard"), ["X"]);
        assert_ne!(before, after);
    }

    #[test]
    fn untouched_zones_are_shared() {
        let before = ZoneMembershipStore::from_zones([
            (String::from("Hand"), vec![card_record!("A", "Hand")]),
            (String::from("Deck"), vec![card_record!("D", "Deck")]),
        ]);
        let after = before.move_to_zone("A", "Discard");
        assert!(Arc::ptr_eq(&before.zones["Deck"], &after.zones["Deck"]));
    }

    #[test]
    fn change_reports_both_locations() {
        let store = hand_and_discard();
        let planned = store.plan_move_to_zone("A", "Discard").unwrap();
        assert_eq!(
            planned.change,
            MembershipChange {
                card_id: String::from("A"),
                from: CardLocation {
                    zone: String::from("Hand"),
                    index: 0
                },
                to: CardLocation {
                    zone: String::from("Discard"),
                    index: 1
                },
            }
        );
    }
}
