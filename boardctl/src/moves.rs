use protoboard::{Board, MembershipChange};

#[derive(Debug, PartialEq, Eq)]
/// Error type for a move given on the command line.
pub enum MoveSpecError {
    MissingSeparator { spec: String },
    EmptyPart { spec: String },
}

impl std::error::Error for MoveSpecError {}

impl std::fmt::Display for MoveSpecError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MoveSpecError::MissingSeparator { spec } => {
                write!(f, "Expected CARD=ZONE or CARD=ZONE@INDEX, got '{}'", spec)
            }
            MoveSpecError::EmptyPart { spec } => {
                write!(f, "Card and zone must not be empty in '{}'", spec)
            }
        }
    }
}

/// A card move given as `CARD=ZONE` (to the end) or `CARD=ZONE@INDEX`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveSpec {
    pub card_id: String,
    pub zone: String,
    pub index: Option<usize>,
}

impl std::str::FromStr for MoveSpec {
    type Err = MoveSpecError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let (card_id, target) =
            spec.split_once('=')
                .ok_or_else(|| MoveSpecError::MissingSeparator {
                    spec: String::from(spec),
                })?;
        // A zone name may contain '@', only a numeric suffix is an index
        let (zone, index) = match target.rsplit_once('@') {
            Some((zone, index)) => match index.parse::<usize>() {
                Ok(index) => (zone, Some(index)),
                Err(_) => (target, None),
            },
            None => (target, None),
        };
        if card_id.is_empty() || zone.is_empty() {
            return Err(MoveSpecError::EmptyPart {
                spec: String::from(spec),
            });
        }
        Ok(MoveSpec {
            card_id: String::from(card_id),
            zone: String::from(zone),
            index,
        })
    }
}

impl MoveSpec {
    /// Applies the move. Returns `None` if nothing moved.
    pub fn apply(&self, board: &mut Board) -> Option<MembershipChange> {
        match self.index {
            Some(index) => board.move_to_index(&self.card_id, &self.zone, index),
            None => board.move_to_zone(&self.card_id, &self.zone),
        }
    }
}

#[cfg(test)]
mod tests {
    use protoboard::{card_record, CardLocation, ZoneLayoutConfig};

    use super::*;

    #[test]
    fn parses_both_forms() {
        assert_eq!(
            "c1=Hand-1".parse::<MoveSpec>(),
            Ok(MoveSpec {
                card_id: String::from("c1"),
                zone: String::from("Hand-1"),
                index: None
            })
        );
        assert_eq!(
            "c1=Hand-1@2".parse::<MoveSpec>(),
            Ok(MoveSpec {
                card_id: String::from("c1"),
                zone: String::from("Hand-1"),
                index: Some(2)
            })
        );
        assert_eq!(
            "c1=Me@Home".parse::<MoveSpec>().map(|spec| spec.zone),
            Ok(String::from("Me@Home"))
        );
    }

    #[test]
    fn rejects_malformed_moves() {
        assert!(matches!(
            "c1".parse::<MoveSpec>(),
            Err(MoveSpecError::MissingSeparator { .. })
        ));
        assert!(matches!(
            "=Deck".parse::<MoveSpec>(),
            Err(MoveSpecError::EmptyPart { .. })
        ));
    }

    #[test]
    fn applies_to_the_board() {
        let cards = [card_record!("c1", "Deck"), card_record!("c2", "Deck")];
        let mut board = Board::assemble(&ZoneLayoutConfig::default(), &cards);
        let spec: MoveSpec = "c2=Deck@0".parse().unwrap();
        let change = spec.apply(&mut board).unwrap();
        assert_eq!(
            change.to,
            CardLocation {
                zone: String::from("Deck"),
                index: 0
            }
        );
        assert_eq!(spec.apply(&mut board), None);
    }
}
