use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{CardRecord, LayoutError};

/// Name of the table surface that is added when a layout has no freeform zone.
pub const DEFAULT_PLAY_ZONE: &str = "Play";

/// The declarative description of a board.
///
/// Field names follow the JSON layout document, which is why they are capitalized
/// on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneLayoutConfig {
    /// Number of players, at least one.
    #[serde(rename = "Players")]
    pub players: u32,
    /// Cards bundled with the layout. May be empty when cards come from a separate table.
    #[serde(rename = "Cards", default)]
    pub cards: Vec<CardRecord>,
    /// Rows of zones that exist once for the whole table.
    #[serde(rename = "SharedZones", default)]
    pub shared_zones: Vec<RowSetup>,
    /// Rows of zones that every player gets a copy of.
    #[serde(rename = "PlayerZones", default)]
    pub player_zones: Vec<RowSetup>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowSetup {
    #[serde(rename = "RowName")]
    pub name: String,
    #[serde(rename = "Zones")]
    pub zones: Vec<ZoneSpec>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneSpec {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "CardDisplay")]
    pub card_display: CardFace,
    #[serde(rename = "ZoneType")]
    pub zone_type: ZoneType,
    #[serde(rename = "CardRotation", default, skip_serializing_if = "Option::is_none")]
    pub card_rotation: Option<Rotation>,
    #[serde(rename = "TextPosition", default, skip_serializing_if = "Option::is_none")]
    pub text_position: Option<TextPosition>,
}

/// How the cards in a zone start out.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CardFace {
    FaceUp,
    FaceDown,
    /// Face up, and the player is expected to flip cards both ways.
    Both,
}

/// The rendering strategy of a zone.
///
/// Serialized as `0`, `1`, `2`. The names `"stack"`, `"bar"` and `"freeform"`
/// are accepted as well.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ZoneTypeRepr", into = "u8")]
pub enum ZoneType {
    /// Only the most recently added card is visible.
    Stack,
    /// All cards in a horizontal row, in sequence order.
    Bar,
    /// Cards lie wherever they were dropped.
    Freeform,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ZoneTypeRepr {
    Index(u8),
    Name(String),
}

impl TryFrom<ZoneTypeRepr> for ZoneType {
    type Error = String;

    fn try_from(repr: ZoneTypeRepr) -> Result<Self, Self::Error> {
        match repr {
            ZoneTypeRepr::Index(0) => Ok(ZoneType::Stack),
            ZoneTypeRepr::Index(1) => Ok(ZoneType::Bar),
            ZoneTypeRepr::Index(2) => Ok(ZoneType::Freeform),
            ZoneTypeRepr::Index(n) => Err(format!("unknown zone type {}", n)),
            ZoneTypeRepr::Name(name) => match name.to_ascii_lowercase().as_str() {
                "stack" => Ok(ZoneType::Stack),
                "bar" => Ok(ZoneType::Bar),
                "freeform" | "play" => Ok(ZoneType::Freeform),
                _ => Err(format!("unknown zone type \"{}\"", name)),
            },
        }
    }
}

impl From<ZoneType> for u8 {
    fn from(zone_type: ZoneType) -> u8 {
        zone_type as u8
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rotation {
    Normal,
    Left,
    Right,
    Reverse,
}

impl Rotation {
    /// The absolute angle this orientation stands for.
    pub fn degrees(self) -> i32 {
        match self {
            Rotation::Normal => 0,
            Rotation::Left => -90,
            Rotation::Right => 90,
            Rotation::Reverse => 180,
        }
    }
}

/// Where a zone's label is drawn relative to the zone.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextPosition {
    Top,
    #[default]
    Left,
    Right,
    Bottom,
}

/// The identifier of a copy of a player zone, e.g. `Hand-2`.
pub fn player_zone_id(name: &str, player: impl std::fmt::Display) -> String {
    format!("{}-{}", name, player)
}

impl ZoneLayoutConfig {
    /// Checks the invariants a board relies on.
    ///
    /// Zone identifiers have to be unique across the whole board, including
    /// the implicit table surface.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.players == 0 {
            return Err(LayoutError::NoPlayers);
        }
        for row in self.shared_zones.iter().chain(&self.player_zones) {
            if row.zones.iter().any(|zone| zone.name.trim().is_empty()) {
                return Err(LayoutError::EmptyZoneName {
                    row: row.name.clone(),
                });
            }
        }
        let mut seen = BTreeSet::new();
        for zone_id in self.zone_ids() {
            if !seen.insert(zone_id.clone()) {
                return Err(LayoutError::DuplicateZoneId { zone_id });
            }
        }
        Ok(())
    }

    /// Does the board need the implicit [`DEFAULT_PLAY_ZONE`]?
    pub fn needs_default_play_zone(&self) -> bool {
        !self
            .shared_zones
            .iter()
            .chain(&self.player_zones)
            .flat_map(|row| &row.zones)
            .any(|zone| zone.zone_type == ZoneType::Freeform)
    }

    /// Every zone identifier of the assembled board, shared zones first.
    pub fn zone_ids(&self) -> Vec<String> {
        let mut ids = Vec::new();
        if self.needs_default_play_zone() {
            ids.push(String::from(DEFAULT_PLAY_ZONE));
        }
        for zone in self.shared_zones.iter().flat_map(|row| &row.zones) {
            ids.push(zone.name.clone());
        }
        for player in 1..=self.players {
            for zone in self.player_zones.iter().flat_map(|row| &row.zones) {
                ids.push(player_zone_id(&zone.name, player));
            }
        }
        ids
    }
}

impl Default for ZoneLayoutConfig {
    fn default() -> Self {
        let zone = |name: &str,
                    card_display: CardFace,
                    zone_type: ZoneType,
                    text_position: TextPosition| ZoneSpec {
            name: String::from(name),
            card_display,
            zone_type,
            card_rotation: None,
            text_position: Some(text_position),
        };
        Self {
            players: 1,
            cards: Vec::new(),
            shared_zones: vec![RowSetup {
                name: String::from("Shared"),
                zones: vec![
                    zone("Deck", CardFace::FaceDown, ZoneType::Stack, TextPosition::Top),
                    zone("Discard", CardFace::FaceUp, ZoneType::Stack, TextPosition::Bottom),
                ],
            }],
            player_zones: vec![
                RowSetup {
                    name: String::from("In Play"),
                    zones: vec![zone("In Play", CardFace::Both, ZoneType::Bar, TextPosition::Left)],
                },
                RowSetup {
                    name: String::from("Resource"),
                    zones: vec![ZoneSpec {
                        card_rotation: Some(Rotation::Left),
                        ..zone("Resource", CardFace::FaceUp, ZoneType::Bar, TextPosition::Left)
                    }],
                },
                RowSetup {
                    name: String::from("Player"),
                    zones: vec![
                        zone("Hand", CardFace::Both, ZoneType::Bar, TextPosition::Left),
                        zone("Removed", CardFace::FaceUp, ZoneType::Stack, TextPosition::Right),
                    ],
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zone_type_accepts_numbers_and_names() {
        let parsed: Vec<ZoneType> = serde_json::from_str(r#"[0, 1, 2, "Stack", "bar"]"#).unwrap();
        assert_eq!(
            parsed,
            [
                ZoneType::Stack,
                ZoneType::Bar,
                ZoneType::Freeform,
                ZoneType::Stack,
                ZoneType::Bar
            ]
        );
        assert!(serde_json::from_str::<ZoneType>("7").is_err());
        assert_eq!(serde_json::to_string(&ZoneType::Bar).unwrap(), "1");
    }

    #[test]
    fn optional_zone_keys_are_omitted() {
        let spec = ZoneSpec {
            name: String::from("Deck"),
            card_display: CardFace::FaceDown,
            zone_type: ZoneType::Stack,
            card_rotation: None,
            text_position: None,
        };
        assert_eq!(
            serde_json::to_string(&spec).unwrap(),
            r#"{"Name":"Deck","CardDisplay":"faceDown","ZoneType":0}"#
        );
    }

    #[test]
    fn default_layout_is_valid() {
        let layout = ZoneLayoutConfig::default();
        assert_eq!(layout.validate(), Ok(()));
        assert_eq!(
            layout.zone_ids(),
            ["Play", "Deck", "Discard", "In Play-1", "Resource-1", "Hand-1", "Removed-1"]
        );
    }

    #[test]
    fn duplicate_zone_ids_are_rejected() {
        let mut layout = ZoneLayoutConfig::default();
        let deck = layout.shared_zones[0].zones[0].clone();
        layout.shared_zones[0].zones.push(deck);
        assert_eq!(
            layout.validate(),
            Err(LayoutError::DuplicateZoneId {
                zone_id: String::from("Deck")
            })
        );
    }

    #[test]
    fn zero_players_are_rejected() {
        let layout = ZoneLayoutConfig {
            players: 0,
            ..ZoneLayoutConfig::default()
        };
        assert_eq!(layout.validate(), Err(LayoutError::NoPlayers));
    }

    #[test]
    fn explicit_freeform_zone_replaces_default_play_zone() {
        let mut layout = ZoneLayoutConfig::default();
        layout.shared_zones[0].zones.push(ZoneSpec {
            name: String::from("Table"),
            card_display: CardFace::Both,
            zone_type: ZoneType::Freeform,
            card_rotation: None,
            text_position: None,
        });
        assert!(!layout.needs_default_play_zone());
        assert_eq!(layout.zone_ids()[0], "Deck");
    }
}
