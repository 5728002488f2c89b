use protoboard::ZoneLayoutConfig;

use crate::DataError;

/// Reads a layout document and checks that a board can be built from it.
pub fn parse_layout(text: &str) -> Result<ZoneLayoutConfig, DataError> {
    let layout: ZoneLayoutConfig = serde_json::from_str(text)?;
    layout.validate()?;
    Ok(layout)
}

/// Writes a layout document.
pub fn write_layout(layout: &ZoneLayoutConfig) -> Result<String, DataError> {
    let mut text = serde_json::to_string_pretty(layout)?;
    text.push('\n');
    Ok(text)
}

#[cfg(test)]
mod tests {
    use protoboard::{CardFace, LayoutError, Rotation, TextPosition, ZoneType};

    use super::*;

    const DOCUMENT: &str = r#"{
  "Players": 2,
  "Cards": [
    {
      "id": "1",
      "cardName": "Goblin",
      "cardType": "Unit",
      "cardText": "",
      "cardColor": "green",
      "startZone": "Deck",
      "playerId": "0"
    }
  ],
  "SharedZones": [
    {
      "RowName": "Shared",
      "Zones": [
        {
          "Name": "Deck",
          "CardDisplay": "faceDown",
          "ZoneType": 0,
          "TextPosition": "top"
        }
      ]
    }
  ],
  "PlayerZones": [
    {
      "RowName": "Player",
      "Zones": [
        {
          "Name": "Hand",
          "CardDisplay": "both",
          "ZoneType": 1,
          "CardRotation": "reverse"
        }
      ]
    }
  ]
}
"#;

    #[test]
    fn reads_layout_document() {
        let layout = parse_layout(DOCUMENT).unwrap();
        assert_eq!(layout.players, 2);
        assert_eq!(layout.cards.len(), 1);
        let deck = &layout.shared_zones[0].zones[0];
        assert_eq!(deck.card_display, CardFace::FaceDown);
        assert_eq!(deck.zone_type, ZoneType::Stack);
        assert_eq!(deck.text_position, Some(TextPosition::Top));
        let hand = &layout.player_zones[0].zones[0];
        assert_eq!(hand.card_rotation, Some(Rotation::Reverse));
        assert_eq!(hand.text_position, None);
    }

    #[test]
    fn written_document_is_identical() {
        let layout = parse_layout(DOCUMENT).unwrap();
        assert_eq!(write_layout(&layout).unwrap(), DOCUMENT);
    }

    #[test]
    fn missing_lists_default_to_empty() {
        let layout = parse_layout(r#"{"Players": 1}"#).unwrap();
        assert!(layout.cards.is_empty());
        assert!(layout.shared_zones.is_empty());
        assert_eq!(parse_layout(&write_layout(&layout).unwrap()).unwrap(), layout);
    }

    #[test]
    fn invalid_documents_are_rejected() {
        assert!(matches!(parse_layout("{"), Err(DataError::Json(_))));
        assert!(matches!(
            parse_layout(r#"{"Players": 1, "SharedZones": [{"RowName": "r", "Zones": [{"Name": "Deck", "CardDisplay": "sideways", "ZoneType": 0}]}]}"#),
            Err(DataError::Json(_))
        ));
        assert!(matches!(
            parse_layout(r#"{"Players": 0}"#),
            Err(DataError::Layout(LayoutError::NoPlayers))
        ));
    }
}
