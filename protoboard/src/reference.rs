use crate::ZoneLayoutConfig;

/// Describes the layout document, for the reference view.
pub const LAYOUT_REFERENCE: &str = r#"LAYOUT DOCUMENT

The layout decides how many players there are, which cards are in the game,
and how the zones of the table are arranged.

  {
    "Players": 1,          number of players, at least 1
    "Cards": [ ... ],      cards of the game, usually loaded from a CSV table instead
    "SharedZones": [ ... ] rows of zones that exist once, e.g. Deck and Discard
    "PlayerZones": [ ... ] rows of zones that every player gets, e.g. Hand
  }

A row is { "RowName": "...", "Zones": [ ... ] }. A zone is

  {
    "Name": "Hand",           shared zones are called by their name,
                              player zones by name and player, e.g. Hand-2
    "CardDisplay": "both",    "faceUp", "faceDown" or "both"
    "ZoneType": 1,            0 stack (only the top card shows),
                              1 bar (all cards in a row),
                              2 table (cards lie where they are dropped)
    "CardRotation": "left",   optional: "normal", "left", "right", "reverse"
    "TextPosition": "left"    optional: "top", "left", "right", "bottom"
  }

When no zone has ZoneType 2, a shared table zone called "Play" is added.

CARD TABLE

A CSV table with the header

  id,cardName,cardType,cardText,cardColor,startZone,playerId

playerId 0 puts the card into the shared zone called startZone, any other
playerId into that player's copy of the zone. Rows that cannot be read are
skipped.

CARDS

Drag a card onto a zone to put it on top of that zone. Drag it over the
cards of a bar to put it in between. Every card has a toolbar:

  f  flip face up or face down
  w  upright      a  turned left
  d  turned right s  upside down

A left click turns the card a quarter to the left, a right click a quarter
to the right.
"#;

/// The reference text followed by the default layout as an example.
pub fn reference_document() -> String {
    let example = serde_json::to_string_pretty(&ZoneLayoutConfig::default())
        .unwrap_or_default();
    format!("{}\nEXAMPLE\n\n{}\n", LAYOUT_REFERENCE, example)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn example_parses_back() {
        let document = reference_document();
        let example = &document[document.find("EXAMPLE").unwrap() + "EXAMPLE".len()..];
        let layout: ZoneLayoutConfig = serde_json::from_str(example.trim()).unwrap();
        assert_eq!(layout, ZoneLayoutConfig::default());
    }
}
