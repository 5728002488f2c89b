use protoboard::CardRecord;
use tracing::warn;

use crate::{error_chain, DataError, DataSource, Diagnostic};

/// The columns of a card table, in the order they are written.
pub const CARD_COLUMNS: [&str; 7] = [
    "id",
    "cardName",
    "cardType",
    "cardText",
    "cardColor",
    "startZone",
    "playerId",
];

/// The readable rows of a card table, and what went wrong with the others.
#[derive(Clone, Debug, Default)]
pub struct ParsedCards {
    pub cards: Vec<CardRecord>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Reads a card table.
///
/// Rows that cannot be read are skipped and reported as diagnostics. The
/// table as a whole is rejected only when it lacks one of the
/// [`CARD_COLUMNS`]. Only the header names are trimmed, field values are kept
/// as written.
pub fn parse_cards(text: &str) -> Result<ParsedCards, DataError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    let missing: Vec<String> = CARD_COLUMNS
        .iter()
        .filter(|&&column| !headers.iter().any(|header| header == column))
        .map(|&column| String::from(column))
        .collect();
    if !missing.is_empty() {
        return Err(DataError::MissingColumns(missing));
    }

    let mut parsed = ParsedCards::default();
    for result in reader.deserialize::<CardRecord>() {
        match result {
            Ok(card) if card.id.trim().is_empty() => {
                parsed.diagnostics.push(Diagnostic {
                    source: DataSource::Cards,
                    line: None,
                    message: format!("Card \"{}\" has no id", card.name),
                });
            }
            Ok(card) => parsed.cards.push(card),
            Err(err) => parsed.diagnostics.push(Diagnostic {
                source: DataSource::Cards,
                line: err.position().map(|position| position.line()),
                message: error_chain(&err),
            }),
        }
    }
    for diagnostic in &parsed.diagnostics {
        warn!(%diagnostic, "Skipped card row");
    }
    Ok(parsed)
}

/// Writes a card table, header first.
pub fn write_cards(cards: &[CardRecord]) -> Result<String, DataError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(CARD_COLUMNS)?;
    for card in cards {
        writer.serialize(card)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|err| DataError::Io(err.into_error()))?;
    String::from_utf8(bytes)
        .map_err(|err| DataError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, err)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "\
id,cardName,cardType,cardText,cardColor,startZone,playerId
1,Goblin,Unit,\"Attack, then retreat\",#88cc88,Deck,0
2,Fireball,Spell,Deal 3,red,Hand,1
";

    #[test]
    fn reads_all_columns() {
        let parsed = parse_cards(TABLE).unwrap();
        assert!(parsed.diagnostics.is_empty());
        assert_eq!(parsed.cards.len(), 2);
        let goblin = &parsed.cards[0];
        assert_eq!(goblin.id, "1");
        assert_eq!(goblin.name, "Goblin");
        assert_eq!(goblin.card_type, "Unit");
        assert_eq!(goblin.text, "Attack, then retreat");
        assert_eq!(goblin.color, "#88cc88");
        assert_eq!(goblin.start_zone, "Deck");
        assert!(goblin.is_shared());
        assert_eq!(parsed.cards[1].start_zone_id(), "Hand-1");
    }

    #[test]
    fn malformed_rows_are_skipped() {
        let table = "\
id,cardName,cardType,cardText,cardColor,startZone,playerId
1,Goblin,Unit,,green,Deck,0
2,Broken,Unit
,Nameless,Unit,,green,Deck,0
3,Elf,Unit,,green,Deck,0
";
        let parsed = parse_cards(table).unwrap();
        let ids: Vec<&str> = parsed.cards.iter().map(|card| card.id.as_str()).collect();
        assert_eq!(ids, ["1", "3"]);
        assert_eq!(parsed.diagnostics.len(), 2);
        assert_eq!(parsed.diagnostics[0].line, Some(3));
        assert_eq!(parsed.diagnostics[0].source, DataSource::Cards);
    }

    #[test]
    fn column_order_does_not_matter() {
        let table = "\
playerId,startZone,id,cardName,cardType,cardText,cardColor,notes
2,Hand,7,Elf,Unit,,green,unused
";
        let parsed = parse_cards(table).unwrap();
        assert_eq!(parsed.cards[0].start_zone_id(), "Hand-2");
    }

    #[test]
    fn missing_columns_reject_the_table() {
        let err = parse_cards("id,cardName\n1,Goblin\n").unwrap_err();
        match err {
            DataError::MissingColumns(columns) => assert_eq!(
                columns,
                ["cardType", "cardText", "cardColor", "startZone", "playerId"]
            ),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn written_table_reads_back() {
        let cards = parse_cards(TABLE).unwrap().cards;
        let written = write_cards(&cards).unwrap();
        assert_eq!(written, TABLE);
        assert_eq!(parse_cards(&written).unwrap().cards, cards);
    }

    #[test]
    fn padded_text_is_kept() {
        let table = "\
id,cardName,cardType,cardText,cardColor,startZone,playerId
1,Goblin,Unit,\"  padded  \",green,Deck,0
";
        let cards = parse_cards(table).unwrap().cards;
        assert_eq!(cards[0].text, "  padded  ");
        let written = write_cards(&cards).unwrap();
        assert!(written.contains("  padded  "));
        assert_eq!(parse_cards(&written).unwrap().cards, cards);
        assert_eq!(write_cards(&parse_cards(&written).unwrap().cards).unwrap(), written);
    }

    #[test]
    fn blank_id_is_skipped() {
        let table = "\
id,cardName,cardType,cardText,cardColor,startZone,playerId
   ,Nameless,Unit,,green,Deck,0
";
        let parsed = parse_cards(table).unwrap();
        assert!(parsed.cards.is_empty());
        assert_eq!(parsed.diagnostics.len(), 1);
    }

    #[test]
    fn empty_card_list_writes_header() {
        assert_eq!(
            write_cards(&[]).unwrap(),
            "id,cardName,cardType,cardText,cardColor,startZone,playerId\n"
        );
    }
}
