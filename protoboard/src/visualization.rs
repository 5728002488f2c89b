use crate::{Board, Section, ZoneType};

/// Renders the board as plain text, one line per zone.
///
/// Face-down cards are drawn as 🂠, stacks only show their top card and
/// the number of cards below it.
pub fn visualize_board(board: &Board) -> String {
    let mut result = String::new();
    let mut current_section = None;
    for row in board.rows() {
        if current_section != Some(row.section) {
            current_section = Some(row.section);
            match row.section {
                Section::Shared => result += "Shared\n",
                Section::Player(player) => result += &format!("Player {}\n", player),
            }
        }
        result += &format!("  {}\n", row.name);
        for zone in &row.zones {
            let Some(view) = board.view(zone) else {
                continue;
            };
            let cards = board.zone_cards(zone);
            let kind = match view.zone_type() {
                ZoneType::Stack => "stack",
                ZoneType::Bar => "bar",
                ZoneType::Freeform => "table",
            };
            result += &format!("    {:<14} {:<5} {:>3} │", zone, kind, cards.len());
            let visible = board.visible_cards(zone);
            if visible.is_empty() {
                result += " ·";
            }
            for card in visible {
                if view.presentation(&card.id).is_face_up() {
                    result += &format!(" {}", card.name);
                } else {
                    result += " 🂠";
                }
                if view.zone_type() == ZoneType::Freeform {
                    if let Some(point) = view.drop_point(&card.id) {
                        result += &format!("@({},{})", point.x, point.y);
                    }
                }
            }
            result += "\n";
        }
    }
    for zone in board.unplaced_zones() {
        result += &format!(
            "  (not in layout) {} {:>3}\n",
            zone,
            board.zone_cards(zone).len()
        );
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{card_record, ZoneLayoutConfig};

    #[test]
    fn shows_top_card_and_hidden_faces() {
        let cards = [
            card_record!("a", "Deck"),
            card_record!("b", "Discard"),
            card_record!("c", "Hand", "1"),
            card_record!("d", "Hand", "1"),
        ];
        let board = crate::Board::assemble(&ZoneLayoutConfig::default(), &cards);
        let text = visualize_board(&board);
        let line = |zone: &str| {
            text.lines()
                .find(|line| line.contains('│') && line.trim_start().starts_with(zone))
                .unwrap()
                .to_owned()
        };
        assert!(text.starts_with("Shared\n  Play\n"));
        assert!(line("Deck").ends_with("│ 🂠"));
        assert!(line("Discard").ends_with("│ Card b"));
        assert!(line("Hand-1").ends_with("│ Card c Card d"));
        assert!(line("Play").ends_with("│ ·"));
        assert!(text.contains("Player 1\n"));
    }
}
