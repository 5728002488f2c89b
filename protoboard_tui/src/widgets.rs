use std::str::FromStr;

use protoboard::{Board, CardPresentation, CardRecord, TextPosition, ZoneType};
use ratatui::{
    prelude::*,
    widgets::{
        block::{Position, Title},
        *,
    },
};

use crate::geometry::{BoardGeometry, ZoneGeometry};

/// Arrow pointing where the top edge of the card faces.
fn rotation_marker(presentation: &CardPresentation) -> &'static str {
    match presentation.quarter_turns() {
        0 => "▲",
        1 => "►",
        2 => "▼",
        _ => "◄",
    }
}

/// Background of a face-up card. Unknown colors fall back to the terminal's.
fn card_color(card: &CardRecord) -> Color {
    Color::from_str(card.color.trim()).unwrap_or(Color::Reset)
}

pub struct CardWidget<'a> {
    pub card: &'a CardRecord,
    pub presentation: CardPresentation,
    pub dragged: bool,
}

impl Widget for CardWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);
        let mut style = Style::new();
        if self.dragged {
            style = style.add_modifier(Modifier::DIM);
        }
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title(Title::from(rotation_marker(&self.presentation)).alignment(Alignment::Right))
            .style(style);
        let inner = block.inner(area);
        block.render(area, buf);

        if self.presentation.is_face_up() {
            let bg = card_color(self.card);
            let lines = vec![
                Line::from(self.card.name.as_str().bold()),
                Line::from(self.card.card_type.as_str().italic()),
                Line::from(self.card.text.as_str()),
            ];
            Paragraph::new(lines)
                .style(style.bg(bg))
                .wrap(Wrap { trim: true })
                .render(inner, buf);
        } else {
            let row = "░".repeat(usize::from(inner.width));
            let lines = vec![Line::from(row); usize::from(inner.height)];
            Paragraph::new(lines).style(style).render(inner, buf);
        }
    }
}

/// Zones are labeled by their identifier, so that the zones of different
/// players can be told apart.
fn zone_title(zone: &str, count: usize, scrollable: bool) -> String {
    let mut title = format!(" {} ({}) ", zone, count);
    if scrollable {
        title.push_str("⇆ ");
    }
    title
}

pub struct ZoneWidget<'a> {
    pub board: &'a Board,
    pub geometry: &'a ZoneGeometry,
    pub dragged: Option<&'a str>,
    pub highlighted: bool,
}

impl Widget for ZoneWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(view) = self.board.view(&self.geometry.zone) else {
            return;
        };
        let spec = view.spec();
        let count = self.board.zone_cards(&self.geometry.zone).len();
        let (position, alignment) = match spec.text_position.unwrap_or_default() {
            TextPosition::Top => (Position::Top, Alignment::Center),
            TextPosition::Bottom => (Position::Bottom, Alignment::Center),
            TextPosition::Left => (Position::Top, Alignment::Left),
            TextPosition::Right => (Position::Top, Alignment::Right),
        };
        let scrollable = spec.zone_type == ZoneType::Bar && view.scroll().is_scrollable();
        let title = zone_title(&self.geometry.zone, count, scrollable);
        let border_style = if self.highlighted {
            Style::new().yellow()
        } else {
            Style::new().dark_gray()
        };
        Block::bordered()
            .border_style(border_style)
            .title(Title::from(title).position(position).alignment(alignment))
            .render(area, buf);

        let cards = self.board.zone_cards(&self.geometry.zone);
        for card_geometry in &self.geometry.cards {
            let Some(card) = cards.get(card_geometry.index) else {
                continue;
            };
            CardWidget {
                card,
                presentation: view.presentation(&card.id),
                dragged: self.dragged == Some(card.id.as_str()),
            }
            .render(card_geometry.rect, buf);
        }
    }
}

pub struct BoardWidget<'a> {
    pub board: &'a Board,
    pub geometry: &'a BoardGeometry,
    pub dragged: Option<&'a str>,
    /// Zone under the pointer while dragging.
    pub hovered_zone: Option<&'a str>,
}

impl Widget for BoardWidget<'_> {
    fn render(self, _area: Rect, buf: &mut Buffer) {
        for (player, frame) in &self.geometry.player_frames {
            Block::bordered()
                .border_type(BorderType::Double)
                .title(format!(" Player {} ", player))
                .render(*frame, buf);
        }
        for zone in &self.geometry.zones {
            ZoneWidget {
                board: self.board,
                geometry: zone,
                dragged: self.dragged,
                highlighted: self.hovered_zone == Some(zone.zone.as_str()),
            }
            .render(zone.outer, buf);
        }
    }
}

pub struct ReferenceWidget<'a> {
    pub text: &'a str,
    pub scroll: u16,
}

impl Widget for ReferenceWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.text)
            .block(Block::bordered().title(" Layout reference "))
            .scroll((self.scroll, 0))
            .render(area, buf);
    }
}
