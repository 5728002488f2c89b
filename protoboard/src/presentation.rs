use crate::{CardFace, Rotation};

/// Size of an upright card, in pixels.
pub const CARD_SIZE: CardSize = CardSize {
    width: 146,
    height: 220,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CardSize {
    pub width: u16,
    pub height: u16,
}

impl CardSize {
    pub fn swapped(self) -> Self {
        Self {
            width: self.height,
            height: self.width,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Face {
    Up,
    Down,
}

/// A direct click on a card.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Click {
    /// Turns the card a quarter counterclockwise.
    Primary,
    /// Turns the card a quarter clockwise.
    Secondary,
}

/// The buttons of a card's toolbar.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CardCommand {
    Flip,
    Orient(Rotation),
}

/// How one card is shown inside a zone.
///
/// This is local to the zone view showing the card and is not part of the
/// shared board state. Face and rotation change independently.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CardPresentation {
    face: Face,
    /// In degrees, clockwise. Not normalized: two left clicks give -180.
    rotation: i32,
}

impl CardPresentation {
    /// The presentation a card gets when it shows up in a zone.
    pub fn for_zone(card_display: CardFace, card_rotation: Option<Rotation>) -> Self {
        let face = match card_display {
            CardFace::FaceUp | CardFace::Both => Face::Up,
            CardFace::FaceDown => Face::Down,
        };
        Self {
            face,
            rotation: card_rotation.map_or(0, Rotation::degrees),
        }
    }

    pub fn face(&self) -> Face {
        self.face
    }

    pub fn is_face_up(&self) -> bool {
        self.face == Face::Up
    }

    pub fn rotation(&self) -> i32 {
        self.rotation
    }

    /// The rotation as a number of clockwise quarter turns, `0..4`.
    pub fn quarter_turns(&self) -> u8 {
        (self.rotation.rem_euclid(360) / 90) as u8
    }

    pub fn flip(&mut self) {
        self.face = match self.face {
            Face::Up => Face::Down,
            Face::Down => Face::Up,
        };
    }

    /// Sets the rotation to exactly the given orientation.
    pub fn orient(&mut self, orientation: Rotation) {
        self.rotation = orientation.degrees();
    }

    /// Turns the card by a quarter relative to where it is now.
    pub fn click(&mut self, click: Click) {
        self.rotation += match click {
            Click::Primary => -90,
            Click::Secondary => 90,
        };
    }

    pub fn apply(&mut self, command: CardCommand) {
        match command {
            CardCommand::Flip => self.flip(),
            CardCommand::Orient(orientation) => self.orient(orientation),
        }
    }

    /// Whether the card lies on its side.
    pub fn is_sideways(&self) -> bool {
        self.rotation % 180 != 0
    }

    /// The box the card takes up, given the size of an upright card.
    pub fn bounding_box(&self, upright: CardSize) -> CardSize {
        if self.is_sideways() {
            upright.swapped()
        } else {
            upright
        }
    }
}
