/// The error type for [`ZoneLayoutConfig::validate()`](crate::ZoneLayoutConfig::validate).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LayoutError {
    NoPlayers,
    EmptyZoneName { row: String },
    DuplicateZoneId { zone_id: String },
}

impl std::error::Error for LayoutError {}

impl std::fmt::Display for LayoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayoutError::NoPlayers => write!(f, "The layout must have at least one player"),
            LayoutError::EmptyZoneName { row } => {
                write!(f, "A zone in row \"{}\" has an empty name", row)
            }
            LayoutError::DuplicateZoneId { zone_id } => write!(
                f,
                "The zone \"{}\" appears more than once on the board",
                zone_id
            ),
        }
    }
}
