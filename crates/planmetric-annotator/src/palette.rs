//! Polygon fill palette.

/// Fixed assignment order for polygon colors.
pub const PALETTE: [&str; 8] = [
    "#e6194b", "#3cb44b", "#4363d8", "#f58231", "#911eb4", "#46f0f0", "#f032e6", "#bcf60c",
];

/// Picks the color for the next polygon: the first palette entry not
/// already in use, or once the palette is exhausted, cycling by creation
/// index.
pub fn assign_color(in_use: &[String], creation_index: usize) -> &'static str {
    PALETTE
        .iter()
        .copied()
        .find(|candidate| !in_use.iter().any(|used| used == candidate))
        .unwrap_or(PALETTE[creation_index % PALETTE.len()])
}
