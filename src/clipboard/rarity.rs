use crate::error::ClipboardError;

use super::SET_MARKER_PREFIX;

/// Parses the header block (before the first `--------`) into a frame type
/// and the item's base type line. The header's last line is the type line;
/// its first line carries `Rarity: <word>`.
pub fn parse_header(header: &str) -> Result<(u8, String), ClipboardError> {
    let lines: Vec<&str> = header.lines().map(str::trim).collect();
    let Some(rarity_line) = lines.first() else {
        return Err(ClipboardError::MissingRarity);
    };

    let Some(rarity) = rarity_line.strip_prefix("Rarity: ") else {
        return Err(ClipboardError::MissingRarity);
    };

    let frame_type = match rarity {
        "Normal" => 0,
        "Magic" => 1,
        "Rare" => 2,
        "Unique" => 3,
        other => return Err(ClipboardError::UnknownRarity(other.to_string())),
    };

    let type_line = lines
        .last()
        .copied()
        .unwrap_or_default()
        .strip_prefix(SET_MARKER_PREFIX)
        .unwrap_or_else(|| lines.last().copied().unwrap_or_default())
        .to_string();

    Ok((frame_type, type_line))
}

/// Maps a rendered gem socket color to upstream's attribute code.
pub fn socket_attr(letter: &str) -> &'static str {
    match letter {
        "G" => "D",
        "B" => "I",
        "R" => "S",
        "W" => "G",
        _ => "G",
    }
}
