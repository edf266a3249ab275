/// Parse `#RRGGBB` or `#RGB` into its components
pub fn parse_hex_color(value: &str) -> Result<(u8, u8, u8), String> {
    let digits = value.trim().trim_start_matches('#');

    let expanded = match digits.len() {
        6 => digits.to_string(),
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        _ => return Err(format!("Invalid color '{}'. Use #RRGGBB", value)),
    };

    let bytes = hex::decode(&expanded).map_err(|_| format!("Invalid color '{}'. Use #RRGGBB", value))?;
    Ok((bytes[0], bytes[1], bytes[2]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_and_short_forms() {
        assert_eq!(parse_hex_color("#FF9800").unwrap(), (0xFF, 0x98, 0x00));
        assert_eq!(parse_hex_color("2962ff").unwrap(), (0x29, 0x62, 0xFF));
        assert_eq!(parse_hex_color("#fa0").unwrap(), (0xFF, 0xAA, 0x00));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(parse_hex_color("#12345").is_err());
        assert!(parse_hex_color("#GGGGGG").is_err());
        assert!(parse_hex_color("").is_err());
    }
}
