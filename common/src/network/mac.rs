/// Canonical all-zero address reported for incomplete neighbor entries.
pub const ZERO_MAC: &str = "00:00:00:00:00:00";

/// Normalizes any common MAC spelling (`aa-bb-..`, `aabb.ccdd.eeff`,
/// `a:b:c:d:e:f`) to uppercase colon-separated hex.
///
/// Returns `None` unless exactly 12 hex digits remain once separators are
/// removed.
pub fn normalize(raw: &str) -> Option<String> {
    let digits = hex_digits(raw)?;
    let pairs: Vec<&str> = (0..6).map(|i| &digits[i * 2..i * 2 + 2]).collect();
    Some(pairs.join(":"))
}

/// First three octets as six uppercase hex digits (the OUI).
pub fn oui_prefix(raw: &str) -> Option<String> {
    hex_digits(raw).map(|digits| digits[..6].to_string())
}

pub fn is_zero(mac: &str) -> bool {
    hex_digits(mac).is_some_and(|digits| digits.bytes().all(|b| b == b'0'))
}

fn hex_digits(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    // Single-digit groups such as `0:1b:63:...` (BSD arp output) are padded.
    let groups: Vec<&str> = trimmed.split([':', '-']).collect();
    let digits: String = if groups.len() == 6 && groups.iter().all(|g| (1..=2).contains(&g.len())) {
        groups.iter().map(|g| format!("{g:0>2}")).collect()
    } else {
        trimmed.chars().filter(|c| !matches!(c, ':' | '-' | '.')).collect()
    };

    if digits.len() != 12 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    Some(digits.to_ascii_uppercase())
}
