//! stacks address and denomination helpers

/// shorten an address for display as head...tail
pub fn format_address(address: &str, length: usize) -> String {
    if address.is_empty() {
        return String::new();
    }
    if address.len() <= length * 2 {
        return address.to_string();
    }
    format!(
        "{}...{}",
        &address[..length],
        &address[address.len() - length..]
    )
}

/// basic shape check: `S` then `T` or `P`, then 38 chars of the c32 set
/// (digits and uppercase letters without I, L, O, U)
pub fn is_valid_stacks_address(address: &str) -> bool {
    let bytes = address.as_bytes();
    if bytes.len() != 40 || bytes[0] != b'S' || !matches!(bytes[1], b'T' | b'P') {
        return false;
    }
    bytes[2..]
        .iter()
        .all(|b| matches!(b, b'0'..=b'9' | b'A'..=b'H' | b'J'..=b'N' | b'P'..=b'Z'))
}

pub const MICRO_STX_PER_STX: u64 = 1_000_000;

/// whole STX to microSTX, flooring fractional amounts
pub fn to_micro_stx(stx: f64) -> u64 {
    (stx * MICRO_STX_PER_STX as f64).floor() as u64
}

/// microSTX to STX
pub fn from_micro_stx(micro: u64) -> f64 {
    micro as f64 / MICRO_STX_PER_STX as f64
}
