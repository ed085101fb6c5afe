//! Rendering and parsing of register states

use crate::fibonacci::max_seed;

/// How register states are written out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StateFormat {
    /// Plain decimal
    #[default]
    Decimal,
    /// `0x`-prefixed hexadecimal (lowercase), padded to whole bytes
    HexLowercase,
    /// `0x`-prefixed hexadecimal (uppercase), padded to whole bytes
    HexUppercase,
    /// `0b`-prefixed binary, padded to the register width
    Binary,
}

/// Bits needed to show `state` for a `width`-bit register.
/// States carrying the feedback bit above the register get one extra digit.
fn display_bits(state: u64, width: u32) -> u32 {
    if state > max_seed(width) {
        (u64::BITS - state.leading_zeros()).max(width + 1)
    } else {
        width
    }
}

/// Minimal big-endian byte span holding `bits` bits of `state`
fn be_bytes(state: u64, bits: u32) -> Vec<u8> {
    let len = bits.div_ceil(8).max(1) as usize;
    state.to_be_bytes()[8 - len..].to_vec()
}

impl StateFormat {
    /// Render one state of a `width`-bit register
    pub fn encode(&self, state: u64, width: u32) -> String {
        let bits = display_bits(state, width);
        match self {
            StateFormat::Decimal => state.to_string(),
            StateFormat::HexLowercase => format!("0x{}", hex::encode(be_bytes(state, bits))),
            StateFormat::HexUppercase => format!("0x{}", hex::encode_upper(be_bytes(state, bits))),
            StateFormat::Binary => format!("0b{:0width$b}", state, width = bits as usize),
        }
    }
}

/// Parse a state literal: decimal, `0x` hex or `0b` binary, `_` allowed as separator
pub fn parse_state(literal: &str) -> Result<u64, String> {
    let cleaned: String = literal.trim().chars().filter(|&c| c != '_').collect();
    if cleaned.is_empty() {
        return Err("State cannot be empty".to_string());
    }

    if let Some(digits) = cleaned.strip_prefix("0x").or_else(|| cleaned.strip_prefix("0X")) {
        // hex::decode wants whole bytes
        let padded = if digits.len() % 2 != 0 {
            format!("0{}", digits)
        } else {
            digits.to_string()
        };
        let bytes = hex::decode(&padded).map_err(|e| format!("Invalid hex state '{}': {}", literal, e))?;
        let significant: Vec<u8> = bytes.iter().copied().skip_while(|&b| b == 0).collect();
        if significant.len() > 8 {
            return Err(format!("State '{}' does not fit in 64 bits", literal));
        }
        if bytes.is_empty() {
            return Err(format!("Invalid hex state '{}': no digits", literal));
        }
        return Ok(significant.iter().fold(0u64, |acc, &b| (acc << 8) | b as u64));
    }

    if let Some(digits) = cleaned.strip_prefix("0b").or_else(|| cleaned.strip_prefix("0B")) {
        return u64::from_str_radix(digits, 2)
            .map_err(|e| format!("Invalid binary state '{}': {}", literal, e));
    }

    cleaned
        .parse::<u64>()
        .map_err(|e| format!("Invalid state '{}': {}", literal, e))
}

/// Parse a comma-separated tap list such as `13,12,2,3`
pub fn parse_taps(list: &str) -> Result<Vec<u32>, String> {
    let list = list.trim();
    if list.is_empty() {
        return Ok(Vec::new());
    }
    list.split(',')
        .map(|tap| {
            tap.trim()
                .parse::<u32>()
                .map_err(|e| format!("Invalid tap '{}': {}", tap.trim(), e))
        })
        .collect()
}
