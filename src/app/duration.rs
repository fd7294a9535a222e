use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid duration token {token:?}")]
pub(crate) struct ParseDurationError {
    pub(crate) token: String,
}

impl ParseDurationError {
    fn new(token: &str) -> Self {
        Self {
            token: token.to_string(),
        }
    }
}

/// Parses `PT[nH][nM][nS]` into whole seconds. Units must appear in that order,
/// each at most once. `PT` alone is zero.
pub(crate) fn parse_duration(token: &str) -> Result<u64, ParseDurationError> {
    let invalid = || ParseDurationError::new(token);
    let mut rest = token.strip_prefix("PT").ok_or_else(invalid)?;

    let mut total: u64 = 0;
    let mut allowed: &[(char, u64)] = &[('H', 3600), ('M', 60), ('S', 1)];
    while !rest.is_empty() {
        let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
        if digits_len == 0 {
            return Err(invalid());
        }
        let (digits, tail) = rest.split_at(digits_len);
        let mut tail_chars = tail.chars();
        let unit = tail_chars.next().ok_or_else(invalid)?;

        let position = allowed
            .iter()
            .position(|(candidate, _)| *candidate == unit)
            .ok_or_else(invalid)?;
        let multiplier = allowed[position].1;
        allowed = &allowed[position + 1..];

        let value = digits.parse::<u64>().map_err(|_| invalid())?;
        total = value
            .checked_mul(multiplier)
            .and_then(|seconds| total.checked_add(seconds))
            .ok_or_else(invalid)?;
        rest = tail_chars.as_str();
    }

    Ok(total)
}

pub(crate) fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{hours}h {minutes}m {secs}s")
    } else if minutes > 0 {
        format!("{minutes}m {secs}s")
    } else {
        format!("{secs}s")
    }
}
