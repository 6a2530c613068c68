/// Convert column index to letter (0 -> A, 1 -> B, 26 -> AA, etc.)
pub(crate) fn col_to_letter(col: usize) -> String {
    let mut result = String::new();
    let mut n = col;
    loop {
        result.insert(0, (b'A' + (n % 26) as u8) as char);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    result
}

/// A1-style name of a 0-based position.
pub(crate) fn cell_name(row: usize, col: usize) -> String {
    format!("{}{}", col_to_letter(col), row + 1)
}

/// Parse a paste anchor: A1-style (`C7`) or zero-based `row,col` (`6,2`).
/// Returns `(row, col)`, 0-based.
pub(crate) fn parse_anchor(input: &str) -> Result<(usize, usize), String> {
    let s = input.trim();
    if let Some((r, c)) = s.split_once(',') {
        let row = r.trim().parse::<usize>().map_err(|_| format!("invalid anchor row '{r}'"))?;
        let col = c.trim().parse::<usize>().map_err(|_| format!("invalid anchor column '{c}'"))?;
        return Ok((row, col));
    }

    let split = s.find(|ch: char| ch.is_ascii_digit()).unwrap_or(s.len());
    let (letters, digits) = s.split_at(split);
    if letters.is_empty() || digits.is_empty() || !letters.chars().all(|ch| ch.is_ascii_alphabetic()) {
        return Err(format!("invalid anchor '{input}' (expected e.g. B3 or 2,1)"));
    }

    let mut col = 0usize;
    for ch in letters.chars() {
        let digit = (ch.to_ascii_uppercase() as u8 - b'A') as usize + 1;
        col = col
            .checked_mul(26)
            .and_then(|c| c.checked_add(digit))
            .ok_or_else(|| format!("anchor column '{letters}' out of range"))?;
    }
    let row = digits
        .parse::<usize>()
        .ok()
        .filter(|&r| r >= 1)
        .ok_or_else(|| format!("invalid anchor row '{digits}'"))?;

    Ok((row - 1, col - 1))
}

/// Escape tabs, newlines and backslashes so a value fits on one TSV line.
pub(crate) fn escape_tsv(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(ch),
        }
    }
    out
}
