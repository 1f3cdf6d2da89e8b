// Tolerant tokenizer for sheets exported as CSV.
// Quoted spans protect commas ("R$ 1.300,00" stays one field); there is no
// escaped-quote handling, a bare '"' always flips the quoted state.

pub type Row = Vec<String>;

/// Splits one line into trimmed fields. Never fails: malformed quoting just
/// yields a best-effort split.
pub fn tokenize_line(line: &str) -> Row {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    fields.push(current.trim().to_string());
    fields
}

/// Tokenizes a whole sheet, one row per line. The blob is trimmed first so a
/// trailing newline does not produce an empty row.
pub fn tokenize_sheet(text: &str) -> Vec<Row> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    trimmed
        .split('\n')
        .map(|line| tokenize_line(line.strip_suffix('\r').unwrap_or(line)))
        .collect()
}

// Brazilian number and date handling. These never fail; unusable input maps
// to 0 or None and the owning row decides whether to drop itself.
pub mod brazilian_format {
    use once_cell::sync::Lazy;
    use regex::Regex;
    use shared::models::CalendarDate;

    static FULL_DATE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^[0-9]{2}/[0-9]{2}/[0-9]{4}$").expect("valid date regex"));
    static MONTH_YEAR: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^[0-9]{2}/[0-9]{4}$").expect("valid month regex"));
    static NUMERIC_CODE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^[0-9]+$").expect("valid code regex"));

    // "R$ 1.234,56" -> 1234.56, "1,00 Un" -> 1.0, "" -> 0.0
    pub fn parse_currency(s: &str) -> f64 {
        if s.is_empty() {
            return 0.0;
        }
        let normalized: String = s
            .replacen("R$", "", 1)
            .replace('.', "")
            .replacen(',', ".", 1)
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
            .collect();
        leading_decimal(&normalized).unwrap_or(0.0)
    }

    // Longest prefix of the form -?digits[.digits]; stray '-' or '.' later on
    // terminate the number.
    fn leading_decimal(s: &str) -> Option<f64> {
        let bytes = s.as_bytes();
        let mut end = 0;
        if bytes.first() == Some(&b'-') {
            end = 1;
        }
        let int_start = end;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        let mut digits = end - int_start;
        if end < bytes.len() && bytes[end] == b'.' {
            let frac_start = end + 1;
            let mut frac_end = frac_start;
            while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
                frac_end += 1;
            }
            digits += frac_end - frac_start;
            end = frac_end;
        }
        if digits == 0 {
            return None;
        }
        s[..end]
            .trim_end_matches('.')
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
    }

    // "31/05/2023" -> 31/05/2023. Any zero or non-numeric component -> None.
    pub fn parse_date(s: &str) -> Option<CalendarDate> {
        let mut parts = s.trim().split('/');
        let mut next = || {
            parts
                .next()
                .and_then(|p| p.trim().parse::<u32>().ok())
                .filter(|n| *n > 0)
        };
        let day = next()?;
        let month = next()?;
        let year = next()?;
        Some(CalendarDate::new(day, month, year))
    }

    /// True for "DD/MM/YYYY" or "MM/YYYY"; classifies rows, does not parse them.
    pub fn is_date_row(s: &str) -> bool {
        let s = s.trim();
        FULL_DATE.is_match(s) || MONTH_YEAR.is_match(s)
    }

    pub fn is_numeric_code(s: &str) -> bool {
        NUMERIC_CODE.is_match(s.trim())
    }

    // Leading integer, the way a sale count cell is read: "6" -> 6, "6 vendas" -> 6.
    // Negative or missing counts read as 0.
    pub fn parse_count(s: &str) -> u32 {
        let s = s.trim();
        let digits: String = s
            .strip_prefix('+')
            .unwrap_or(s)
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        digits.parse::<u32>().unwrap_or(0)
    }

}
