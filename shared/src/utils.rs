// Brazilian number formatting helpers shared by the engine and any front end.

pub mod brazilian_format {
    /// A report cell before normalization: text as read from the CSV, or an
    /// already-numeric value.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub enum RawAmount<'a> {
        Text(&'a str),
        Number(f64),
    }

    impl<'a> From<&'a str> for RawAmount<'a> {
        fn from(s: &'a str) -> Self {
            RawAmount::Text(s)
        }
    }

    impl<'a> From<&'a String> for RawAmount<'a> {
        fn from(s: &'a String) -> Self {
            RawAmount::Text(s.as_str())
        }
    }

    impl From<f64> for RawAmount<'_> {
        fn from(n: f64) -> Self {
            RawAmount::Number(n)
        }
    }

    /// Parses amounts like "R$ 1.234,56" into f64.
    ///
    /// Never fails: anything unparseable becomes 0 so a single corrupt cell
    /// cannot take down the whole report.
    pub fn parse_monetary<'a>(raw: impl Into<RawAmount<'a>>) -> f64 {
        let value = match raw.into() {
            RawAmount::Number(n) => n,
            RawAmount::Text(s) => {
                let cleaned: String = s
                    .replace("R$", "")
                    .chars()
                    .filter(|c| !c.is_whitespace() && *c != '.')
                    .collect();
                // Only the first comma is the decimal separator.
                let normalized = cleaned.replacen(',', ".", 1);
                leading_float(&normalized).unwrap_or(0.0)
            }
        };
        if value.is_finite() {
            value
        } else {
            0.0
        }
    }

    // Longest prefix that reads as a decimal number ("12.5abc" -> 12.5).
    fn leading_float(s: &str) -> Option<f64> {
        let bytes = s.as_bytes();
        let mut i = 0;
        let mut normalized = String::new();

        if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
            if bytes[0] == b'-' {
                normalized.push('-');
            }
            i += 1;
        }

        let int_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        let int_part = &s[int_start..i];

        let mut frac_part = "";
        if i < bytes.len() && bytes[i] == b'.' {
            let frac_start = i + 1;
            let mut j = frac_start;
            while j < bytes.len() && bytes[j].is_ascii_digit() {
                j += 1;
            }
            frac_part = &s[frac_start..j];
            i = j;
        }

        if int_part.is_empty() && frac_part.is_empty() {
            return None;
        }

        normalized.push_str(if int_part.is_empty() { "0" } else { int_part });
        normalized.push('.');
        normalized.push_str(if frac_part.is_empty() { "0" } else { frac_part });

        if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
            let mut j = i + 1;
            let mut exponent = String::from("e");
            if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
                exponent.push(bytes[j] as char);
                j += 1;
            }
            let digits_start = j;
            while j < bytes.len() && bytes[j].is_ascii_digit() {
                j += 1;
            }
            if j > digits_start {
                exponent.push_str(&s[digits_start..j]);
                normalized.push_str(&exponent);
            }
        }

        normalized.parse::<f64>().ok()
    }

    /// Formats a value as Brazilian currency: `R$ 1.234,56`.
    pub fn format_currency(value: f64) -> String {
        let rounded = format!("{:.2}", value.abs());
        let (int_part, frac_part) = rounded.split_once('.').unwrap_or((rounded.as_str(), "00"));
        let negative = value < 0.0 && rounded != "0.00";

        let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
        for (idx, ch) in int_part.chars().enumerate() {
            if idx > 0 && (int_part.len() - idx) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(ch);
        }

        format!("{}R$ {},{}", if negative { "-" } else { "" }, grouped, frac_part)
    }

}
