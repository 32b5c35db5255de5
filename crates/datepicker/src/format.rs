//! Token based date formatting and parsing.
//!
//! A format string such as `dd-MM-yyyy HH:mm` is a sequence of tokens
//! separated by runs of non-letter characters. The recognized tokens are
//! `dd`, `MM`, `yyyy`, `HH`, `mm`, `ss` and `S`. Anything else is carried
//! through verbatim by [`format`] and skipped by [`parse`].

use crate::error::ParseError;
use crate::value::CalendarValue;

/// A calendar field named by a format token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatToken {
    Day,
    Month,
    Year,
    Hour,
    Minute,
    Second,
    Millisecond,
}

impl FormatToken {
    /// Match order used when scanning a format string.
    const SCAN_ORDER: [FormatToken; 7] = [
        FormatToken::Day,
        FormatToken::Month,
        FormatToken::Year,
        FormatToken::Hour,
        FormatToken::Minute,
        FormatToken::Second,
        FormatToken::Millisecond,
    ];

    pub fn pattern(self) -> &'static str {
        match self {
            FormatToken::Day => "dd",
            FormatToken::Month => "MM",
            FormatToken::Year => "yyyy",
            FormatToken::Hour => "HH",
            FormatToken::Minute => "mm",
            FormatToken::Second => "ss",
            FormatToken::Millisecond => "S",
        }
    }

    pub fn from_pattern(pattern: &str) -> Option<Self> {
        Self::SCAN_ORDER
            .into_iter()
            .find(|token| token.pattern() == pattern)
    }

    fn match_prefix(text: &str) -> Option<Self> {
        Self::SCAN_ORDER
            .into_iter()
            .find(|token| text.starts_with(token.pattern()))
    }

    fn render(self, value: &CalendarValue) -> String {
        match self {
            FormatToken::Day => format!("{:02}", value.day()),
            FormatToken::Month => format!("{:02}", value.month() + 1),
            FormatToken::Year => value.year().to_string(),
            FormatToken::Hour => format!("{:02}", value.hour()),
            FormatToken::Minute => format!("{:02}", value.minute()),
            FormatToken::Second => format!("{:02}", value.second()),
            FormatToken::Millisecond => value.millisecond().to_string(),
        }
    }
}

/// The ordered token list of a format string.
///
/// Each entry is `None` when the letters at that position are not a
/// recognized token. Those positions still consume a numeric field on parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatSpec {
    tokens: Vec<Option<FormatToken>>,
}

impl FormatSpec {
    pub fn new(format: &str) -> Self {
        let tokens = format
            .split(|c: char| !c.is_ascii_alphabetic())
            .filter(|piece| !piece.is_empty())
            .map(FormatToken::from_pattern)
            .collect();

        Self { tokens }
    }

    pub fn tokens(&self) -> &[Option<FormatToken>] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// True if any recognized token is a time-of-day field.
    pub fn has_time(&self) -> bool {
        self.tokens.iter().flatten().any(|token| {
            matches!(
                token,
                FormatToken::Hour
                    | FormatToken::Minute
                    | FormatToken::Second
                    | FormatToken::Millisecond
            )
        })
    }
}

/// Reads `text` against `format`.
///
/// The i-th numeric run in `text` is paired with the i-th token of the
/// format. The two counts must match exactly. Year, month and day are
/// required; time fields missing from the format are zero.
pub fn parse(text: &str, format: &str) -> Result<CalendarValue, ParseError> {
    let spec = FormatSpec::new(format);
    let fields: Vec<&str> = text
        .split(|c: char| !c.is_ascii_digit())
        .filter(|field| !field.is_empty())
        .collect();

    if fields.len() != spec.len() {
        return Err(ParseError::FieldCountMismatch {
            expected: spec.len(),
            found: fields.len(),
        });
    }

    let mut year = None;
    let mut month = None;
    let mut day = None;
    let (mut hour, mut minute, mut second, mut millisecond) = (0, 0, 0, 0);

    for (token, field) in spec.tokens().iter().zip(fields) {
        let Some(token) = token else {
            continue;
        };

        let number: i32 = field
            .parse()
            .map_err(|_| ParseError::InvalidNumber(field.to_owned()))?;

        match token {
            FormatToken::Day => day = Some(number),
            FormatToken::Month => month = Some(number - 1),
            FormatToken::Year => year = Some(number),
            FormatToken::Hour => hour = number,
            FormatToken::Minute => minute = number,
            FormatToken::Second => second = number,
            FormatToken::Millisecond => millisecond = number,
        }
    }

    let year = year.ok_or(ParseError::MissingField("year"))?;
    let month = month.ok_or(ParseError::MissingField("month"))?;
    let day = day.ok_or(ParseError::MissingField("day"))?;

    CalendarValue::from_parts(year, month, day, hour, minute, second, millisecond)
        .ok_or(ParseError::OutOfRange)
}

/// Writes `value` using `format`, replacing every recognized token and
/// copying everything else as-is.
pub fn format(value: &CalendarValue, format: &str) -> String {
    let mut out = String::with_capacity(format.len() + 4);
    let mut rest = format;

    loop {
        if let Some(token) = FormatToken::match_prefix(rest) {
            out.push_str(&token.render(value));
            rest = &rest[token.pattern().len()..];
            continue;
        }

        let mut chars = rest.chars();
        let Some(c) = chars.next() else {
            break;
        };
        out.push(c);
        rest = chars.as_str();
    }

    out
}
