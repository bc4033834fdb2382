//! Status page templates
//!
//! The page is assembled from five fragments. Each `{}` in a fragment is
//! replaced, in order, by one value:
//!
//! | Fragment        | Placeholders                              |
//! |-----------------|-------------------------------------------|
//! | `head`          | boot time (s), pressure (hPa), depth (m)  |
//! | `profile_start` | profile number, station-keeping note      |
//! | `row`           | time (s), pressure (hPa), depth (m)       |
//! | `profile_end`   | none                                      |
//! | `foot`          | mission status                            |

use core::fmt::{self, Display, Write};

use crate::profile::PressureReading;

/// Value marker inside a template fragment
pub const PLACEHOLDER: &str = "{}";

/// Template fragment identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TemplatePart {
    Head,
    ProfileStart,
    Row,
    ProfileEnd,
    Foot,
}

impl TemplatePart {
    /// Number of `{}` markers the fragment must contain
    pub const fn placeholders(&self) -> usize {
        match self {
            TemplatePart::Head => 3,
            TemplatePart::ProfileStart => 2,
            TemplatePart::Row => 3,
            TemplatePart::ProfileEnd => 0,
            TemplatePart::Foot => 1,
        }
    }
}

/// Template validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TemplateError {
    /// Required fragment is empty
    Missing(TemplatePart),
    /// Fragment has the wrong number of `{}` markers
    Placeholders {
        part: TemplatePart,
        expected: u8,
        found: u8,
    },
    /// Row values are not separated by literal text, so rows cannot be
    /// read back out of the page
    AmbiguousRow,
}

/// Validated set of page fragments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template<'a> {
    head: &'a str,
    profile_start: &'a str,
    row: &'a str,
    profile_end: &'a str,
    foot: &'a str,
}

impl<'a> Template<'a> {
    /// Validate fragments and build a template
    pub fn new(
        head: &'a str,
        profile_start: &'a str,
        row: &'a str,
        profile_end: &'a str,
        foot: &'a str,
    ) -> Result<Self, TemplateError> {
        let parts = [
            (TemplatePart::Head, head),
            (TemplatePart::ProfileStart, profile_start),
            (TemplatePart::Row, row),
            (TemplatePart::ProfileEnd, profile_end),
            (TemplatePart::Foot, foot),
        ];

        for (part, text) in parts {
            if matches!(part, TemplatePart::Head | TemplatePart::Row) && text.trim().is_empty() {
                return Err(TemplateError::Missing(part));
            }
            let found = text.matches(PLACEHOLDER).count();
            if found != part.placeholders() {
                return Err(TemplateError::Placeholders {
                    part,
                    expected: part.placeholders() as u8,
                    found: found.min(u8::MAX as usize) as u8,
                });
            }
        }

        if row.split(PLACEHOLDER).any(|literal| literal.is_empty()) {
            return Err(TemplateError::AmbiguousRow);
        }

        Ok(Self {
            head,
            profile_start,
            row,
            profile_end,
            foot,
        })
    }

    pub fn head(&self) -> &'a str {
        self.head
    }

    pub fn profile_start(&self) -> &'a str {
        self.profile_start
    }

    pub fn row(&self) -> &'a str {
        self.row
    }

    pub fn profile_end(&self) -> &'a str {
        self.profile_end
    }

    pub fn foot(&self) -> &'a str {
        self.foot
    }

    /// Read data rows back out of a page rendered with this template
    pub fn parse_rows<'m>(&self, markup: &'m str) -> RowParser<'a, 'm> {
        RowParser {
            row: self.row,
            rest: markup,
        }
    }
}

/// Write `pattern` with each `{}` replaced by the next value
pub fn fill<W: Write>(out: &mut W, pattern: &str, values: &[&dyn Display]) -> fmt::Result {
    let mut values = values.iter();
    let mut pieces = pattern.split(PLACEHOLDER).peekable();
    while let Some(piece) = pieces.next() {
        out.write_str(piece)?;
        if pieces.peek().is_some() {
            match values.next() {
                Some(value) => write!(out, "{}", value)?,
                None => return Err(fmt::Error),
            }
        }
    }
    Ok(())
}

/// Errors reading a data row back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RowParseError {
    /// Row started but a separator was not found
    Truncated,
    /// A field did not parse as a number
    InvalidField,
}

/// Iterator over the data rows of a rendered page
pub struct RowParser<'a, 'm> {
    row: &'a str,
    rest: &'m str,
}

impl<'a, 'm> RowParser<'a, 'm> {
    fn next_row(&mut self) -> Option<Result<PressureReading, RowParseError>> {
        let mut literals = self.row.split(PLACEHOLDER);
        let prefix = literals.next()?;

        let start = self.rest.find(prefix)?;
        let mut cursor = &self.rest[start + prefix.len()..];

        let mut fields: [&str; 3] = [""; 3];
        for field in fields.iter_mut() {
            let Some(separator) = literals.next() else {
                self.rest = "";
                return Some(Err(RowParseError::Truncated));
            };
            let Some(end) = cursor.find(separator) else {
                self.rest = "";
                return Some(Err(RowParseError::Truncated));
            };
            *field = cursor[..end].trim();
            cursor = &cursor[end + separator.len()..];
        }
        self.rest = cursor;

        Some(parse_fields(fields))
    }
}

impl<'a, 'm> Iterator for RowParser<'a, 'm> {
    type Item = Result<PressureReading, RowParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_row()
    }
}

fn parse_fields(fields: [&str; 3]) -> Result<PressureReading, RowParseError> {
    let elapsed_ms = parse_seconds(fields[0]).ok_or(RowParseError::InvalidField)?;
    let pressure_hpa = fields[1]
        .parse::<f32>()
        .map_err(|_| RowParseError::InvalidField)?;
    let depth_m = fields[2]
        .parse::<f32>()
        .map_err(|_| RowParseError::InvalidField)?;
    Ok(PressureReading {
        elapsed_ms,
        pressure_hpa,
        depth_m,
    })
}

/// Parse `s.mmm` seconds back to milliseconds
fn parse_seconds(text: &str) -> Option<u32> {
    let (whole, frac) = text.split_once('.').unwrap_or((text, "000"));
    if frac.len() != 3 {
        return None;
    }
    let whole: u32 = whole.parse().ok()?;
    let frac: u32 = frac.parse().ok()?;
    whole.checked_mul(1000)?.checked_add(frac)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROW: &str = "<tr class=\"sample\"><td>{}</td><td>{}</td><td>{}</td></tr>";

    fn template() -> Template<'static> {
        Template::new(
            "<h1>Float</h1><p>{} s, {} hPa, {} m</p>",
            "<h2>Profile {}</h2><p>{}</p><table>",
            ROW,
            "</table>",
            "<p>Status: {}</p>",
        )
        .unwrap()
    }

    #[test]
    fn test_valid_template() {
        let t = template();
        assert_eq!(t.row(), ROW);
        assert_eq!(t.profile_end(), "</table>");
    }

    #[test]
    fn test_missing_head() {
        let result = Template::new("", "{}{}", ROW, "", "{}");
        assert_eq!(result, Err(TemplateError::Missing(TemplatePart::Head)));
    }

    #[test]
    fn test_wrong_placeholder_count() {
        let result = Template::new("{} {}", "{} {}", ROW, "", "{}");
        assert_eq!(
            result,
            Err(TemplateError::Placeholders {
                part: TemplatePart::Head,
                expected: 3,
                found: 2,
            })
        );
    }

    #[test]
    fn test_ambiguous_row() {
        let result = Template::new("{}{}{}", "{}{}", "<td>{}{}</td><td>{}</td>", "", "{}");
        assert_eq!(result, Err(TemplateError::AmbiguousRow));
    }

    #[test]
    fn test_fill() {
        let mut out: heapless::String<64> = heapless::String::new();
        fill(&mut out, "a={} b={}!", &[&1, &"two"]).unwrap();
        assert_eq!(out.as_str(), "a=1 b=two!");
    }

    #[test]
    fn test_fill_too_few_values() {
        let mut out: heapless::String<64> = heapless::String::new();
        assert!(fill(&mut out, "{} {}", &[&1]).is_err());
    }

    #[test]
    fn test_parse_rows() {
        let markup = "<h1>x</h1>\
            <tr class=\"sample\"><td>0.000</td><td>101.33</td><td>0.00</td></tr>\
            <tr class=\"sample\"><td>5.250</td><td>125.90</td><td>2.51</td></tr>";

        let mut rows = template().parse_rows(markup);
        let first = rows.next().unwrap().unwrap();
        assert_eq!(first.elapsed_ms, 0);
        assert!((first.pressure_hpa - 101.33).abs() < 1e-4);

        let second = rows.next().unwrap().unwrap();
        assert_eq!(second.elapsed_ms, 5_250);
        assert!((second.depth_m - 2.51).abs() < 1e-4);

        assert!(rows.next().is_none());
    }

    #[test]
    fn test_parse_truncated_row() {
        let markup = "<tr class=\"sample\"><td>0.000</td><td>101.33";
        let mut rows = template().parse_rows(markup);
        assert_eq!(rows.next(), Some(Err(RowParseError::Truncated)));
        assert!(rows.next().is_none());
    }

    #[test]
    fn test_parse_invalid_field() {
        let markup = "<tr class=\"sample\"><td>soon</td><td>101.33</td><td>0.00</td></tr>";
        let mut rows = template().parse_rows(markup);
        assert_eq!(rows.next(), Some(Err(RowParseError::InvalidField)));
    }

    #[test]
    fn test_parse_seconds() {
        assert_eq!(parse_seconds("12.345"), Some(12_345));
        assert_eq!(parse_seconds("7"), Some(7_000));
        assert_eq!(parse_seconds("1.5"), None);
    }
}
