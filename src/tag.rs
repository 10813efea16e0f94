//! Field tag parsing: the raw tag string and its constraint option language.
//!
//! A member's tag string holds space-separated entries of the form
//! `key:"name,opt1,opt2"`. The key names the transport location (`json`,
//! `form`, `path`, `header`) or a validator; the first comma-separated
//! segment of the value is the wire name; the remaining segments are options.
//! Options are bare markers (`optional`, `omitempty`) or `key=value` pairs
//! (`default=`, `options=a|b|c`, `range=[min:max]`, `example=`).
//!
//! Malformed entries and option values are skipped, never rejected: a broken
//! tag must not abort document generation.

const DEFAULT_OPTION: &str = "default";
const OPTIONS_OPTION: &str = "options";
const RANGE_OPTION: &str = "range";
const EXAMPLE_OPTION: &str = "example";
const OPTIONAL_OPTION: &str = "optional";
const OMITEMPTY_OPTION: &str = "omitempty";
const OPTION_SEPARATOR: char = '|';
const EQUAL_TOKEN: char = '=';

/// Parsed view of one tag entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagSpec {
    /// Tag key: transport location (`json`, `form`, `path`, `header`) or a
    /// validator name
    pub key: String,
    /// First segment of the quoted value, normally the wire name of the field
    pub name: String,
    /// Remaining segments, in order
    pub options: Vec<String>,
}

/// Parse a raw tag string into its entries.
///
/// Entries without a `key:"value"` shape are skipped.
pub fn parse_tag(raw: &str) -> Vec<TagSpec> {
    let mut specs = Vec::new();
    let mut rest = raw.trim();

    while !rest.is_empty() {
        let Some(colon) = rest.find(':') else { break };
        let key = rest[..colon].trim().trim_matches('`');
        let after_key = &rest[colon + 1..];

        let Some(open) = after_key.find('"') else { break };
        let Some(close) = after_key[open + 1..].find('"') else { break };
        let value = &after_key[open + 1..open + 1 + close];
        rest = after_key[open + 1 + close + 1..].trim_start();

        if key.is_empty() {
            continue;
        }

        let mut segments = value.split(',').map(str::trim);
        let name = segments.next().unwrap_or("").to_string();
        let options = segments
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        specs.push(TagSpec {
            key: key.to_string(),
            name,
            options,
        });
    }

    specs
}

/// Validation constraints carried by one tag's option list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagConstraints {
    pub default: Option<String>,
    pub enum_values: Option<Vec<String>>,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub example: Option<String>,
    /// False only when an `optional`/`omitempty` marker is present
    pub required: bool,
}

impl TagConstraints {
    /// Interpret an ordered option list.
    ///
    /// An empty list means the field is required. Unparseable option values
    /// leave the corresponding constraint unset.
    pub fn from_options(options: &[String]) -> Self {
        let mut constraints = TagConstraints {
            required: true,
            ..Default::default()
        };

        for option in options {
            if option.starts_with(OPTIONS_OPTION) {
                // split once; the enumeration itself may contain '='
                if let Some((_, value)) = option.split_once(EQUAL_TOKEN) {
                    constraints.enum_values =
                        Some(value.split(OPTION_SEPARATOR).map(str::to_string).collect());
                }
            }

            if option.starts_with(RANGE_OPTION) {
                if let Some((_, value)) = option.split_once(EQUAL_TOKEN) {
                    if let Some((min, max)) = parse_range_option(value) {
                        constraints.minimum = Some(min);
                        constraints.maximum = Some(max);
                    }
                }
            }

            if option.starts_with(DEFAULT_OPTION) {
                let segments: Vec<&str> = option.split(EQUAL_TOKEN).collect();
                if segments.len() == 2 {
                    constraints.default = Some(segments[1].to_string());
                }
            } else if option.starts_with(OPTIONAL_OPTION) || option.starts_with(OMITEMPTY_OPTION) {
                constraints.required = false;
            }

            if option.starts_with(EXAMPLE_OPTION) {
                let segments: Vec<&str> = option.split(EQUAL_TOKEN).collect();
                if segments.len() == 2 {
                    constraints.example = Some(segments[1].to_string());
                }
            }
        }

        constraints
    }
}

/// Parse a `[min:max]` range value into numeric bounds.
///
/// Each bound is an optional sign, digits, and an optional decimal part.
/// Returns `None` when the value does not match; a reversed range collapses
/// to the single point `min`.
pub fn parse_range_option(value: &str) -> Option<(f64, f64)> {
    let inner = value.strip_prefix('[')?.strip_suffix(']')?;
    let (low, high) = inner.split_once(':')?;
    let min = parse_bound(low)?;
    let max = parse_bound(high)?;

    if max < min {
        return Some((min, min));
    }
    Some((min, max))
}

fn parse_bound(s: &str) -> Option<f64> {
    let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits, None),
    };

    if int_part.is_empty() || !int_part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if let Some(frac) = frac_part {
        if frac.is_empty() || !frac.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
    }

    s.parse().ok()
}
