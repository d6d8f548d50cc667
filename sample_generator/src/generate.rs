use crate::restriction_generator::RestrictionGenerator;
use crate::schema_model::{SimpleType, SimpleVariety};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use fake::{Fake, Faker};
use log::debug;
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;
use std::collections::HashMap;

/// Content written for elements matched by a wildcard or typed `xs:anyType`
pub const ANY_TYPE_VALUE: &str = "anyType";
/// Content written for attributes matched by an attribute wildcard
pub const ANY_SIMPLE_TYPE_VALUE: &str = "anySimpleType";

const SAMPLE_SPAN: i128 = 1000;
const MAX_PATTERN_REPEAT: u32 = 8;
const DEFAULT_FRACTION_DIGITS: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueKind {
    /// Wildcard element or `xs:anyType` content
    Any,
    /// Wildcard attribute content
    AnySimple,
    Simple(SimpleType),
}

/// Produces the lexical value of an element or attribute with simple content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueGenerator {
    pub kind: ValueKind,
    /// Prefix of generated strings, usually the owner's local name
    pub label: Option<String>,
    /// Number of items generated for list datatypes
    pub list_length: usize,
}

impl ValueGenerator {
    pub(crate) fn any_content() -> Self {
        ValueGenerator {
            kind: ValueKind::Any,
            label: None,
            list_length: 1,
        }
    }

    pub(crate) fn any_simple_content() -> Self {
        ValueGenerator {
            kind: ValueKind::AnySimple,
            label: None,
            list_length: 1,
        }
    }

    pub(crate) fn simple(simple_type: SimpleType, list_length: usize) -> Self {
        ValueGenerator {
            kind: ValueKind::Simple(simple_type),
            label: None,
            list_length,
        }
    }

    pub(crate) fn with_label(mut self, label: &str) -> Self {
        if self.label.is_none() {
            self.label = Some(label.to_string());
        }

        self
    }
}

/// Per-run source of sample values
///
/// All randomness comes from one seeded generator and counters are kept per
/// label, so two factories with the same seed produce the same sequence.
pub(crate) struct ValueFactory {
    rng: XorShiftRng,
    counters: HashMap<String, usize>,
}

impl ValueFactory {
    pub(crate) fn new(seed: u64) -> Self {
        ValueFactory {
            rng: XorShiftRng::seed_from_u64(seed),
            counters: HashMap::new(),
        }
    }

    pub(crate) fn generate(&mut self, generator: &ValueGenerator) -> String {
        match &generator.kind {
            ValueKind::Any => ANY_TYPE_VALUE.to_string(),
            ValueKind::AnySimple => ANY_SIMPLE_TYPE_VALUE.to_string(),
            ValueKind::Simple(simple_type) => {
                let label = generator.label.as_deref().unwrap_or("value");
                self.simple_value(simple_type, label, generator.list_length)
            }
        }
    }

    fn next_count(&mut self, key: &str) -> usize {
        let counter = self.counters.entry(key.to_string()).or_insert(0);
        *counter += 1;
        *counter
    }

    fn simple_value(&mut self, simple_type: &SimpleType, label: &str, list_length: usize) -> String {
        let facets = &simple_type.facets;
        if !facets.enumerations.is_empty() {
            let key = format!("{}\u{0}{}", label, facets.enumerations.join("\u{0}"));
            let position = self.next_count(&key) - 1;
            return facets.enumerations[position % facets.enumerations.len()].clone();
        }

        match &simple_type.variety {
            SimpleVariety::List(item) => {
                let count = match facets.length {
                    Some(length) => length,
                    None => {
                        let count = list_length.max(facets.min_length.unwrap_or(0));
                        facets.max_length.map_or(count, |max| count.min(max))
                    }
                };

                (0..count)
                    .map(|_| self.simple_value(item, label, list_length))
                    .collect::<Vec<String>>()
                    .join(" ")
            }
            SimpleVariety::Union(members) => match members.first() {
                Some(member) => self.simple_value(member, label, list_length),
                None => self.string_value(label, facets),
            },
            SimpleVariety::Atomic => self.atomic_value(simple_type, label),
        }
    }

    fn atomic_value(&mut self, simple_type: &SimpleType, label: &str) -> String {
        let facets = &simple_type.facets;
        if let Some(pattern) = facets.patterns.first() {
            match rand_regex::Regex::compile(pattern, MAX_PATTERN_REPEAT) {
                Ok(regex) => return self.rng.sample::<String, _>(&regex),
                Err(err) => debug!("Pattern '{}' cannot be sampled: {}", pattern, err),
            }
        }

        match simple_type.builtin.as_str() {
            "boolean" => Faker.fake_with_rng::<bool, _>(&mut self.rng).to_string(),
            "decimal" => self.decimal_value(facets),
            "float" | "double" => self.float_value(facets),
            "integer" | "nonPositiveInteger" | "negativeInteger" | "nonNegativeInteger"
            | "positiveInteger" | "long" | "int" | "short" | "byte" | "unsignedLong"
            | "unsignedInt" | "unsignedShort" | "unsignedByte" => {
                self.integer_value(&simple_type.builtin, facets)
            }
            "dateTime" => format!("{}T{}", self.date(), self.time()),
            "dateTimeStamp" => format!("{}T{}Z", self.date(), self.time()),
            "date" => self.date(),
            "time" => self.time(),
            "gYearMonth" => {
                let year = self.rng.random_range(2000..=2030);
                let month = self.rng.random_range(1..=12);
                format!("{:04}-{:02}", year, month)
            }
            "gYear" => format!("{:04}", self.rng.random_range(2000..=2030)),
            "gMonthDay" => {
                let month = self.rng.random_range(1..=12);
                let day = self.rng.random_range(1..=28);
                format!("--{:02}-{:02}", month, day)
            }
            "gDay" => format!("---{:02}", self.rng.random_range(1..=28)),
            "gMonth" => format!("--{:02}", self.rng.random_range(1..=12)),
            "duration" => {
                let years = self.rng.random_range(0..5);
                let months = self.rng.random_range(0..12);
                let days = self.rng.random_range(0..28);
                let hours = self.rng.random_range(0..24);
                format!("P{}Y{}M{}DT{}H", years, months, days, hours)
            }
            "dayTimeDuration" => {
                let days = self.rng.random_range(0..28);
                let hours = self.rng.random_range(0..24);
                let minutes = self.rng.random_range(0..60);
                format!("P{}DT{}H{}M", days, hours, minutes)
            }
            "yearMonthDuration" => {
                let years = self.rng.random_range(0..5);
                let months = self.rng.random_range(0..12);
                format!("P{}Y{}M", years, months)
            }
            "hexBinary" => {
                let bytes = self.random_bytes(facets);
                bytes.iter().map(|byte| format!("{:02X}", byte)).collect()
            }
            "base64Binary" => {
                let bytes = self.random_bytes(facets);
                STANDARD.encode(bytes)
            }
            "anyURI" => {
                let count = self.next_count(label);
                format!("http://example.com/{}{}", label, count)
            }
            "language" => "en".to_string(),
            _ => self.string_value(label, facets),
        }
    }

    fn string_value(&mut self, label: &str, facets: &RestrictionGenerator) -> String {
        let count = self.next_count(label);
        let value = format!("{}{}", label, count);

        let (min_length, max_length) = match facets.length {
            Some(length) => (length, Some(length)),
            None => (facets.min_length.unwrap_or(0), facets.max_length),
        };

        let mut characters: Vec<char> = value.chars().collect();
        if let Some(max_length) = max_length {
            characters.truncate(max_length);
        }
        while characters.len() < min_length {
            characters.push('x');
        }

        characters.into_iter().collect()
    }

    fn random_bytes(&mut self, facets: &RestrictionGenerator) -> Vec<u8> {
        let count = facets
            .length
            .or(facets.min_length)
            .unwrap_or(4)
            .min(facets.max_length.unwrap_or(usize::MAX));

        (0..count).map(|_| self.rng.random::<u8>()).collect()
    }

    fn date(&mut self) -> String {
        let year = self.rng.random_range(2000..=2030);
        let month = self.rng.random_range(1..=12);
        let day = self.rng.random_range(1..=28);
        format!("{:04}-{:02}-{:02}", year, month, day)
    }

    fn time(&mut self) -> String {
        let hour = self.rng.random_range(0..24);
        let minute = self.rng.random_range(0..60);
        let second = self.rng.random_range(0..60);
        format!("{:02}:{:02}:{:02}", hour, minute, second)
    }

    /// Draw an integer inside the bounds, preferring values close to zero
    fn draw_integer(&mut self, lower: Option<i128>, upper: Option<i128>) -> i128 {
        let low = lower.unwrap_or(i128::MIN);
        let high = upper.unwrap_or(i128::MAX);
        if low >= high {
            return low;
        }

        let window_low = low.max(-SAMPLE_SPAN);
        let window_high = high.min(SAMPLE_SPAN);
        let (low, high) = if window_low <= window_high {
            (window_low, window_high)
        } else if low > SAMPLE_SPAN {
            (low, high.min(low.saturating_add(SAMPLE_SPAN)))
        } else {
            (low.max(high.saturating_sub(SAMPLE_SPAN)), high)
        };

        (low..=high).fake_with_rng::<i128, _>(&mut self.rng)
    }

    fn integer_value(&mut self, builtin: &str, facets: &RestrictionGenerator) -> String {
        let (builtin_lower, builtin_upper) = integer_range(builtin);
        let parse = |value: &str| value.trim().parse::<i128>().ok();

        let mut lower = max_option(builtin_lower, facets.lower_bound(parse, |value| value + 1));
        let mut upper = min_option(builtin_upper, facets.upper_bound(parse, |value| value - 1));
        if let Some(total_digits) = facets.total_digits {
            let limit = digits_limit(total_digits);
            lower = max_option(lower, Some(-limit));
            upper = min_option(upper, Some(limit));
        }

        self.draw_integer(lower, upper).to_string()
    }

    fn decimal_value(&mut self, facets: &RestrictionGenerator) -> String {
        let mut fraction_digits = facets.fraction_digits.unwrap_or(DEFAULT_FRACTION_DIGITS).min(18);
        if let Some(total_digits) = facets.total_digits {
            fraction_digits = fraction_digits.min(total_digits);
        }

        let scale = 10i128.pow(fraction_digits as u32);
        let scaled = |value: &str| {
            value
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .map(|value| value * scale as f64)
        };

        let mut lower = facets.lower_bound(
            |value| scaled(value).map(|value| value.ceil() as i128),
            |value| value + 1,
        );
        let mut upper = facets.upper_bound(
            |value| scaled(value).map(|value| value.floor() as i128),
            |value| value - 1,
        );
        if let Some(total_digits) = facets.total_digits {
            let limit = digits_limit(total_digits);
            lower = max_option(lower, Some(-limit));
            upper = min_option(upper, Some(limit));
        }

        // Without explicit bounds keep the sample within the usual integer window
        if lower.is_none() && upper.is_none() {
            lower = Some(-SAMPLE_SPAN * scale);
            upper = Some(SAMPLE_SPAN * scale);
        }

        let value = self.draw_integer(lower, upper);
        let sign = if value < 0 { "-" } else { "" };
        let integer_part = value.abs() / scale;
        if fraction_digits == 0 {
            return format!("{}{}", sign, integer_part);
        }

        format!(
            "{}{}.{:0width$}",
            sign,
            integer_part,
            value.abs() % scale,
            width = fraction_digits
        )
    }

    fn float_value(&mut self, facets: &RestrictionGenerator) -> String {
        // INF, -INF and NaN bounds leave that side open
        let parse = |value: &str| {
            value
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
        };
        let lower = facets.lower_bound(parse, |value| value);
        let upper = facets.upper_bound(parse, |value| value);
        let (lower, upper) = match (lower, upper) {
            (Some(lower), Some(upper)) => (lower, upper),
            (Some(lower), None) => (lower, lower.max(0.0) + SAMPLE_SPAN as f64),
            (None, Some(upper)) => (upper.min(0.0) - SAMPLE_SPAN as f64, upper),
            (None, None) => (-(SAMPLE_SPAN as f64), SAMPLE_SPAN as f64),
        };
        if lower >= upper {
            return lower.to_string();
        }

        let value = (lower..upper).fake_with_rng::<f64, _>(&mut self.rng);
        format!("{:.3}", value)
    }
}

fn integer_range(builtin: &str) -> (Option<i128>, Option<i128>) {
    match builtin {
        "nonPositiveInteger" => (None, Some(0)),
        "negativeInteger" => (None, Some(-1)),
        "nonNegativeInteger" => (Some(0), None),
        "positiveInteger" => (Some(1), None),
        "long" => (Some(i64::MIN as i128), Some(i64::MAX as i128)),
        "int" => (Some(i32::MIN as i128), Some(i32::MAX as i128)),
        "short" => (Some(i16::MIN as i128), Some(i16::MAX as i128)),
        "byte" => (Some(i8::MIN as i128), Some(i8::MAX as i128)),
        "unsignedLong" => (Some(0), Some(u64::MAX as i128)),
        "unsignedInt" => (Some(0), Some(u32::MAX as i128)),
        "unsignedShort" => (Some(0), Some(u16::MAX as i128)),
        "unsignedByte" => (Some(0), Some(u8::MAX as i128)),
        _ => (None, None),
    }
}

fn digits_limit(total_digits: usize) -> i128 {
    10i128.pow(total_digits.min(30) as u32) - 1
}

fn max_option(first: Option<i128>, second: Option<i128>) -> Option<i128> {
    match (first, second) {
        (Some(first), Some(second)) => Some(first.max(second)),
        (first, second) => first.or(second),
    }
}

fn min_option(first: Option<i128>, second: Option<i128>) -> Option<i128> {
    match (first, second) {
        (Some(first), Some(second)) => Some(first.min(second)),
        (first, second) => first.or(second),
    }
}
