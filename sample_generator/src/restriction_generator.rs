/// Constraining facets collected along a simple type's restriction chain
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestrictionGenerator {
    pub(crate) enumerations: Vec<String>,
    pub(crate) patterns: Vec<String>,
    pub(crate) length: Option<usize>,
    pub(crate) min_length: Option<usize>,
    pub(crate) max_length: Option<usize>,
    pub(crate) min_inclusive: Option<String>,
    pub(crate) max_inclusive: Option<String>,
    pub(crate) min_exclusive: Option<String>,
    pub(crate) max_exclusive: Option<String>,
    pub(crate) total_digits: Option<usize>,
    pub(crate) fraction_digits: Option<usize>,
}

impl RestrictionGenerator {
    pub(crate) fn new() -> RestrictionGenerator {
        RestrictionGenerator::default()
    }

    /// Record a facet by its XSD element name. Returns false for facets that
    /// have no influence on generated values (whiteSpace, assertion, ...).
    pub(crate) fn add_facet(&mut self, facet: &str, value: &str) -> bool {
        let value = value.trim();
        match facet {
            "enumeration" => self.enumerations.push(value.to_string()),
            "pattern" => self.patterns.push(value.to_string()),
            "length" => self.length = value.parse().ok(),
            "minLength" => self.min_length = value.parse().ok(),
            "maxLength" => self.max_length = value.parse().ok(),
            "minInclusive" => self.min_inclusive = Some(value.to_string()),
            "maxInclusive" => self.max_inclusive = Some(value.to_string()),
            "minExclusive" => self.min_exclusive = Some(value.to_string()),
            "maxExclusive" => self.max_exclusive = Some(value.to_string()),
            "totalDigits" => self.total_digits = value.parse().ok(),
            "fractionDigits" => self.fraction_digits = value.parse().ok(),
            _ => return false,
        }

        true
    }

    /// Facets of a type derived by restriction from `self`; anything the
    /// derived step sets replaces the inherited value.
    pub(crate) fn restrict(&self, derived: &RestrictionGenerator) -> RestrictionGenerator {
        fn pick<T: Clone>(derived: &Option<T>, base: &Option<T>) -> Option<T> {
            derived.clone().or_else(|| base.clone())
        }

        RestrictionGenerator {
            enumerations: if derived.enumerations.is_empty() {
                self.enumerations.clone()
            } else {
                derived.enumerations.clone()
            },
            patterns: if derived.patterns.is_empty() {
                self.patterns.clone()
            } else {
                derived.patterns.clone()
            },
            length: pick(&derived.length, &self.length),
            min_length: pick(&derived.min_length, &self.min_length),
            max_length: pick(&derived.max_length, &self.max_length),
            min_inclusive: pick(&derived.min_inclusive, &self.min_inclusive),
            max_inclusive: pick(&derived.max_inclusive, &self.max_inclusive),
            min_exclusive: pick(&derived.min_exclusive, &self.min_exclusive),
            max_exclusive: pick(&derived.max_exclusive, &self.max_exclusive),
            total_digits: pick(&derived.total_digits, &self.total_digits),
            fraction_digits: pick(&derived.fraction_digits, &self.fraction_digits),
        }
    }

    /// Inclusive lower bound, if any, parsed with `parse`
    pub(crate) fn lower_bound<T>(&self, parse: impl Fn(&str) -> Option<T>, step: impl Fn(T) -> T) -> Option<T> {
        if let Some(value) = self.min_inclusive.as_deref().and_then(&parse) {
            return Some(value);
        }

        self.min_exclusive.as_deref().and_then(&parse).map(step)
    }

    /// Inclusive upper bound, if any, parsed with `parse`
    pub(crate) fn upper_bound<T>(&self, parse: impl Fn(&str) -> Option<T>, step: impl Fn(T) -> T) -> Option<T> {
        if let Some(value) = self.max_inclusive.as_deref().and_then(&parse) {
            return Some(value);
        }

        self.max_exclusive.as_deref().and_then(&parse).map(step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_facets_override_base() {
        let mut base = RestrictionGenerator::new();
        base.add_facet("enumeration", "red");
        base.add_facet("enumeration", "green");
        base.add_facet("maxLength", "10");

        let mut derived = RestrictionGenerator::new();
        derived.add_facet("enumeration", "red");
        derived.add_facet("minLength", "2");

        let merged = base.restrict(&derived);
        assert_eq!(merged.enumerations, vec!["red".to_string()]);
        assert_eq!(merged.max_length, Some(10));
        assert_eq!(merged.min_length, Some(2));
    }

    #[test]
    fn exclusive_bounds_are_stepped() {
        let mut facets = RestrictionGenerator::new();
        facets.add_facet("minExclusive", "3");
        facets.add_facet("maxInclusive", "9");

        let parse = |value: &str| value.parse::<i64>().ok();
        assert_eq!(facets.lower_bound(parse, |value| value + 1), Some(4));
        assert_eq!(facets.upper_bound(parse, |value| value - 1), Some(9));
        assert!(!facets.add_facet("whiteSpace", "collapse"));
    }
}
