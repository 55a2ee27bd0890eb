use std::collections::BTreeMap;
use std::fmt;

/// The travel attributes gathered before an itinerary can be built.
///
/// Declaration order is the fixed enumeration order used everywhere the
/// fields are listed (clarifications, prompts, `/prefs`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Destination,
    Dates,
    Budget,
    Purpose,
    Preferences,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Destination,
        Field::Dates,
        Field::Budget,
        Field::Purpose,
        Field::Preferences,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Destination => "destination",
            Field::Dates => "dates",
            Field::Budget => "budget",
            Field::Purpose => "purpose",
            Field::Preferences => "preferences",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Preferences collected so far in one conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreferenceSet {
    values: BTreeMap<Field, String>,
}

impl PreferenceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite entries with every non-blank extracted value, stored as-is.
    ///
    /// Blank values never clear an existing entry.
    pub fn merge<I, S>(&mut self, extracted: I)
    where
        I: IntoIterator<Item = (Field, S)>,
        S: Into<String>,
    {
        for (field, value) in extracted {
            let value = value.into();
            if value.trim().is_empty() {
                continue;
            }
            self.values.insert(field, value);
        }
    }

    pub fn missing_fields(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|field| !self.values.contains_key(field))
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.values.iter().map(|(field, value)| (*field, value.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// `field: value` lines in field order, as embedded in prompts.
    pub fn format(&self) -> String {
        self.iter()
            .map(|(field, value)| format!("{}: {}", field, value))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_set() -> PreferenceSet {
        let mut prefs = PreferenceSet::new();
        prefs.merge([
            (Field::Destination, "Kyoto"),
            (Field::Dates, "April 3-10"),
            (Field::Budget, "$3000"),
            (Field::Purpose, "honeymoon"),
            (Field::Preferences, "temples, ramen"),
        ]);
        prefs
    }

    #[test]
    fn test_new_set_is_missing_everything_in_order() {
        let prefs = PreferenceSet::new();
        assert_eq!(prefs.missing_fields(), Field::ALL.to_vec());
        assert!(prefs.is_empty());
    }

    #[test]
    fn test_complete_once_all_fields_set() {
        let prefs = full_set();
        assert!(prefs.missing_fields().is_empty());
        assert!(prefs.is_complete());
    }

    #[test]
    fn test_incremental_merges_reach_completion() {
        let mut prefs = PreferenceSet::new();
        for (i, field) in Field::ALL.into_iter().enumerate() {
            assert_eq!(prefs.missing_fields().len(), 5 - i);
            assert!(!prefs.is_complete());
            prefs.merge([(field, "something")]);
        }
        assert!(prefs.is_complete());
    }

    #[test]
    fn test_empty_value_never_clears() {
        let mut prefs = PreferenceSet::new();
        prefs.merge([(Field::Budget, "$500")]);
        prefs.merge([(Field::Budget, ""), (Field::Destination, "   ")]);

        assert_eq!(prefs.get(Field::Budget), Some("$500"));
        assert_eq!(prefs.get(Field::Destination), None);
        assert!(prefs.missing_fields().contains(&Field::Destination));
    }

    #[test]
    fn test_later_value_overwrites() {
        let mut prefs = PreferenceSet::new();
        prefs.merge([(Field::Destination, "Paris")]);
        prefs.merge([(Field::Destination, "Lisbon")]);
        assert_eq!(prefs.get(Field::Destination), Some("Lisbon"));
    }

    #[test]
    fn test_values_stored_verbatim() {
        let mut prefs = PreferenceSet::new();
        prefs.merge([(Field::Purpose, "  rest and recharge ")]);
        assert_eq!(prefs.get(Field::Purpose), Some("  rest and recharge "));
    }

    #[test]
    fn test_missing_fields_keep_fixed_order() {
        let mut prefs = PreferenceSet::new();
        prefs.merge([
            (Field::Preferences, "hiking"),
            (Field::Destination, "Patagonia"),
            (Field::Dates, "January"),
        ]);
        assert_eq!(prefs.missing_fields(), vec![Field::Budget, Field::Purpose]);
    }

    #[test]
    fn test_format_uses_field_order() {
        let mut prefs = PreferenceSet::new();
        prefs.merge([(Field::Budget, "$3000"), (Field::Destination, "Kyoto")]);
        assert_eq!(prefs.format(), "destination: Kyoto\nbudget: $3000");
    }

    #[test]
    fn test_clear() {
        let mut prefs = full_set();
        prefs.clear();
        assert!(prefs.is_empty());
        assert_eq!(prefs.missing_fields().len(), 5);
    }
}
