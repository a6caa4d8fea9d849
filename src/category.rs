use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// The closed set of categories the catalog is laid out around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CanonicalCategory {
    SpiritualDevelopment,
    Relationships,
    PersonalDevelopment,
    WisdomKeys,
    BeyondDatingGame,
    WisdomForLadies,
    Teens,
    UniversityStudents,
}

impl CanonicalCategory {
    /// Display order of the category grid.
    pub const ALL: [CanonicalCategory; 8] = [
        CanonicalCategory::SpiritualDevelopment,
        CanonicalCategory::Relationships,
        CanonicalCategory::PersonalDevelopment,
        CanonicalCategory::WisdomKeys,
        CanonicalCategory::BeyondDatingGame,
        CanonicalCategory::WisdomForLadies,
        CanonicalCategory::Teens,
        CanonicalCategory::UniversityStudents,
    ];

    pub fn id(self) -> &'static str {
        match self {
            CanonicalCategory::SpiritualDevelopment => "spiritual-development",
            CanonicalCategory::Relationships => "relationships",
            CanonicalCategory::PersonalDevelopment => "personal-development",
            CanonicalCategory::WisdomKeys => "wisdom-keys",
            CanonicalCategory::BeyondDatingGame => "beyond-dating-game",
            CanonicalCategory::WisdomForLadies => "wisdom-for-ladies",
            CanonicalCategory::Teens => "teens",
            CanonicalCategory::UniversityStudents => "university-students",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            CanonicalCategory::SpiritualDevelopment => "Spiritual Development",
            CanonicalCategory::Relationships => "Relationships",
            CanonicalCategory::PersonalDevelopment => "Personal Development",
            CanonicalCategory::WisdomKeys => "Wisdom Keys",
            CanonicalCategory::BeyondDatingGame => "Beyond The Dating Game",
            CanonicalCategory::WisdomForLadies => "Wisdom For Ladies",
            CanonicalCategory::Teens => "Teens Podcasts",
            CanonicalCategory::UniversityStudents => "University Students",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.id() == id)
    }
}

impl fmt::Display for CanonicalCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

// legacy and human readable labels found in uploaded content
const BUILTIN_ALIASES: &[(&str, CanonicalCategory)] = &[
    ("spiritual", CanonicalCategory::SpiritualDevelopment),
    ("spiritual growth", CanonicalCategory::SpiritualDevelopment),
    ("spiritual_development", CanonicalCategory::SpiritualDevelopment),
    ("relationship", CanonicalCategory::Relationships),
    ("personal growth", CanonicalCategory::PersonalDevelopment),
    ("personal-growth", CanonicalCategory::PersonalDevelopment),
    ("personal_development", CanonicalCategory::PersonalDevelopment),
    ("wisdom keys", CanonicalCategory::WisdomKeys),
    ("wisdom_keys", CanonicalCategory::WisdomKeys),
    ("beyond the dating game", CanonicalCategory::BeyondDatingGame),
    ("beyond-the-dating-game", CanonicalCategory::BeyondDatingGame),
    ("beyond_dating_game", CanonicalCategory::BeyondDatingGame),
    ("dating", CanonicalCategory::BeyondDatingGame),
    ("wisdom for ladies", CanonicalCategory::WisdomForLadies),
    ("ladies", CanonicalCategory::WisdomForLadies),
    ("women", CanonicalCategory::WisdomForLadies),
    ("teen", CanonicalCategory::Teens),
    ("teenagers", CanonicalCategory::Teens),
    ("wisdom for teenagers", CanonicalCategory::Teens),
    ("wisdom-for-teenagers", CanonicalCategory::Teens),
    ("wisdom_for_teenagers", CanonicalCategory::Teens),
    ("wisdom for teens", CanonicalCategory::Teens),
    ("wisdom-for-teens", CanonicalCategory::Teens),
    ("university", CanonicalCategory::UniversityStudents),
    ("students", CanonicalCategory::UniversityStudents),
    ("university students", CanonicalCategory::UniversityStudents),
    ("campus", CanonicalCategory::UniversityStudents),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Known(CanonicalCategory),
    /// Lower-cased label that matched no alias.
    Unknown(String),
    Missing,
}

/// Immutable alias → canonical category lookup.
///
/// Keys are stored lower-cased. Every canonical id and display name resolves
/// to itself on top of whatever aliases the table was built with.
#[derive(Debug, Clone)]
pub struct AliasTable {
    aliases: HashMap<String, CanonicalCategory>,
}

impl AliasTable {
    pub fn new<'a, I>(aliases: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, CanonicalCategory)>,
    {
        let mut map = HashMap::new();
        for c in CanonicalCategory::ALL.iter().copied() {
            map.insert(c.id().to_string(), c);
            map.insert(c.display_name().to_lowercase(), c);
        }
        for (alias, c) in aliases {
            map.insert(alias.trim().to_lowercase(), c);
        }
        AliasTable { aliases: map }
    }

    pub fn lookup(&self, raw: &str) -> Option<CanonicalCategory> {
        self.aliases.get(&fold(raw)).copied()
    }

    pub fn classify(&self, raw: Option<&str>) -> Classification {
        let folded = match raw.map(fold) {
            Some(s) if !s.is_empty() => s,
            _ => return Classification::Missing,
        };
        match self.aliases.get(&folded) {
            Some(c) => Classification::Known(*c),
            None => Classification::Unknown(folded),
        }
    }

    // canonical id on a hit, the lower-cased input as given otherwise
    pub fn normalize(&self, raw: &str) -> String {
        match self.lookup(raw) {
            Some(c) => c.id().to_string(),
            None => raw.to_lowercase(),
        }
    }
}

impl Default for AliasTable {
    fn default() -> Self {
        AliasTable::new(BUILTIN_ALIASES.iter().copied())
    }
}

fn fold(raw: &str) -> String {
    raw.trim().to_lowercase()
}

pub fn normalize_category(raw: &str) -> String {
    AliasTable::default().normalize(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_are_case_insensitive() {
        assert_eq!(normalize_category("Wisdom For Teenagers"), "teens");
        assert_eq!(normalize_category("wisdom-for-teenagers"), "teens");
        assert_eq!(normalize_category("Wisdom-For-Teenagers"), "teens");
        assert_eq!(normalize_category("BEYOND THE DATING GAME"), "beyond-dating-game");
        assert_eq!(normalize_category("  Teens Podcasts "), "teens");
    }

    #[test]
    fn every_builtin_alias_maps() {
        let table = AliasTable::default();
        for (alias, c) in BUILTIN_ALIASES {
            assert_eq!(table.lookup(alias), Some(*c), "alias {}", alias);
            assert_eq!(table.lookup(&alias.to_uppercase()), Some(*c), "alias {}", alias);
        }
        for c in CanonicalCategory::ALL.iter() {
            assert_eq!(table.normalize(c.id()), c.id());
            assert_eq!(table.normalize(c.display_name()), c.id());
        }
    }

    #[test]
    fn unknown_passes_through_lowercased() {
        assert_eq!(normalize_category("Test"), "test");
        assert_eq!(normalize_category(""), "");
        assert_eq!(normalize_category("  Foo "), "  foo ");
    }

    #[test]
    fn classify_variants() {
        let table = AliasTable::default();
        assert_eq!(
            table.classify(Some("Relationship")),
            Classification::Known(CanonicalCategory::Relationships)
        );
        assert_eq!(
            table.classify(Some("Sermons")),
            Classification::Unknown("sermons".to_string())
        );
        assert_eq!(table.classify(Some("   ")), Classification::Missing);
        assert_eq!(table.classify(None), Classification::Missing);
    }

    #[test]
    fn injected_table() {
        let table = AliasTable::new(vec![("youth", CanonicalCategory::Teens)]);
        assert_eq!(table.lookup("Youth"), Some(CanonicalCategory::Teens));
        assert_eq!(table.lookup("teenagers"), None);
        assert_eq!(table.lookup("teens"), Some(CanonicalCategory::Teens));
    }

    #[test]
    fn ids_round_trip() {
        for c in CanonicalCategory::ALL.iter().copied() {
            assert_eq!(CanonicalCategory::from_id(c.id()), Some(c));
            let json = serde_json::to_string(&c).expect("serialize failed");
            assert_eq!(json, format!("\"{}\"", c.id()));
        }
        assert_eq!(CanonicalCategory::from_id("Teens"), None);
    }
}
