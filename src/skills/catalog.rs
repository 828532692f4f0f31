use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Skill {
    pub id: String,
    pub name: String,
    pub category: String,
}

/// Immutable skill reference data, keyed by id.
#[derive(Debug, Clone)]
pub struct SkillCatalog {
    skills: Vec<Skill>,
}

const DEFAULT_SKILLS: &[(&str, &str, &str)] = &[
    ("s1", "Carpentry", "Construction"),
    ("s2", "Plumbing", "Home Services"),
    ("s3", "Electrical Work", "Home Services"),
    ("s4", "Painting", "Construction"),
    ("s5", "Masonry", "Construction"),
    ("s6", "Cooking", "Hospitality"),
    ("s7", "Driving", "Transportation"),
    ("s8", "Gardening", "Agriculture"),
    ("s9", "Cleaning", "Home Services"),
    ("s10", "Tailoring", "Textile"),
    ("s11", "Welding", "Manufacturing"),
    ("s12", "Security", "Protection Services"),
    ("s13", "Farm Work", "Agriculture"),
    ("s14", "Data Entry", "Office Work"),
    ("s15", "Retail Sales", "Sales"),
];

impl Default for SkillCatalog {
    fn default() -> Self {
        Self::new(
            DEFAULT_SKILLS
                .iter()
                .map(|(id, name, category)| Skill {
                    id: (*id).into(),
                    name: (*name).into(),
                    category: (*category).into(),
                })
                .collect(),
        )
    }
}

impl SkillCatalog {
    pub fn new(skills: Vec<Skill>) -> Self {
        Self { skills }
    }

    /// Ids compare case-insensitively, ignoring surrounding whitespace.
    pub fn get(&self, id: &str) -> Option<&Skill> {
        let id = id.trim();
        self.skills.iter().find(|s| s.id.eq_ignore_ascii_case(id))
    }

    pub fn all(&self) -> &[Skill] {
        &self.skills
    }

    /// Lower-cased skill name for a stored entry.
    ///
    /// Profiles hold catalog ids while jobs hold names; entries that are not a
    /// known id are taken to be names already.
    pub fn normalized_name(&self, entry: &str) -> String {
        let entry = entry.trim();
        self.get(entry)
            .map(|s| s.name.as_str())
            .unwrap_or(entry)
            .to_lowercase()
    }
}
