use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct JobSearchQuery {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub location: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct WorkerSearchQuery {
    #[serde(default)]
    pub q: String,
    /// Comma-separated skill names or catalog ids.
    #[serde(default)]
    pub skills: String,
    #[serde(default)]
    pub location: String,
}

impl WorkerSearchQuery {
    pub fn skill_list(&self) -> Vec<String> {
        self.skills
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skills_param_splits_on_commas_and_drops_blanks() {
        let q = WorkerSearchQuery {
            skills: " Plumbing, s3 ,,".into(),
            ..Default::default()
        };
        assert_eq!(q.skill_list(), vec!["Plumbing", "s3"]);
        assert!(WorkerSearchQuery::default().skill_list().is_empty());
    }
}
