use crate::model::HouseholdCategory;
use crate::profile::schema::ClassifierPolicy;
use std::collections::HashSet;

/// Resolves whether a collection point is a business or a domestic household.
///
/// Built once from a profile's policy. A single classifier applies one
/// policy, so a cleaned dataset is never classified by a mix of rules.
#[derive(Debug, Clone)]
pub struct HouseholdClassifier {
    rule: Rule,
}

#[derive(Debug, Clone)]
enum Rule {
    /// Business iff the trimmed household name is listed.
    Names(HashSet<String>),
    /// Business iff the household's group is a mixed group.
    MixedGroups(HashSet<String>),
}

impl HouseholdClassifier {
    pub fn new(policy: &ClassifierPolicy) -> Self {
        let rule = match policy {
            ClassifierPolicy::BusinessNames { names } => {
                Rule::Names(names.iter().map(|n| n.trim().to_string()).collect())
            }
            ClassifierPolicy::MixedGroups { groups } => {
                Rule::MixedGroups(groups.iter().map(|g| g.trim().to_string()).collect())
            }
        };
        Self { rule }
    }

    pub fn classify(&self, group_key: &str, household_name: &str) -> HouseholdCategory {
        let business = match &self.rule {
            Rule::Names(names) => names.contains(household_name.trim()),
            Rule::MixedGroups(groups) => groups.contains(group_key.trim()),
        };
        if business {
            HouseholdCategory::Business
        } else {
            HouseholdCategory::Domestic
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn by_names() -> HouseholdClassifier {
        HouseholdClassifier::new(&ClassifierPolicy::BusinessNames {
            names: vec!["Tavanas".into(), "Prison Pub".into()],
        })
    }

    #[test]
    fn test_name_policy_exact_match() {
        let c = by_names();
        assert_eq!(c.classify("Nawal", "Tavanas"), HouseholdCategory::Business);
        assert_eq!(c.classify("Nawal", " Prison Pub "), HouseholdCategory::Business);
        assert_eq!(c.classify("Nawal", "prison pub"), HouseholdCategory::Domestic);
        assert_eq!(c.classify("Nawal", "Tavanas Annex"), HouseholdCategory::Domestic);
    }

    #[test]
    fn test_name_policy_ignores_group() {
        let c = by_names();
        assert_eq!(c.classify("Tavanas", "Tom Obiero"), HouseholdCategory::Domestic);
    }

    #[test]
    fn test_group_policy() {
        let c = HouseholdClassifier::new(&ClassifierPolicy::MixedGroups {
            groups: vec!["Kel Takau".into()],
        });
        assert_eq!(c.classify("Kel Takau", "Okore apartment"), HouseholdCategory::Business);
        assert_eq!(c.classify("Kel Takau", ""), HouseholdCategory::Business);
        assert_eq!(c.classify("Nawal", "Tavanas"), HouseholdCategory::Domestic);
    }

    #[test]
    fn test_unknown_defaults_to_domestic() {
        let c = by_names();
        assert_eq!(c.classify("", ""), HouseholdCategory::Domestic);
    }
}
