use super::checks::{self, CheckFn};
use super::domain::{CheckOutput, Profile, ProfileCategory, ProfileId, ProfileSummary};
use super::facts::{FactGroup, FactsQuery, PageFacts};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("unknown accessibility profile '{0}'")]
    UnknownProfile(String),
}

/// Catalog entry binding a profile to the facts it needs and the check that scores them.
#[derive(Debug, Clone, Copy)]
pub struct ProfileEntry {
    pub profile: Profile,
    facts: &'static [FactGroup],
    check: CheckFn,
}

impl ProfileEntry {
    pub fn query(&self) -> FactsQuery {
        FactsQuery::new(self.facts.iter().copied())
    }

    pub fn run(&self, facts: &PageFacts) -> CheckOutput {
        (self.check)(facts)
    }
}

static CATALOG: [ProfileEntry; 12] = [
    ProfileEntry {
        profile: Profile {
            id: ProfileId::Blind,
            name: "Blind",
            category: ProfileCategory::Vision,
            description: "Supports screen reader users and keyboard-only navigation.",
            checks: ["headings", "ariaLabels", "landmarks", "skipLinks"],
            dimensions: checks::blind::DIMENSIONS,
        },
        facts: checks::blind::FACTS,
        check: checks::blind::run,
    },
    ProfileEntry {
        profile: Profile {
            id: ProfileId::Colorblind,
            name: "Color Blind",
            category: ProfileCategory::Vision,
            description: "Supports people who have difficulty distinguishing certain colors.",
            checks: ["contrast", "colorOnly", "altText", "buttonStates"],
            dimensions: checks::colorblind::DIMENSIONS,
        },
        facts: checks::colorblind::FACTS,
        check: checks::colorblind::run,
    },
    ProfileEntry {
        profile: Profile {
            id: ProfileId::Lowvision,
            name: "Low Vision",
            category: ProfileCategory::Vision,
            description: "Supports people with low vision who need larger text and high contrast.",
            checks: ["textSize", "contrast", "zoomable", "focusIndicators"],
            dimensions: checks::low_vision::DIMENSIONS,
        },
        facts: checks::low_vision::FACTS,
        check: checks::low_vision::run,
    },
    ProfileEntry {
        profile: Profile {
            id: ProfileId::Photosensitive,
            name: "Photosensitive",
            category: ProfileCategory::Vision,
            description: "Supports people sensitive to flashing, motion, or bright content.",
            checks: ["flashingContent", "animations", "autoPlay", "motion"],
            dimensions: checks::photosensitive::DIMENSIONS,
        },
        facts: checks::photosensitive::FACTS,
        check: checks::photosensitive::run,
    },
    ProfileEntry {
        profile: Profile {
            id: ProfileId::Deaf,
            name: "Deaf / Hard of Hearing",
            category: ProfileCategory::Hearing,
            description: "Supports people who rely on captions, transcripts, and visual alerts.",
            checks: ["captions", "transcripts", "visualAlerts", "audioDescriptions"],
            dimensions: checks::deaf::DIMENSIONS,
        },
        facts: checks::deaf::FACTS,
        check: checks::deaf::run,
    },
    ProfileEntry {
        profile: Profile {
            id: ProfileId::Motor,
            name: "Limited Dexterity",
            category: ProfileCategory::Motor,
            description: "Supports people who have difficulty with precise movements or use assistive devices.",
            checks: ["keyboard", "clickAreas", "focusVisibility", "dragDrop"],
            dimensions: checks::motor::DIMENSIONS,
        },
        facts: checks::motor::FACTS,
        check: checks::motor::run,
    },
    ProfileEntry {
        profile: Profile {
            id: ProfileId::Keyboard,
            name: "Keyboard Only",
            category: ProfileCategory::Motor,
            description: "Supports people who navigate entirely without a mouse.",
            checks: ["tabOrder", "focusTraps", "keyboardShortcuts", "skipLinks"],
            dimensions: checks::keyboard::DIMENSIONS,
        },
        facts: checks::keyboard::FACTS,
        check: checks::keyboard::run,
    },
    ProfileEntry {
        profile: Profile {
            id: ProfileId::Dyslexia,
            name: "Dyslexia",
            category: ProfileCategory::Cognitive,
            description: "Supports people who may find reading dense text difficult or tiring.",
            checks: ["textSpacing", "lineHeight", "fontsize", "textAlignment"],
            dimensions: checks::dyslexia::DIMENSIONS,
        },
        facts: checks::dyslexia::FACTS,
        check: checks::dyslexia::run,
    },
    ProfileEntry {
        profile: Profile {
            id: ProfileId::Cognitive,
            name: "Cognitive & Learning",
            category: ProfileCategory::Cognitive,
            description: "Supports needs related to memory, processing, and comprehension.",
            checks: ["simpleLayout", "navigation", "wording", "distractions"],
            dimensions: checks::cognitive::DIMENSIONS,
        },
        facts: checks::cognitive::FACTS,
        check: checks::cognitive::run,
    },
    ProfileEntry {
        profile: Profile {
            id: ProfileId::Adhd,
            name: "ADHD & Focus",
            category: ProfileCategory::Cognitive,
            description: "Supports people who are easily distracted or overwhelmed by busy pages.",
            checks: ["visualNoise", "hierarchy", "spacing", "distractions"],
            dimensions: checks::adhd::DIMENSIONS,
        },
        facts: checks::adhd::FACTS,
        check: checks::adhd::run,
    },
    ProfileEntry {
        profile: Profile {
            id: ProfileId::Autism,
            name: "Autism & Sensory",
            category: ProfileCategory::Cognitive,
            description: "Supports people who need predictability and reduced sensory overload.",
            checks: ["consistency", "predictability", "sensoryLoad", "clearLabels"],
            dimensions: checks::autism::DIMENSIONS,
        },
        facts: checks::autism::FACTS,
        check: checks::autism::run,
    },
    ProfileEntry {
        profile: Profile {
            id: ProfileId::Anxiety,
            name: "Anxiety & Stress",
            category: ProfileCategory::Cognitive,
            description: "Supports people who may be overwhelmed by time pressure or complex UI.",
            checks: ["timers", "pressure", "clarity", "errorRecovery"],
            dimensions: checks::anxiety::DIMENSIONS,
        },
        facts: checks::anxiety::FACTS,
        check: checks::anxiety::run,
    },
];

/// Read-only catalog of every supported profile, in presentation order.
#[derive(Debug, Clone, Copy)]
pub struct ProfileRegistry {
    entries: &'static [ProfileEntry],
}

impl Default for ProfileRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl ProfileRegistry {
    pub fn standard() -> Self {
        Self { entries: &CATALOG }
    }

    pub fn list_profiles(&self) -> impl Iterator<Item = &Profile> + '_ {
        self.entries.iter().map(|entry| &entry.profile)
    }

    pub fn summaries(&self) -> Vec<ProfileSummary> {
        self.list_profiles().map(Profile::summary).collect()
    }

    pub fn get_profile(&self, id: &str) -> Result<&Profile, RegistryError> {
        self.lookup(id).map(|entry| &entry.profile)
    }

    /// Resolves a raw profile key to its catalog entry.
    pub fn lookup(&self, id: &str) -> Result<&ProfileEntry, RegistryError> {
        let profile_id = id
            .parse::<ProfileId>()
            .map_err(|err| RegistryError::UnknownProfile(err.0))?;
        Ok(self.entry(profile_id))
    }

    pub fn entry(&self, id: ProfileId) -> &ProfileEntry {
        // Catalog order mirrors the `ProfileId` declaration order.
        &self.entries[id as usize]
    }

    pub fn query_for(&self, id: ProfileId) -> FactsQuery {
        self.entry(id).query()
    }

    pub fn check_for(&self, id: ProfileId) -> CheckFn {
        self.entry(id).check
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_follows_profile_id_order() {
        let registry = ProfileRegistry::standard();
        let ids: Vec<ProfileId> = registry.list_profiles().map(|profile| profile.id).collect();
        assert_eq!(ids, ProfileId::ordered().to_vec());
        for id in ProfileId::ordered() {
            assert_eq!(registry.entry(id).profile.id, id);
        }
    }

    #[test]
    fn get_profile_resolves_known_keys() {
        let registry = ProfileRegistry::standard();
        let profile = registry.get_profile("lowvision").expect("profile exists");
        assert_eq!(profile.name, "Low Vision");
        assert_eq!(profile.dimensions, ["textSize", "contrast", "zoomable", "focus"]);
    }

    #[test]
    fn get_profile_rejects_unknown_keys() {
        let registry = ProfileRegistry::standard();
        let err = registry.get_profile("telepathic").expect_err("not in catalog");
        assert_eq!(err, RegistryError::UnknownProfile("telepathic".to_string()));
    }

    #[test]
    fn every_profile_requests_at_least_one_fact_group() {
        let registry = ProfileRegistry::standard();
        for id in ProfileId::ordered() {
            assert!(!registry.query_for(id).groups.is_empty(), "{id} has no facts");
        }
    }

    #[test]
    fn every_check_populates_declared_dimensions_from_empty_facts() {
        let registry = ProfileRegistry::standard();
        for profile in registry.list_profiles() {
            let output = registry.check_for(profile.id)(&PageFacts::default());
            assert!(
                output.sub_scores.covers(&profile.dimensions),
                "{} did not populate {:?}",
                profile.id,
                profile.dimensions
            );
        }
    }
}
