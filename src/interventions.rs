//! Fixed catalog of policy interventions offered to the player.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    Mobility,
    Highschool,
    Discrimination,
    Retention,
    Training,
    Childcare,
    Transit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Level {
    Low,
    Med,
    High,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Intervention {
    pub category: Category,
    pub level: Level,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Mobility,
        Category::Highschool,
        Category::Discrimination,
        Category::Retention,
        Category::Training,
        Category::Childcare,
        Category::Transit,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Category::Mobility => "Mobility",
            Category::Highschool => "Highschool",
            Category::Discrimination => "Discrimination",
            Category::Retention => "Retention",
            Category::Training => "Training",
            Category::Childcare => "Childcare",
            Category::Transit => "Transit",
        }
    }
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Low, Level::Med, Level::High];

    pub fn label(self) -> &'static str {
        match self {
            Level::Low => "Low",
            Level::Med => "Med",
            Level::High => "High",
        }
    }
}

impl Intervention {
    /// Engine action identifier for this slot, if the engine defines one.
    ///
    /// Slots without an identifier are shown but cannot be played: the engine
    /// would treat any other id as a plain turn with no intervention.
    pub fn action_id(&self) -> Option<&'static str> {
        use Category::*;
        use Level::*;
        match (self.category, self.level) {
            (Mobility, Low) => Some("mobility-"),
            (Mobility, High) => Some("mobility+"),
            (Highschool, High) => Some("hs_diploma"),
            (Discrimination, Low) => Some("discriminate-low"),
            (Discrimination, Med) => Some("discriminate-normal"),
            (Discrimination, High) => Some("discriminate-high"),
            (Retention, Low) => Some("retention-"),
            (Retention, High) => Some("retention+"),
            _ => None,
        }
    }
}

/// All interventions in display order: category-major, then intensity.
pub fn catalog() -> Vec<Intervention> {
    Category::ALL
        .iter()
        .flat_map(|&category| {
            Level::ALL
                .iter()
                .map(move |&level| Intervention { category, level })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    // every id the engine applies an intervention for
    const ENGINE_ACTIONS: [&str; 8] = [
        "hs_diploma",
        "mobility+",
        "mobility-",
        "discriminate-low",
        "discriminate-normal",
        "discriminate-high",
        "retention+",
        "retention-",
    ];

    #[test]
    fn seven_categories_by_three_levels() {
        let all = catalog();
        assert_eq!(all.len(), 21);
        let unique: HashSet<Intervention> = all.iter().copied().collect();
        assert_eq!(unique.len(), 21);
    }

    #[test]
    fn playable_slots_cover_the_engine_vocabulary_exactly() {
        let ids: Vec<&str> = catalog().iter().filter_map(|i| i.action_id()).collect();
        let unique: HashSet<&str> = ids.iter().copied().collect();
        assert_eq!(unique.len(), ids.len());
        let engine: HashSet<&str> = ENGINE_ACTIONS.iter().copied().collect();
        assert_eq!(unique, engine);
    }

    #[test]
    fn levels_map_to_engine_direction() {
        let id = |category, level| Intervention { category, level }.action_id();
        assert_eq!(id(Category::Mobility, Level::High), Some("mobility+"));
        assert_eq!(id(Category::Mobility, Level::Low), Some("mobility-"));
        assert_eq!(id(Category::Discrimination, Level::Med), Some("discriminate-normal"));
        assert_eq!(id(Category::Highschool, Level::High), Some("hs_diploma"));
        assert_eq!(id(Category::Retention, Level::Med), None);
        for level in Level::ALL {
            assert_eq!(id(Category::Transit, level), None);
        }
    }
}
