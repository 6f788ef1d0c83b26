#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestOutcome {
    pub name: String,
    pub passed: bool,
}

/// Outcomes in the order they were recorded.
#[derive(Debug, Default)]
pub struct Outcomes {
    outcomes: Vec<TestOutcome>,
}

impl Outcomes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names should be unique within a run; a repeat is kept but logged.
    pub fn record(&mut self, name: &str, passed: bool) {
        if self.outcomes.iter().any(|o| o.name == name) {
            log::warn!("Duplicate outcome name {name:?}");
        }
        self.outcomes.push(TestOutcome {
            name: name.to_string(),
            passed,
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = &TestOutcome> {
        self.outcomes.iter()
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed).count()
    }

    pub fn all_passed(&self) -> bool {
        self.outcomes.iter().all(|o| o.passed)
    }
}
