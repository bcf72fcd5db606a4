pub mod macros;

use eca_lib::eca_core::seed;
use eca_lib::{Grid, Row, Rule};

/// Builds grids for integration tests from a seed description.
#[allow(dead_code)]
pub struct GridBuilder {
    initial: Option<Row>,
    width: usize,
    rule: Rule,
    generations: usize,
    random_seed: Option<u64>,
}

#[allow(dead_code)]
impl GridBuilder {
    pub fn new(width: usize) -> Self {
        Self {
            initial: None,
            width,
            rule: Rule::RULE_30,
            generations: 1,
            random_seed: None,
        }
    }

    pub fn with_rule(mut self, rule: u8) -> Self {
        self.rule = Rule::from(rule);
        self
    }

    pub fn with_generations(mut self, generations: usize) -> Self {
        self.generations = generations;
        self
    }

    pub fn with_bits(mut self, bits: &str) -> Self {
        let row = Row::from_bits(bits).expect("valid bit string");
        self.width = row.width();
        self.initial = Some(row);
        self
    }

    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    pub fn initial(&self) -> Row {
        if let Some(row) = &self.initial {
            return row.clone();
        }
        match self.random_seed {
            Some(s) => seed::random(self.width, s).expect("random row"),
            None => seed::single_center(self.width).expect("center row"),
        }
    }

    pub fn build(self) -> Grid {
        let initial = self.initial();
        eca_lib::run(&initial, self.rule, self.generations).expect("run")
    }
}
