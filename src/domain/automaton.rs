use super::{AgentState, CyclicRule, ElementaryRule, Grid, LangtonAnt, LifeRule, Rule};
use crate::error::{AutomatonError, Result};

/// The active dynamics of an automaton, selected by variant rather than by
/// subclassing. The first three are per-cell rules; Langton's Ant is an agent
/// that mutates one cell per generation.
#[derive(Clone, Debug)]
pub enum Automaton {
    Cyclic(CyclicRule),
    Life(LifeRule),
    Elementary(ElementaryRule),
    Langton { ant: LangtonAnt, agent: AgentState },
}

impl Automaton {
    /// Per-cell rule, if this automaton has one
    pub fn cell_rule(&self) -> Option<&dyn Rule> {
        match self {
            Automaton::Cyclic(rule) => Some(rule as &dyn Rule),
            Automaton::Life(rule) => Some(rule as &dyn Rule),
            Automaton::Elementary(rule) => Some(rule as &dyn Rule),
            Automaton::Langton { .. } => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Automaton::Langton { ant, .. } => ant.name(),
            other => other.cell_rule().map_or("", |r| r.name()),
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Automaton::Langton { ant, .. } => ant.description(),
            other => other.cell_rule().map_or("", |r| r.description()),
        }
    }

    /// Size of the id space
    pub fn color_count(&self) -> usize {
        match self {
            Automaton::Langton { .. } => LangtonAnt::COLORS,
            other => other.cell_rule().map_or(1, |r| r.color_count()),
        }
    }

    /// Grid rank the dynamics are defined for
    pub fn rank(&self) -> usize {
        match self {
            Automaton::Langton { .. } => 2,
            other => other.cell_rule().map_or(2, |r| r.rank()),
        }
    }

    /// Whether generations can be computed cell by cell in any order
    pub fn is_per_cell(&self) -> bool {
        self.cell_rule().is_some()
    }

    pub fn agent(&self) -> Option<&AgentState> {
        match self {
            Automaton::Langton { agent, .. } => Some(agent),
            _ => None,
        }
    }

    /// Check that the dynamics fit a grid
    pub fn validate_for(&self, grid: &Grid) -> Result<()> {
        if self.rank() != grid.rank() {
            return Err(AutomatonError::RankMismatch {
                rule: self.name(),
                expected: self.rank(),
                got: grid.rank(),
            });
        }
        Ok(())
    }

    /// Check that a requested color count matches what the dynamics need
    pub fn expect_colors(&self, requested: usize) -> Result<()> {
        let expected = self.color_count();
        if requested != expected {
            return Err(AutomatonError::ColorCountMismatch {
                rule: self.name(),
                expected,
                got: requested,
            });
        }
        Ok(())
    }
}
