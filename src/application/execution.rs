//! Execution mode for the per-cell generation pass.
//!
//! Both modes read only the frozen previous generation and write only the
//! next one, so they produce identical grids.

/// How the engine evaluates per-cell rules
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    /// One cell after another on the calling thread
    Serial,
    /// Cells split across the rayon thread pool
    #[default]
    Parallel,
}

impl ExecutionMode {
    /// Get all available modes
    pub fn all() -> Vec<ExecutionMode> {
        vec![ExecutionMode::Serial, ExecutionMode::Parallel]
    }

    /// Display name for UI
    pub fn name(&self) -> &'static str {
        match self {
            ExecutionMode::Serial => "Serial",
            ExecutionMode::Parallel => "Parallel",
        }
    }

    /// Short description for tooltips/info
    pub fn description(&self) -> &'static str {
        match self {
            ExecutionMode::Serial => "Cell by cell, single thread",
            ExecutionMode::Parallel => "Cells split across worker threads",
        }
    }

    /// The other mode
    pub fn toggled(self) -> Self {
        match self {
            ExecutionMode::Serial => ExecutionMode::Parallel,
            ExecutionMode::Parallel => ExecutionMode::Serial,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_parallel() {
        assert_eq!(ExecutionMode::default(), ExecutionMode::Parallel);
    }

    #[test]
    fn test_names_are_unique() {
        let names: Vec<_> = ExecutionMode::all().iter().map(|m| m.name()).collect();
        let mut unique = names.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(names.len(), unique.len());
    }

    #[test]
    fn test_toggle_roundtrip() {
        for mode in ExecutionMode::all() {
            assert_eq!(mode.toggled().toggled(), mode);
        }
    }
}
