//! Construction parameters for an automaton, and the environment-driven
//! settings of the interactive front end.

use std::time::Duration;

use super::{Engine, ExecutionMode};
use crate::domain::{
    AgentState, Automaton, CellState, CyclicRule, Dimensions, ElementaryRule, Grid, LangtonAnt,
    LifeRule, Pattern, Rgb, presets,
};
use crate::error::{AutomatonError, Result};

/// Default delay between generations
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(25);

/// Default number of generations before a started engine stops by itself
pub const DEFAULT_MAX_GENERATIONS: u64 = 2500;

/// Largest side length used for 3D grids
pub const MAX_3D_SIZE: usize = 32;

/// Every automaton the application can build, keyed by route name
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum AutomatonKind {
    Cca1D,
    #[default]
    Cca2D,
    Cca3D,
    Conway,
    Immigration,
    QuadLife,
    HighLife,
    Seeds,
    DayAndNight,
    Langton,
    Rule30,
    Rule90,
    Rule110,
}

impl AutomatonKind {
    /// Get all available kinds
    pub fn all() -> Vec<AutomatonKind> {
        vec![
            AutomatonKind::Cca1D,
            AutomatonKind::Cca2D,
            AutomatonKind::Cca3D,
            AutomatonKind::Conway,
            AutomatonKind::Immigration,
            AutomatonKind::QuadLife,
            AutomatonKind::HighLife,
            AutomatonKind::Seeds,
            AutomatonKind::DayAndNight,
            AutomatonKind::Langton,
            AutomatonKind::Rule30,
            AutomatonKind::Rule90,
            AutomatonKind::Rule110,
        ]
    }

    /// Route name
    pub fn route(&self) -> &'static str {
        match self {
            AutomatonKind::Cca1D => "cca-1D",
            AutomatonKind::Cca2D => "cca-2D",
            AutomatonKind::Cca3D => "cca-3D",
            AutomatonKind::Conway => "conway",
            AutomatonKind::Immigration => "immigration",
            AutomatonKind::QuadLife => "quadlife",
            AutomatonKind::HighLife => "highlife",
            AutomatonKind::Seeds => "seeds",
            AutomatonKind::DayAndNight => "daynight",
            AutomatonKind::Langton => "langton",
            AutomatonKind::Rule30 => "rule30",
            AutomatonKind::Rule90 => "rule90",
            AutomatonKind::Rule110 => "rule110",
        }
    }

    /// Display name for UI
    pub fn name(&self) -> &'static str {
        match self {
            AutomatonKind::Cca1D => "CCA 1D",
            AutomatonKind::Cca2D => "CCA 2D",
            AutomatonKind::Cca3D => "CCA 3D",
            AutomatonKind::Conway => "Conway",
            AutomatonKind::Immigration => "Immigration",
            AutomatonKind::QuadLife => "QuadLife",
            AutomatonKind::HighLife => "HighLife",
            AutomatonKind::Seeds => "Seeds",
            AutomatonKind::DayAndNight => "Day&Night",
            AutomatonKind::Langton => "Langton's Ant",
            AutomatonKind::Rule30 => "Rule 30",
            AutomatonKind::Rule90 => "Rule 90",
            AutomatonKind::Rule110 => "Rule 110",
        }
    }

    /// Strict route lookup, case-insensitive
    pub fn parse_route(route: &str) -> Result<Self> {
        let route = route.trim().trim_start_matches('/');
        Self::all()
            .into_iter()
            .find(|kind| kind.route().eq_ignore_ascii_case(route))
            .ok_or_else(|| AutomatonError::UnknownAutomaton(route.to_string()))
    }

    /// Route lookup falling back to the 2D CCA for unknown names
    pub fn from_route(route: &str) -> Self {
        Self::parse_route(route).unwrap_or_default()
    }

    /// Grid rank the automaton runs on
    pub fn rank(&self) -> usize {
        match self {
            AutomatonKind::Cca1D
            | AutomatonKind::Rule30
            | AutomatonKind::Rule90
            | AutomatonKind::Rule110 => 1,
            AutomatonKind::Cca3D => 3,
            _ => 2,
        }
    }

    /// Color count imposed by the rule, `None` when it is free
    pub fn fixed_colors(&self) -> Option<usize> {
        match self {
            AutomatonKind::Cca1D | AutomatonKind::Cca2D | AutomatonKind::Cca3D => None,
            AutomatonKind::Immigration => Some(3),
            AutomatonKind::QuadLife => Some(5),
            _ => Some(2),
        }
    }

    pub fn is_cyclic(&self) -> bool {
        self.fixed_colors().is_none()
    }

    /// Side length actually used for a requested size
    pub fn clamp_size(&self, size: usize) -> usize {
        if self.rank() == 3 { size.min(MAX_3D_SIZE) } else { size }
    }

    /// Square/cubic/linear dimensions of the right rank
    pub fn dimensions(&self, size: usize) -> Dimensions {
        match self.rank() {
            1 => Dimensions::One(size),
            3 => Dimensions::Three(size, size, size),
            _ => Dimensions::Two(size, size),
        }
    }

    /// How the grid is seeded when nothing else is asked for
    pub fn default_initial_state(&self) -> InitialState {
        match self {
            AutomatonKind::Langton => InitialState::Uniform(CellState::ZERO),
            AutomatonKind::Rule30 | AutomatonKind::Rule90 | AutomatonKind::Rule110 => InitialState::CenterSeed,
            _ => InitialState::Random,
        }
    }
}

/// Grid seeding policy applied by `Engine::reset`
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InitialState {
    /// Every cell gets a uniformly random id
    Random,
    /// Every cell gets the same id
    Uniform(CellState),
    /// Id 0 everywhere plus each pattern at a random non-overlapping offset
    PatternSet(Vec<Pattern>),
    /// Id 0 everywhere except one live cell in the center
    CenterSeed,
}

impl InitialState {
    /// The oscillator demo suite
    pub fn oscillators() -> Self {
        InitialState::PatternSet(presets::oscillators())
    }
}

/// Everything needed to construct an engine
#[derive(Clone, Debug)]
pub struct AutomatonConfig {
    pub kind: AutomatonKind,
    pub dimensions: Dimensions,
    /// Overrides the default id space of cyclic automata
    pub color_count: Option<usize>,
    /// CCA threshold; defaults per rank
    pub threshold: Option<usize>,
    /// Explicit palette instead of a random gradient
    pub palette_colors: Option<Vec<Rgb>>,
    /// Seeding policy; defaults per kind
    pub initial_state: Option<InitialState>,
    pub execution: ExecutionMode,
    pub interval: Duration,
    pub max_generations: Option<u64>,
    /// RNG seed for reproducible runs
    pub seed: Option<u64>,
}

impl Default for AutomatonConfig {
    fn default() -> Self {
        Self::new(AutomatonKind::default(), Dimensions::Two(200, 200))
    }
}

impl AutomatonConfig {
    pub fn new(kind: AutomatonKind, dimensions: Dimensions) -> Self {
        Self {
            kind,
            dimensions,
            color_count: None,
            threshold: None,
            palette_colors: None,
            initial_state: None,
            execution: ExecutionMode::default(),
            interval: DEFAULT_INTERVAL,
            max_generations: Some(DEFAULT_MAX_GENERATIONS),
            seed: None,
        }
    }

    /// Kind with its natural dimensions for a side length
    pub fn for_kind(kind: AutomatonKind, size: usize) -> Self {
        Self::new(kind, kind.dimensions(size))
    }

    pub fn with_color_count(mut self, color_count: usize) -> Self {
        self.color_count = Some(color_count);
        self
    }

    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.threshold = Some(threshold);
        self
    }

    pub fn with_palette(mut self, colors: Vec<Rgb>) -> Self {
        self.palette_colors = Some(colors);
        self
    }

    pub fn with_initial_state(mut self, initial_state: InitialState) -> Self {
        self.initial_state = Some(initial_state);
        self
    }

    pub fn with_execution(mut self, execution: ExecutionMode) -> Self {
        self.execution = execution;
        self
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_max_generations(mut self, max_generations: Option<u64>) -> Self {
        self.max_generations = max_generations;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Seeding policy after applying the kind default
    pub fn initial_state(&self) -> InitialState {
        self.initial_state
            .clone()
            .unwrap_or_else(|| self.kind.default_initial_state())
    }

    /// Build the dynamics for a grid, validating colors, threshold and rank
    pub fn build_automaton(&self, grid: &Grid) -> Result<Automaton> {
        let rank = grid.rank();
        let automaton = match self.kind {
            AutomatonKind::Cca1D | AutomatonKind::Cca2D | AutomatonKind::Cca3D => {
                let colors = self.color_count.unwrap_or(CyclicRule::DEFAULT_COLORS);
                let threshold = self
                    .threshold
                    .unwrap_or_else(|| CyclicRule::default_threshold(rank));
                Automaton::Cyclic(CyclicRule::new(colors, threshold, self.kind.rank())?)
            }
            AutomatonKind::Conway => Automaton::Life(LifeRule::conway()),
            AutomatonKind::Immigration => Automaton::Life(LifeRule::immigration()),
            AutomatonKind::QuadLife => Automaton::Life(LifeRule::quad_life()),
            AutomatonKind::HighLife => Automaton::Life(LifeRule::high_life()),
            AutomatonKind::Seeds => Automaton::Life(LifeRule::seeds()),
            AutomatonKind::DayAndNight => Automaton::Life(LifeRule::day_and_night()),
            AutomatonKind::Langton => Automaton::Langton {
                ant: LangtonAnt,
                agent: AgentState::centered(grid),
            },
            AutomatonKind::Rule30 => Automaton::Elementary(ElementaryRule::new(30)),
            AutomatonKind::Rule90 => Automaton::Elementary(ElementaryRule::new(90)),
            AutomatonKind::Rule110 => Automaton::Elementary(ElementaryRule::new(110)),
        };

        if self.threshold.is_some() && !matches!(automaton, Automaton::Cyclic(_)) {
            return Err(AutomatonError::ThresholdNotApplicable(automaton.name()));
        }
        if let Some(requested) = self.color_count {
            automaton.expect_colors(requested)?;
        }
        automaton.validate_for(grid)?;
        Ok(automaton)
    }

    /// Construct the engine
    pub fn build(self) -> Result<Engine> {
        Engine::new(self)
    }
}

/// Renderer the front end tries first
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RendererPreference {
    /// One texel per cell, uploaded as a texture
    #[default]
    Texture,
    /// One rectangle per cell
    Shapes,
}

impl RendererPreference {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "texture" | "webgl" => Some(RendererPreference::Texture),
            "shapes" | "canvas" => Some(RendererPreference::Shapes),
            _ => None,
        }
    }
}

/// Settings of the interactive front end
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub kind: AutomatonKind,
    pub renderer: RendererPreference,
    pub size: usize,
    pub seed: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            kind: AutomatonKind::default(),
            renderer: RendererPreference::default(),
            size: 200,
            seed: None,
        }
    }
}

impl AppConfig {
    /// Read the route from the first CLI argument or `AUTOMATON`, then
    /// `AUTOMATON_RENDERER`, `AUTOMATON_SIZE` and `AUTOMATON_SEED`.
    pub fn from_env() -> Self {
        let route = std::env::args()
            .nth(1)
            .or_else(|| std::env::var("AUTOMATON").ok());
        let var = |name: &str| std::env::var(name).ok();
        Self::from_sources(
            route.as_deref(),
            var("AUTOMATON_RENDERER").as_deref(),
            var("AUTOMATON_SIZE").as_deref(),
            var("AUTOMATON_SEED").as_deref(),
        )
    }

    /// Same parsing as `from_env`, from explicit values
    pub fn from_sources(
        route: Option<&str>,
        renderer: Option<&str>,
        size: Option<&str>,
        seed: Option<&str>,
    ) -> Self {
        let defaults = Self::default();
        let kind = route.map_or(defaults.kind, AutomatonKind::from_route);
        let renderer = renderer
            .and_then(RendererPreference::parse)
            .unwrap_or(defaults.renderer);
        let size = size
            .and_then(|s| s.trim().parse::<usize>().ok())
            .filter(|&s| s > 0)
            .unwrap_or(defaults.size);
        let seed = seed.and_then(|s| s.trim().parse().ok());
        Self { kind, renderer, size, seed }
    }

    /// Engine configuration for the selected kind
    pub fn automaton_config(&self) -> AutomatonConfig {
        let config = AutomatonConfig::for_kind(self.kind, self.kind.clamp_size(self.size));
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routes_roundtrip() {
        for kind in AutomatonKind::all() {
            assert_eq!(AutomatonKind::parse_route(kind.route()), Ok(kind));
        }
    }

    #[test]
    fn test_route_lookup_is_case_insensitive() {
        assert_eq!(AutomatonKind::from_route("/CCA-3d"), AutomatonKind::Cca3D);
        assert_eq!(AutomatonKind::from_route("Langton"), AutomatonKind::Langton);
    }

    #[test]
    fn test_unknown_route_falls_back() {
        assert_eq!(AutomatonKind::from_route("entropy"), AutomatonKind::Cca2D);
        assert!(matches!(
            AutomatonKind::parse_route("entropy"),
            Err(AutomatonError::UnknownAutomaton(_))
        ));
    }

    #[test]
    fn test_build_rejects_wrong_color_count() {
        let config = AutomatonConfig::for_kind(AutomatonKind::Conway, 10).with_color_count(8);
        let grid = Grid::new(config.dimensions).unwrap();
        assert!(matches!(
            config.build_automaton(&grid),
            Err(AutomatonError::ColorCountMismatch { expected: 2, got: 8, .. })
        ));
    }

    #[test]
    fn test_threshold_only_applies_to_cyclic_rules() {
        for kind in [AutomatonKind::Conway, AutomatonKind::Langton, AutomatonKind::Rule30] {
            let config = AutomatonConfig::for_kind(kind, 10).with_threshold(5);
            let grid = Grid::new(config.dimensions).unwrap();
            assert!(matches!(
                config.build_automaton(&grid),
                Err(AutomatonError::ThresholdNotApplicable(_))
            ));
        }

        let config = AutomatonConfig::for_kind(AutomatonKind::Cca2D, 10).with_threshold(5);
        let grid = Grid::new(config.dimensions).unwrap();
        assert!(config.build_automaton(&grid).is_ok());
    }

    #[test]
    fn test_build_rejects_wrong_rank() {
        let config = AutomatonConfig::new(AutomatonKind::Langton, Dimensions::One(10));
        let grid = Grid::new(config.dimensions).unwrap();
        assert!(matches!(
            config.build_automaton(&grid),
            Err(AutomatonError::RankMismatch { .. })
        ));
    }

    #[test]
    fn test_cca_defaults() {
        let config = AutomatonConfig::for_kind(AutomatonKind::Cca1D, 10);
        let grid = Grid::new(config.dimensions).unwrap();
        match config.build_automaton(&grid).unwrap() {
            Automaton::Cyclic(rule) => assert_eq!(rule.threshold(), 1),
            other => panic!("expected CCA, got {}", other.name()),
        }
        let config = AutomatonConfig::for_kind(AutomatonKind::Cca2D, 10);
        let grid = Grid::new(config.dimensions).unwrap();
        let automaton = config.build_automaton(&grid).unwrap();
        assert_eq!(automaton.color_count(), 8);
    }

    #[test]
    fn test_app_config_parsing() {
        let app = AppConfig::from_sources(Some("quadlife"), Some("canvas"), Some("64"), Some("9"));
        assert_eq!(app.kind, AutomatonKind::QuadLife);
        assert_eq!(app.renderer, RendererPreference::Shapes);
        assert_eq!(app.size, 64);
        assert_eq!(app.seed, Some(9));

        let app = AppConfig::from_sources(None, Some("bogus"), Some("0"), Some("x"));
        assert_eq!(app.kind, AutomatonKind::Cca2D);
        assert_eq!(app.renderer, RendererPreference::Texture);
        assert_eq!(app.size, 200);
        assert_eq!(app.seed, None);
    }

    #[test]
    fn test_3d_size_is_capped() {
        let app = AppConfig::from_sources(Some("cca-3D"), None, Some("500"), None);
        assert_eq!(app.automaton_config().dimensions, Dimensions::Three(32, 32, 32));
    }
}
