// life.rs - Game of Life engine with boredom detection for the banner

use rand::Rng;
use tracing::info;

use crate::codec::{COLOR_BG, Frame, Pixels};
use crate::grid::{CELLS, Grid};
use crate::patterns::{self, Pattern};
use crate::rainbow::Rainbow;

/// Thresholds deciding when a game is over.
///
/// Freezing compares strictly (`>`), respawning inclusively (`>=`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreezePolicy {
    /// Consecutive identical generations tolerated.
    pub same_pattern: u32,
    /// Consecutive generations with an unchanged population tolerated.
    pub stable_cells: u32,
    /// Hard cap on generations per game.
    pub max_generations: u64,
    /// Consecutive empty generations before reseeding.
    pub dead_respawn: u32,
}

impl Default for FreezePolicy {
    fn default() -> Self {
        Self {
            same_pattern: 8,
            stable_cells: 40,
            max_generations: 240,
            dead_respawn: 4,
        }
    }
}

impl FreezePolicy {
    pub fn should_freeze(&self, session: &GameSession) -> bool {
        session.same_count > self.same_pattern
            || session.stable_count > self.stable_cells
            || session.generation_count > self.max_generations
    }

    pub fn should_respawn(&self, session: &GameSession) -> bool {
        session.dead_count >= self.dead_respawn
    }
}

/// How one generation relates to the one before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// No live cells left.
    Dead,
    /// Every cell identical to the previous generation.
    Unchanged,
    /// Same population, different configuration.
    Stable,
    /// Population changed.
    Active,
}

impl Classification {
    pub fn of(cur_alive: usize, next_alive: usize, identical: bool) -> Self {
        if next_alive == 0 {
            Self::Dead
        } else if identical {
            Self::Unchanged
        } else if next_alive == cur_alive {
            Self::Stable
        } else {
            Self::Active
        }
    }
}

/// Counters for the game in progress. At most one of the three streak
/// counters is non-zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameSession {
    generation_count: u64,
    born: u64,
    died: u64,
    dead_count: u32,
    same_count: u32,
    stable_count: u32,
}

impl GameSession {
    pub fn generation_count(&self) -> u64 {
        self.generation_count
    }

    pub fn born(&self) -> u64 {
        self.born
    }

    pub fn died(&self) -> u64 {
        self.died
    }

    pub fn dead_count(&self) -> u32 {
        self.dead_count
    }

    pub fn same_count(&self) -> u32 {
        self.same_count
    }

    pub fn stable_count(&self) -> u32 {
        self.stable_count
    }

    /// Advances the streak for `class` and ends the other two.
    fn record(&mut self, class: Classification, born: u64, died: u64) {
        let (dead, same, stable) = match class {
            Classification::Dead => (self.dead_count + 1, 0, 0),
            Classification::Unchanged => (0, self.same_count + 1, 0),
            Classification::Stable => (0, 0, self.stable_count + 1),
            Classification::Active => (0, 0, 0),
        };
        self.dead_count = dead;
        self.same_count = same;
        self.stable_count = stable;
        self.born += born;
        self.died += died;
        self.generation_count += 1;
    }

    fn report(&self) -> GameReport {
        GameReport {
            generations: self.generation_count,
            born: self.born,
            died: self.died,
        }
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Totals for a game that was ended by the freeze policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameReport {
    pub generations: u64,
    pub born: u64,
    pub died: u64,
}

/// A policy transition that fired during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyEvent {
    /// Game was static, cyclic or too long; the field was cleared.
    Frozen(GameReport),
    /// Field had been empty for too long; it was reseeded.
    Respawned { dead_checks: u32, alive: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickOutcome {
    pub classification: Classification,
    pub event: Option<PolicyEvent>,
}

/// Double-buffered Game of Life session plus the rainbow phase used to
/// color it.
pub struct LifeEngine<R> {
    current: Grid,
    next: Grid,
    session: GameSession,
    policy: FreezePolicy,
    rainbow: Rainbow,
    phase: u64,
    rng: R,
}

impl<R: Rng> LifeEngine<R> {
    /// Starts from a random field.
    pub fn new(rainbow: Rainbow, mut rng: R) -> Self {
        let mut current = Grid::new();
        let alive = patterns::apply_random_pattern(&mut current, &mut rng);
        info!(alive, "[GoL] Seeded new game");
        Self::from_grid(current, rainbow, rng)
    }

    /// Starts from a named pattern placed at `origin`.
    pub fn from_pattern(pattern: &Pattern, origin: (usize, usize), rainbow: Rainbow, rng: R) -> Self {
        let mut current = Grid::new();
        patterns::apply_pattern(&mut current, pattern, origin);
        info!(pattern = pattern.name, alive = current.alive_count(), "[GoL] Seeded new game");
        Self::from_grid(current, rainbow, rng)
    }

    pub fn from_grid(current: Grid, rainbow: Rainbow, rng: R) -> Self {
        Self {
            current,
            next: Grid::new(),
            session: GameSession::default(),
            policy: FreezePolicy::default(),
            rainbow,
            phase: 0,
            rng,
        }
    }

    pub fn with_policy(mut self, policy: FreezePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn grid(&self) -> &Grid {
        &self.current
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn policy(&self) -> &FreezePolicy {
        &self.policy
    }

    pub fn phase(&self) -> u64 {
        self.phase
    }

    /// Advances one generation and applies the freeze and respawn policies.
    pub fn tick(&mut self) -> TickOutcome {
        let mut cur_alive = 0;
        let mut next_alive = 0;
        let mut identical = true;
        let mut born = 0;
        let mut died = 0;

        for (x, y, alive) in self.current.iter() {
            let next_state = match (alive, self.current.live_neighbors(x, y)) {
                (true, 2) | (true, 3) => true, // Survival
                (false, 3) => true,            // Birth
                _ => false,                    // Death or stays dead
            };
            self.next.set(x, y, next_state);

            cur_alive += usize::from(alive);
            next_alive += usize::from(next_state);
            match (alive, next_state) {
                (false, true) => born += 1,
                (true, false) => died += 1,
                _ => {}
            }
            identical &= alive == next_state;
        }

        let classification = Classification::of(cur_alive, next_alive, identical);
        self.session.record(classification, born, died);

        let mut event = None;

        if self.policy.should_freeze(&self.session) {
            let report = self.session.report();
            info!(
                generations = report.generations,
                born = report.born,
                died = report.died,
                "[GoL] Frozen/boring game ended"
            );
            self.next.clear();
            self.session.reset();
            event = Some(PolicyEvent::Frozen(report));
        }

        if self.policy.should_respawn(&self.session) {
            let dead_checks = self.session.dead_count;
            info!(dead_checks, "[GoL] Dead game detected, respawning");
            let alive = patterns::apply_random_pattern(&mut self.next, &mut self.rng);
            info!(alive, "[GoL] Seeded new game");
            self.session.reset();
            event = Some(PolicyEvent::Respawned { dead_checks, alive });
        }

        std::mem::swap(&mut self.current, &mut self.next);

        TickOutcome {
            classification,
            event,
        }
    }

    /// Colors for the current generation at the current phase.
    pub fn colorize(&self) -> Pixels {
        let mut pixels = [COLOR_BG; CELLS];
        for (px, (x, _, alive)) in pixels.iter_mut().zip(self.current.iter()) {
            if alive {
                *px = self.rainbow.color(x, self.phase);
            }
        }
        pixels
    }

    /// Moves the rainbow one tick further.
    pub fn advance_phase(&mut self) {
        self.phase = self.phase.wrapping_add(1);
    }

    /// Ticks, encodes the new generation and advances the phase.
    pub fn next_frame(&mut self) -> (TickOutcome, Frame) {
        let outcome = self.tick();
        let frame = Frame::from_pixels(&self.colorize());
        self.advance_phase();
        (outcome, frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn session(same: u32, stable: u32, generations: u64, dead: u32) -> GameSession {
        GameSession {
            generation_count: generations,
            same_count: same,
            stable_count: stable,
            dead_count: dead,
            ..GameSession::default()
        }
    }

    #[test]
    fn classification_priority() {
        assert_eq!(Classification::of(3, 0, false), Classification::Dead);
        assert_eq!(Classification::of(0, 0, true), Classification::Dead);
        assert_eq!(Classification::of(4, 4, true), Classification::Unchanged);
        assert_eq!(Classification::of(4, 4, false), Classification::Stable);
        assert_eq!(Classification::of(4, 5, false), Classification::Active);
    }

    #[test]
    fn freeze_thresholds_are_strict() {
        let policy = FreezePolicy::default();
        assert!(!policy.should_freeze(&session(8, 0, 8, 0)));
        assert!(policy.should_freeze(&session(9, 0, 9, 0)));
        assert!(!policy.should_freeze(&session(0, 40, 40, 0)));
        assert!(policy.should_freeze(&session(0, 41, 41, 0)));
        assert!(!policy.should_freeze(&session(0, 0, 240, 0)));
        assert!(policy.should_freeze(&session(0, 0, 241, 0)));
    }

    #[test]
    fn respawn_threshold_is_inclusive() {
        let policy = FreezePolicy::default();
        assert!(!policy.should_respawn(&session(0, 0, 3, 3)));
        assert!(policy.should_respawn(&session(0, 0, 4, 4)));
    }

    #[test]
    fn streak_counters_stay_exclusive() {
        let mut s = GameSession::default();
        for class in [
            Classification::Stable,
            Classification::Stable,
            Classification::Unchanged,
            Classification::Dead,
            Classification::Active,
            Classification::Unchanged,
        ] {
            s.record(class, 0, 0);
            let nonzero = [s.dead_count, s.same_count, s.stable_count]
                .iter()
                .filter(|&&c| c != 0)
                .count();
            assert!(nonzero <= 1, "{s:?}");
        }
        assert_eq!(s.same_count, 1);
        assert_eq!(s.generation_count, 6);
    }

    #[test]
    fn blinker_counts_births_and_deaths() {
        let grid = Grid::with_alive([(10, 3), (11, 3), (12, 3)]);
        let mut engine = LifeEngine::from_grid(grid, Rainbow::default(), SmallRng::seed_from_u64(1));
        let outcome = engine.tick();
        assert_eq!(outcome.classification, Classification::Stable);
        assert!(engine.grid().get(11, 2) && engine.grid().get(11, 3) && engine.grid().get(11, 4));
        assert_eq!(engine.session().born(), 2);
        assert_eq!(engine.session().died(), 2);
        assert_eq!(engine.session().stable_count(), 1);
    }

    #[test]
    fn colorize_leaves_dead_cells_black() {
        let grid = Grid::with_alive([(0, 0)]);
        let engine = LifeEngine::from_grid(grid, Rainbow::default(), SmallRng::seed_from_u64(1));
        let pixels = engine.colorize();
        assert_eq!(pixels[0], crate::codec::Rgb565(0xF800));
        assert!(pixels[1..].iter().all(|&px| px == COLOR_BG));
    }

    #[test]
    fn next_frame_advances_phase_once() {
        let mut engine = LifeEngine::new(Rainbow::default(), SmallRng::seed_from_u64(3));
        assert_eq!(engine.phase(), 0);
        let (_, frame) = engine.next_frame();
        assert_eq!(frame.as_bytes().len(), crate::codec::FRAME_SIZE);
        assert_eq!(engine.phase(), 1);
    }

    #[test]
    fn next_frame_is_the_colorized_grid() {
        let mut engine = LifeEngine::new(Rainbow::new(1, 10), SmallRng::seed_from_u64(9));
        let mut twin = LifeEngine::new(Rainbow::new(1, 10), SmallRng::seed_from_u64(9));
        for _ in 0..12 {
            let (_, frame) = engine.next_frame();
            twin.tick();
            assert_eq!(frame, Frame::from_pixels(&twin.colorize()));
            twin.advance_phase();
        }
    }
}
