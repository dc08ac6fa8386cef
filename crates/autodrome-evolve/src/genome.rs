//! A single driving episode: gene tape, car, and fitness.

use autodrome_engine::{Car, CarState, Track};

use crate::action;

/// How a genome entered the current generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Random,
    Crossover,
    RandomCrossover,
    Mutate,
    Best,
    ValueCrossover,
    SmoothCrossover,
}

impl Origin {
    pub const COUNT: usize = 7;

    pub const ALL: [Self; Self::COUNT] = [
        Self::Random,
        Self::Crossover,
        Self::RandomCrossover,
        Self::Mutate,
        Self::Best,
        Self::ValueCrossover,
        Self::SmoothCrossover,
    ];

    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Random => 0,
            Self::Crossover => 1,
            Self::RandomCrossover => 2,
            Self::Mutate => 3,
            Self::Best => 4,
            Self::ValueCrossover => 5,
            Self::SmoothCrossover => 6,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::Crossover => "crossover",
            Self::RandomCrossover => "random-cross",
            Self::Mutate => "mutate",
            Self::Best => "best",
            Self::ValueCrossover => "value-cross",
            Self::SmoothCrossover => "smooth-cross",
        }
    }
}

/// Car state captured when an episode's cursor first moves one gate into
/// its window. Harvested as the progenitor state for the next window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowSnapshot {
    /// Ticks elapsed when the snapshot was taken; also the length of the
    /// gene prefix that produced it.
    pub tick: usize,
    pub car: CarState,
}

/// A fixed-length action tape evaluated against one checkpoint window.
///
/// The genome owns its car and its gate cursor, so episodes are
/// independent and can run concurrently against a shared `&Track`.
#[derive(Debug, Clone)]
pub struct Genome {
    pub(crate) car: Car,
    pub(crate) genes: Vec<u8>,
    pub(crate) values: Vec<u16>,
    pub(crate) origin: Origin,
    pub(crate) fitness: f64,

    window_start: usize,
    cursor: usize,
    tick: usize,
    tick_time: f32,
    total_distance: f32,
    remaining_distance: f32,
    speeds: Vec<f32>,
    alive: bool,
    first_gate_pending: bool,
    snapshot: Option<WindowSnapshot>,
    success: bool,
}

impl Genome {
    /// Creates a blank genome for the window of `track.step_width()`
    /// gates starting at `window_start`, seeded with `car` as the
    /// episode's initial state.
    ///
    /// The tape length scales with the window distance so that a genome
    /// always has enough ticks to cover it at a quarter of top speed.
    ///
    /// # Panics
    ///
    /// Panics if the window extends past the last gate.
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    #[must_use]
    pub fn new(car: Car, track: &Track, tick_rate: f32, window_start: usize) -> Self {
        let centers = track.gate_centers();
        let mut total_distance = car.position().distance(centers[window_start]);
        for i in window_start..window_start + track.step_width() {
            total_distance += centers[i].distance(centers[i + 1]);
        }

        let tick_time = 1.0 / tick_rate;
        let len = (total_distance / (Car::MAX_SPEED * tick_time / 4.0)) as usize;

        Self {
            car,
            genes: vec![0; len],
            values: vec![1; len],
            origin: Origin::Random,
            fitness: 0.0,
            window_start,
            cursor: window_start,
            tick: 0,
            tick_time,
            total_distance,
            remaining_distance: total_distance,
            speeds: Vec::new(),
            alive: true,
            first_gate_pending: true,
            snapshot: None,
            success: false,
        }
    }

    #[must_use]
    pub fn genes(&self) -> &[u8] {
        &self.genes
    }

    #[must_use]
    pub fn values(&self) -> &[u16] {
        &self.values
    }

    #[must_use]
    pub fn origin(&self) -> Origin {
        self.origin
    }

    #[must_use]
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// True once the episode crossed its whole window.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.success
    }

    #[must_use]
    pub fn snapshot(&self) -> Option<&WindowSnapshot> {
        self.snapshot.as_ref()
    }

    #[must_use]
    pub fn car(&self) -> &Car {
        &self.car
    }

    /// Simulated episode time in seconds.
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn elapsed_time(&self) -> f32 {
        self.tick as f32 * self.tick_time
    }

    #[must_use]
    pub fn avg_speed(&self) -> f32 {
        autodrome_stats::Summary::new(self.speeds.iter().copied()).map_or(0.0, |s| s.mean)
    }

    /// Advances the episode by one tick; no-op once terminated.
    ///
    /// Decodes the current gene, moves the car, refreshes vision on the
    /// adaptive budget, then checks termination: collision or tape
    /// exhaustion ends the episode; crossing the final window gate after
    /// a mid-window snapshot ends it successfully.
    pub fn update(&mut self, track: &Track) {
        if !self.alive {
            return;
        }

        action::apply_action(self.genes[self.tick], &mut self.car, self.tick_time);
        self.tick += 1;
        self.car.advance(self.tick_time);
        self.speeds.push(self.car.speed());
        self.car.update_vision_budgeted(f64::from(self.tick_time), track);

        if self.car.is_collision() || self.tick + 1 >= self.genes.len() {
            self.finish(track);
        } else if track.on_gate(&mut self.cursor, self.car.position(), Car::WIDTH) {
            if self.cursor == self.window_start + 1 {
                self.snapshot = Some(WindowSnapshot {
                    tick: self.tick,
                    car: self.car.state(),
                });
            }

            if self.cursor == self.window_start + track.step_width()
                && !self.first_gate_pending
                && self.snapshot.is_some()
            {
                self.success = true;
                self.finish(track);
            }

            self.first_gate_pending = false;
        }
    }

    /// Runs [`Genome::update`] until the episode terminates.
    pub fn run(&mut self, track: &Track) {
        while self.alive {
            self.update(track);
        }
    }

    fn finish(&mut self, track: &Track) {
        self.fitness = self.compute_fitness(track);
        self.cursor = self.window_start;
        self.alive = false;
    }

    /// Distance covered, minus time spent, plus an average-speed bonus
    /// for successful episodes. Roughly within `[-1, 2]`.
    #[expect(clippy::cast_precision_loss)]
    fn compute_fitness(&mut self, track: &Track) -> f64 {
        let centers = track.gate_centers();
        let mut remaining = self.car.position().distance(centers[self.cursor]);
        for i in self.cursor..self.window_start + track.step_width() {
            remaining += centers[i].distance(centers[i + 1]);
        }
        self.remaining_distance = remaining.min(self.total_distance);

        let distance_points = f64::from(1.0 - self.remaining_distance / self.total_distance);
        let time_points = self.tick as f64 / self.genes.len() as f64;
        let speed_points = if self.success {
            f64::from(self.avg_speed() / Car::MAX_SPEED)
        } else {
            0.0
        };

        distance_points + speed_points - time_points
    }

    /// Fixed report vector: fitness, remaining distance, elapsed time,
    /// ticks run, average speed.
    #[must_use]
    #[expect(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn telemetry(&self) -> [f32; 5] {
        [
            self.fitness as f32,
            self.remaining_distance,
            self.elapsed_time(),
            self.tick as f32,
            self.avg_speed(),
        ]
    }
}
