//! SA configuration and cooling schedules.

/// Cooling schedule mapping a step index to a temperature.
///
/// Every schedule is strictly decreasing over the step budget, starts at
/// the initial temperature on step 0 and reaches the minimum temperature
/// on the last step. Since the minimum temperature must be positive, the
/// temperature never reaches zero.
///
/// # References
///
/// - Geometric: Kirkpatrick et al. (1983), exponential interpolation
/// - Linear: fixed-duration cooling
/// - LundyMees: Lundy & Mees (1986), with convergence proof
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CoolingSchedule {
    /// Geometric (exponential) interpolation:
    /// `T_k = T_0 * (T_min / T_0)^(k / (N - 1))`.
    ///
    /// Equivalent to a constant per-step factor derived from the budget.
    #[default]
    Geometric,

    /// Linear cooling: `T_k = T_0 - k * (T_0 - T_min) / (N - 1)`.
    ///
    /// Temperature decreases uniformly.
    Linear,

    /// Lundy-Mees cooling: `T_k = T_0 / (1 + beta * k * T_0)`, with
    /// `beta = (T_0 - T_min) / ((N - 1) * T_0 * T_min)`.
    ///
    /// Cools fast at high T, slow at low T.
    ///
    /// Reference: Lundy & Mees (1986)
    LundyMees,
}

impl CoolingSchedule {
    /// Temperature at `step` of a `steps`-long run cooling from
    /// `initial` to `min`.
    pub fn temperature(&self, step: usize, steps: usize, initial: f64, min: f64) -> f64 {
        if steps <= 1 {
            return initial;
        }
        let last = (steps - 1) as f64;
        let k = step.min(steps - 1) as f64;

        match self {
            CoolingSchedule::Geometric => initial * (min / initial).powf(k / last),
            CoolingSchedule::Linear => initial - (initial - min) * k / last,
            CoolingSchedule::LundyMees => {
                let beta = (initial - min) / (last * initial * min);
                initial / (1.0 + beta * k * initial)
            }
        }
    }
}

/// Configuration for the Simulated Annealing algorithm.
///
/// Defaults mirror the classic `simanneal` settings: `T_0 = 25000`,
/// `T_min = 2.5`, 50 000 steps, 100 progress updates.
///
/// # Examples
///
/// ```
/// use u_anneal_route::sa::{SaConfig, CoolingSchedule};
///
/// let config = SaConfig::default()
///     .with_initial_temperature(100.0)
///     .with_min_temperature(0.001)
///     .with_cooling(CoolingSchedule::Linear)
///     .with_steps(20_000)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaConfig {
    /// Temperature on the first step. Higher values allow more exploration.
    pub initial_temperature: f64,

    /// Temperature on the last step. Must be positive.
    pub min_temperature: f64,

    /// Cooling schedule.
    pub cooling: CoolingSchedule,

    /// Exact number of steps (perturb/evaluate/decide cycles).
    pub steps: usize,

    /// Number of evenly spaced progress reports over the run. 0 disables
    /// them; the best-cost history is sampled at the same points.
    pub progress_updates: usize,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for SaConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 25_000.0,
            min_temperature: 2.5,
            cooling: CoolingSchedule::default(),
            steps: 50_000,
            progress_updates: 100,
            seed: None,
        }
    }
}

impl SaConfig {
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_min_temperature(mut self, t: f64) -> Self {
        self.min_temperature = t;
        self
    }

    pub fn with_cooling(mut self, cooling: CoolingSchedule) -> Self {
        self.cooling = cooling;
        self
    }

    pub fn with_steps(mut self, n: usize) -> Self {
        self.steps = n;
        self
    }

    pub fn with_progress_updates(mut self, n: usize) -> Self {
        self.progress_updates = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Temperature at the given step under this configuration.
    pub fn temperature_at(&self, step: usize) -> f64 {
        self.cooling.temperature(
            step,
            self.steps,
            self.initial_temperature,
            self.min_temperature,
        )
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !self.initial_temperature.is_finite() || self.initial_temperature <= 0.0 {
            return Err(format!(
                "initial_temperature must be positive and finite, got {}",
                self.initial_temperature
            ));
        }
        if !self.min_temperature.is_finite() || self.min_temperature <= 0.0 {
            return Err(format!(
                "min_temperature must be positive and finite, got {}",
                self.min_temperature
            ));
        }
        if self.min_temperature >= self.initial_temperature {
            return Err("min_temperature must be less than initial_temperature".into());
        }
        Ok(())
    }
}
