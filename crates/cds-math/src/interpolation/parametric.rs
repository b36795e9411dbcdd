//! Parametric yield curve models.
//!
//! This module provides parametric models for yield curve fitting:
//! - Nelson-Siegel: 4-parameter model
//! - Svensson: 6-parameter extension
//!
//! These models are used for curve fitting rather than point-by-point interpolation.

use crate::error::{MathError, MathResult};
use crate::interpolation::Interpolator;

/// Nelson-Siegel yield curve model.
///
/// The model parameterizes the zero rate curve as:
/// ```text
/// z(t) = β₀ + β₁ * ((1 - e^(-t/τ)) / (t/τ))
///           + β₂ * ((1 - e^(-t/τ)) / (t/τ) - e^(-t/τ))
/// ```
///
/// Where:
/// - β₀: Long-term level (asymptotic zero rate)
/// - β₁: Short-term component (slope)
/// - β₂: Medium-term component (curvature/hump)
/// - τ: Decay factor (controls where the hump occurs)
///
/// # Financial Interpretation
///
/// - β₀: Long-run equilibrium rate
/// - β₀ + β₁: Instantaneous short rate (as t → 0)
/// - β₂ > 0: Hump in curve; β₂ < 0: U-shape
/// - τ: Time to maximum hump effect (~2-3 years typical)
///
/// # Example
///
/// ```rust
/// use cds_math::interpolation::{NelsonSiegel, Interpolator};
///
/// // Create a typical upward-sloping curve
/// let ns = NelsonSiegel::new(
///     0.045,  // β₀: 4.5% long rate
///     -0.02,  // β₁: negative for upward slope
///     0.01,   // β₂: slight hump
///     2.0,    // τ: 2 years
/// ).unwrap();
///
/// let short_rate = ns.interpolate(0.25).unwrap();
/// let long_rate = ns.interpolate(30.0).unwrap();
/// assert!(short_rate < long_rate);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct NelsonSiegel {
    /// Long-term level
    beta0: f64,
    /// Short-term component
    beta1: f64,
    /// Medium-term component
    beta2: f64,
    /// Decay factor
    tau: f64,
}

impl NelsonSiegel {
    /// Creates a new Nelson-Siegel curve.
    ///
    /// # Arguments
    ///
    /// * `beta0` - Long-term level (asymptotic rate)
    /// * `beta1` - Short-term component
    /// * `beta2` - Medium-term component (hump)
    /// * `tau` - Decay factor (must be positive)
    ///
    /// # Errors
    ///
    /// Returns an error if tau is not positive.
    pub fn new(beta0: f64, beta1: f64, beta2: f64, tau: f64) -> MathResult<Self> {
        if tau <= 0.0 {
            return Err(MathError::invalid_input(format!(
                "tau must be positive, got {tau}"
            )));
        }

        Ok(Self {
            beta0,
            beta1,
            beta2,
            tau,
        })
    }

    /// Returns the instantaneous forward rate at time t.
    ///
    /// ```text
    /// f(t) = β₀ + β₁ * e^(-t/τ) + β₂ * (t/τ) * e^(-t/τ)
    /// ```
    pub fn forward_rate(&self, t: f64) -> f64 {
        if t <= 0.0 {
            return self.beta0 + self.beta1;
        }

        let x = t / self.tau;
        let exp_x = (-x).exp();

        self.beta0 + self.beta1 * exp_x + self.beta2 * x * exp_x
    }

    /// Returns the model parameters as (β₀, β₁, β₂, τ).
    pub fn parameters(&self) -> (f64, f64, f64, f64) {
        (self.beta0, self.beta1, self.beta2, self.tau)
    }

    /// Helper function: (1 - e^(-x)) / x
    fn loading_factor_1(x: f64) -> f64 {
        if x.abs() < 1e-10 {
            1.0 - x / 2.0 + x * x / 6.0 // Taylor expansion for numerical stability
        } else {
            (1.0 - (-x).exp()) / x
        }
    }

    /// Helper function: (1 - e^(-x)) / x - e^(-x)
    fn loading_factor_2(x: f64) -> f64 {
        if x.abs() < 1e-10 {
            x / 2.0 - x * x / 3.0 // Taylor expansion for numerical stability
        } else {
            Self::loading_factor_1(x) - (-x).exp()
        }
    }
}

impl Interpolator for NelsonSiegel {
    fn interpolate(&self, t: f64) -> MathResult<f64> {
        if t <= 0.0 {
            // As t → 0, z(t) → β₀ + β₁
            return Ok(self.beta0 + self.beta1);
        }

        let x = t / self.tau;

        let z = self.beta0
            + self.beta1 * Self::loading_factor_1(x)
            + self.beta2 * Self::loading_factor_2(x);

        Ok(z)
    }

    fn derivative(&self, t: f64) -> MathResult<f64> {
        if t <= 0.0 {
            return Ok(0.0);
        }

        let x = t / self.tau;
        let exp_x = (-x).exp();

        // dz/dt = (1/τ) * [β₁ * d(L1)/dx + β₂ * d(L2)/dx]
        // where L1 = (1 - e^(-x))/x and L2 = L1 - e^(-x)

        // d(L1)/dx = (e^(-x) - L1) / x
        let l1 = Self::loading_factor_1(x);
        let dl1 = (exp_x - l1) / x;

        // d(L2)/dx = d(L1)/dx + e^(-x)
        let dl2 = dl1 + exp_x;

        let dz_dx = self.beta1 * dl1 + self.beta2 * dl2;

        Ok(dz_dx / self.tau)
    }

    fn allows_extrapolation(&self) -> bool {
        true // Parametric model works for any t > 0
    }

    fn min_x(&self) -> f64 {
        0.0
    }

    fn max_x(&self) -> f64 {
        f64::INFINITY
    }
}

/// Svensson yield curve model.
///
/// An extension of Nelson-Siegel with an additional hump term:
/// ```text
/// z(t) = β₀ + β₁ * ((1 - e^(-t/τ₁)) / (t/τ₁))
///           + β₂ * ((1 - e^(-t/τ₁)) / (t/τ₁) - e^(-t/τ₁))
///           + β₃ * ((1 - e^(-t/τ₂)) / (t/τ₂) - e^(-t/τ₂))
/// ```
///
/// The extra term (β₃, τ₂) allows for a second hump in the curve,
/// providing more flexibility for fitting complex curve shapes.
///
/// # Example
///
/// ```rust
/// use cds_math::interpolation::{Svensson, Interpolator};
///
/// // Create a curve with two humps
/// let sv = Svensson::new(
///     0.045,  // β₀: 4.5% long rate
///     -0.02,  // β₁: upward slope
///     0.01,   // β₂: first hump
///     -0.005, // β₃: second (negative) hump
///     2.0,    // τ₁: 2 years for first hump
///     8.0,    // τ₂: 8 years for second hump
/// ).unwrap();
///
/// let rate = sv.interpolate(5.0).unwrap();
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Svensson {
    /// Long-term level
    beta0: f64,
    /// Short-term component
    beta1: f64,
    /// First hump component
    beta2: f64,
    /// Second hump component
    beta3: f64,
    /// First decay factor
    tau1: f64,
    /// Second decay factor
    tau2: f64,
}

impl Svensson {
    /// Creates a new Svensson curve.
    ///
    /// # Arguments
    ///
    /// * `beta0` - Long-term level
    /// * `beta1` - Short-term component
    /// * `beta2` - First hump component
    /// * `beta3` - Second hump component
    /// * `tau1` - First decay factor (must be positive)
    /// * `tau2` - Second decay factor (must be positive)
    ///
    /// # Errors
    ///
    /// Returns an error if either tau is not positive.
    pub fn new(
        beta0: f64,
        beta1: f64,
        beta2: f64,
        beta3: f64,
        tau1: f64,
        tau2: f64,
    ) -> MathResult<Self> {
        if tau1 <= 0.0 {
            return Err(MathError::invalid_input(format!(
                "tau1 must be positive, got {tau1}"
            )));
        }
        if tau2 <= 0.0 {
            return Err(MathError::invalid_input(format!(
                "tau2 must be positive, got {tau2}"
            )));
        }

        Ok(Self {
            beta0,
            beta1,
            beta2,
            beta3,
            tau1,
            tau2,
        })
    }

    /// Returns the instantaneous forward rate at time t.
    pub fn forward_rate(&self, t: f64) -> f64 {
        if t <= 0.0 {
            return self.beta0 + self.beta1;
        }

        let x1 = t / self.tau1;
        let x2 = t / self.tau2;
        let exp_x1 = (-x1).exp();
        let exp_x2 = (-x2).exp();

        self.beta0 + self.beta1 * exp_x1 + self.beta2 * x1 * exp_x1 + self.beta3 * x2 * exp_x2
    }

    /// Returns the model parameters as (β₀, β₁, β₂, β₃, τ₁, τ₂).
    pub fn parameters(&self) -> (f64, f64, f64, f64, f64, f64) {
        (
            self.beta0, self.beta1, self.beta2, self.beta3, self.tau1, self.tau2,
        )
    }

    /// Helper function: (1 - e^(-x)) / x
    fn loading_factor_1(x: f64) -> f64 {
        if x.abs() < 1e-10 {
            1.0 - x / 2.0 + x * x / 6.0
        } else {
            (1.0 - (-x).exp()) / x
        }
    }

    /// Helper function: (1 - e^(-x)) / x - e^(-x)
    fn loading_factor_2(x: f64) -> f64 {
        if x.abs() < 1e-10 {
            x / 2.0 - x * x / 3.0
        } else {
            Self::loading_factor_1(x) - (-x).exp()
        }
    }
}

impl Interpolator for Svensson {
    fn interpolate(&self, t: f64) -> MathResult<f64> {
        if t <= 0.0 {
            return Ok(self.beta0 + self.beta1);
        }

        let x1 = t / self.tau1;
        let x2 = t / self.tau2;

        let z = self.beta0
            + self.beta1 * Self::loading_factor_1(x1)
            + self.beta2 * Self::loading_factor_2(x1)
            + self.beta3 * Self::loading_factor_2(x2);

        Ok(z)
    }

    fn derivative(&self, t: f64) -> MathResult<f64> {
        if t <= 0.0 {
            return Ok(0.0);
        }

        let x1 = t / self.tau1;
        let x2 = t / self.tau2;
        let exp_x1 = (-x1).exp();
        let exp_x2 = (-x2).exp();

        // Derivatives of loading factors
        let l1_1 = Self::loading_factor_1(x1);
        let dl1_1 = (exp_x1 - l1_1) / x1;
        let dl2_1 = dl1_1 + exp_x1;

        let l1_2 = Self::loading_factor_1(x2);
        let dl1_2 = (exp_x2 - l1_2) / x2;
        let dl2_2 = dl1_2 + exp_x2;

        let dz_dt = self.beta1 * dl1_1 / self.tau1
            + self.beta2 * dl2_1 / self.tau1
            + self.beta3 * dl2_2 / self.tau2;

        Ok(dz_dt)
    }

    fn allows_extrapolation(&self) -> bool {
        true
    }

    fn min_x(&self) -> f64 {
        0.0
    }

    fn max_x(&self) -> f64 {
        f64::INFINITY
    }
}
