//! Configuration of the mixture-weight fit.
use crate::{
    attachment::errors::{AttachmentError, AttachmentResult},
    optimization::bounded::BoundedOptions,
};

/// Default search interval for the mixture weight α.
pub const DEFAULT_MIXTURE_BOUNDS: (f64, f64) = (0.01, 0.99);

/// Validated options for [`fit_mixture`](super::mixture::fit_mixture).
///
/// Fields
/// ------
/// - `bounds`: `(lower, upper)` search interval for α, inside `(0, 1)`.
/// - `tol`: absolute argument tolerance of the Brent search.
/// - `max_iter`: iteration cap; reaching it fails the fit.
///
/// Default: `bounds = (0.01, 0.99)`, `tol = 1e-8`, `max_iter = 500`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MixtureOptions {
    pub bounds: (f64, f64),
    pub tol: f64,
    pub max_iter: usize,
}

impl MixtureOptions {
    /// Errors
    /// ------
    /// - [`AttachmentError::InvalidMixtureBounds`] unless `0 < lower < upper < 1`.
    /// - [`AttachmentError::InvalidOptions`] for a bad tolerance or iteration cap.
    pub fn new(bounds: (f64, f64), tol: f64, max_iter: usize) -> AttachmentResult<Self> {
        let (lower, upper) = bounds;
        if !(lower > 0.0 && upper < 1.0) {
            return Err(AttachmentError::InvalidMixtureBounds {
                lower,
                upper,
                reason: "Mixture weights must stay strictly inside (0, 1).",
            });
        }
        BoundedOptions::new(lower, upper, tol, max_iter)?;
        Ok(Self { bounds, tol, max_iter })
    }

    /// Solver options for the Brent search.
    pub fn bounded(&self) -> AttachmentResult<BoundedOptions> {
        Ok(BoundedOptions::new(self.bounds.0, self.bounds.1, self.tol, self.max_iter)?)
    }
}

impl Default for MixtureOptions {
    fn default() -> Self {
        Self { bounds: DEFAULT_MIXTURE_BOUNDS, tol: 1e-8, max_iter: 500 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::errors::OptError;

    #[test]
    // Purpose
    // -------
    // Bounds must lie strictly inside (0, 1); solver settings are checked by
    // the bounded solver's own validation.
    fn mixture_options_validate_bounds_and_solver_settings() {
        assert!(MixtureOptions::new((0.01, 0.99), 1e-8, 100).is_ok());
        assert!(matches!(
            MixtureOptions::new((0.0, 0.99), 1e-8, 100),
            Err(AttachmentError::InvalidMixtureBounds { .. })
        ));
        assert!(matches!(
            MixtureOptions::new((0.6, 0.4), 1e-8, 100),
            Err(AttachmentError::InvalidOptions(OptError::InvalidBounds { .. }))
        ));
        assert!(matches!(
            MixtureOptions::new((0.1, 0.9), 1e-8, 0),
            Err(AttachmentError::InvalidOptions(OptError::InvalidMaxIter { .. }))
        ));
        assert_eq!(MixtureOptions::default().bounded().map(|b| b.max_iter), Ok(500));
    }
}
