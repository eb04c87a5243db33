//! Analytic KL-divergence between two Normal distributions.
//!
//! For coordinates `P = N(μp, σp²)` and `Q = N(μq, σq²)`:
//!
//! `KL(P‖Q) = ½ [ σp²/σq² + (μq - μp)²/σq² + ln σq² - ln σp² - 1 ]`
//!
//! The formula is exact for any real means and positive scales; there is no
//! sampling-based fallback.
use ndarray::{ArrayD, IxDyn, Zip};

use crate::distributions::{
    core::validation::validate_broadcastable, errors::DistResult, normal::Normal,
};

impl Normal {
    /// `KL(self ‖ other)` per coordinate.
    ///
    /// The result has the broadcast of both batch shapes.
    ///
    /// # Errors
    /// [`DistError::ShapeMismatch`](crate::distributions::errors::DistError::ShapeMismatch)
    /// if the two batch shapes do not broadcast.
    pub fn kl_divergence(&self, other: &Normal) -> DistResult<ArrayD<f64>> {
        let shape = validate_broadcastable(
            "batch shapes of both distributions",
            &self.batch_shape,
            &other.batch_shape,
        )?;
        let mut out = ArrayD::<f64>::zeros(IxDyn(&shape));

        // Mahalanobis term: (μq - μp)² / σq².
        Zip::from(&mut out)
            .and_broadcast(self.mean())
            .and_broadcast(other.mean())
            .and_broadcast(other.precision())
            .for_each(|o, &mu_p, &mu_q, &prec_q| {
                let diff = mu_q - mu_p;
                *o = diff * diff * prec_q;
            });

        // ln σq² = -log_precision_q.
        Zip::from(&mut out)
            .and_broadcast(self.var())
            .and_broadcast(self.logvar())
            .and_broadcast(other.precision())
            .and_broadcast(other.log_precision())
            .for_each(|o, &var_p, &logvar_p, &prec_q, &log_prec_q| {
                *o = 0.5 * (var_p * prec_q + *o - log_prec_q - logvar_p - 1.0);
            });

        Ok(out)
    }
}
