//! # Ratekit Math
//!
//! Numerical building blocks for curve construction and pricing:
//!
//! - **Solvers**: Newton-Raphson, Brent, and a Newton/Brent hybrid with
//!   bounded iteration counts
//! - **Interpolation**: piecewise linear interpolation with configurable extrapolation
//! - **Distributions**: standard normal CDF and density

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::float_cmp)]

pub mod distributions;
pub mod error;
pub mod interpolation;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::distributions::{normal_cdf, normal_pdf};
    pub use crate::error::{MathError, MathResult};
    pub use crate::interpolation::{Extrapolation, Interpolator, LinearInterpolator};
    pub use crate::solvers::{
        brent, hybrid, hybrid_numerical, newton_raphson, newton_raphson_numerical, SolverConfig,
        SolverResult,
    };
}

pub use error::{MathError, MathResult};
