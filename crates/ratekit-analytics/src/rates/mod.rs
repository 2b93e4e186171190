//! Interest rate derivatives on a single discount curve.
//!
//! Fixed legs accrue on 30E/360 and are discounted on the curve's
//! zero-rate interpolation.

mod swap;
mod swaption;

pub use swap::{basis_point_value, par_rate, swap_mtm, swap_proxy_duration, SwapDirection};
pub use swaption::{black76, swaption_price, Black76, SwaptionSpec, SwaptionValuation};
