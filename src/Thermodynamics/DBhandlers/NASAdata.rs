//! NASA 7-coefficient polynomial fits of ideal gas thermodynamic properties.
//!
//! Every species carries two sets of 7 coefficients `a0..a6`, one for the range
//! below (or at) the breakpoint temperature `T_mid` and one above it:
//!
//! - Cp/R  = a0 + a1*T + a2*T^2 + a3*T^3 + a4*T^4
//! - H/R   = a0*T + a1*T^2/2 + a2*T^3/3 + a3*T^4/4 + a4*T^5/5 + a5
//! - S/R   = a0*ln(T) + a1*T + a2*T^2/2 + a3*T^3/3 + a4*T^4/4 + a6
//! - G/RT  = H/RT - S/R
//!
//! All polynomials are evaluated with Horner's scheme. Temperatures outside the fitted range
//! are extrapolated silently: keeping the state inside the validity range is the integrator's job.
//!
//! The array evaluators (`eval_cp`, `eval_cv`, `eval_h`, `eval_u`, `eval_g_RT`) return mass-specific
//! quantities (J/(kg·K), J/kg) for all species of a mechanism in species order.
#![allow(non_snake_case)]
use serde::{Deserialize, Serialize};

/// Universal gas constant, J/(kmol·K)
pub const R_U: f64 = 8.31446210e3;

fn default_T_mid() -> f64 {
    1000.0
}

/// NASA7 fit of one species: breakpoint temperature and low/high range coefficients
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct NASA7 {
    /// breakpoint temperature between low and high ranges, K
    #[serde(default = "default_T_mid")]
    pub T_mid: f64,
    /// coefficients for T <= T_mid
    pub low: [f64; 7],
    /// coefficients for T > T_mid
    pub high: [f64; 7],
}

impl NASA7 {
    pub fn new(T_mid: f64, low: [f64; 7], high: [f64; 7]) -> Self {
        Self { T_mid, low, high }
    }
    /// coefficients valid at temperature T
    #[inline]
    pub fn coeffs(&self, T: f64) -> &[f64; 7] {
        if T <= self.T_mid { &self.low } else { &self.high }
    }
    /// dimensionless heat capacity Cp/R
    #[inline]
    pub fn Cp_R(&self, T: f64) -> f64 {
        let a = self.coeffs(T);
        a[0] + T * (a[1] + T * (a[2] + T * (a[3] + a[4] * T)))
    }
    /// dimensionless heat capacity at constant volume Cv/R = Cp/R - 1
    #[inline]
    pub fn Cv_R(&self, T: f64) -> f64 {
        let a = self.coeffs(T);
        (a[0] - 1.0) + T * (a[1] + T * (a[2] + T * (a[3] + a[4] * T)))
    }
    /// enthalpy divided by R, K
    #[inline]
    pub fn h_R(&self, T: f64) -> f64 {
        let a = self.coeffs(T);
        a[5] + T * (a[0] + T * (a[1] / 2.0 + T * (a[2] / 3.0 + T * (a[3] / 4.0 + a[4] * T / 5.0))))
    }
    /// internal energy divided by R, K
    #[inline]
    pub fn u_R(&self, T: f64) -> f64 {
        let a = self.coeffs(T);
        a[5]
            + T * ((a[0] - 1.0)
                + T * (a[1] / 2.0 + T * (a[2] / 3.0 + T * (a[3] / 4.0 + a[4] * T / 5.0))))
    }
    /// dimensionless entropy S/R
    #[inline]
    pub fn s_R(&self, T: f64) -> f64 {
        let a = self.coeffs(T);
        a[0] * T.ln() + T * (a[1] + T * (a[2] / 2.0 + T * (a[3] / 3.0 + a[4] * T / 4.0))) + a[6]
    }
    /// dimensionless Gibbs energy G/RT = H/RT - S/R; `logT` is ln(T), computed once by the caller
    #[inline]
    pub fn g_RT(&self, T: f64, logT: f64) -> f64 {
        let a = self.coeffs(T);
        a[0] * (1.0 - logT) - T * (a[1] / 2.0 + T * (a[2] / 6.0 + T * (a[3] / 12.0 + a[4] * T / 20.0)))
            + a[5] / T
            - a[6]
    }
}

/// mass-specific heat capacity at constant pressure of every species, J/(kg·K)
pub fn eval_cp(thermo: &[NASA7], molar_masses: &[f64], T: f64, cp: &mut [f64]) {
    for ((cp_i, poly), M) in cp.iter_mut().zip(thermo).zip(molar_masses) {
        *cp_i = (R_U / M) * poly.Cp_R(T);
    }
}

/// mass-specific heat capacity at constant volume of every species, J/(kg·K)
pub fn eval_cv(thermo: &[NASA7], molar_masses: &[f64], T: f64, cv: &mut [f64]) {
    for ((cv_i, poly), M) in cv.iter_mut().zip(thermo).zip(molar_masses) {
        *cv_i = (R_U / M) * poly.Cv_R(T);
    }
}

/// mass-specific enthalpy of every species, J/kg
pub fn eval_h(thermo: &[NASA7], molar_masses: &[f64], T: f64, h: &mut [f64]) {
    for ((h_i, poly), M) in h.iter_mut().zip(thermo).zip(molar_masses) {
        *h_i = (R_U / M) * poly.h_R(T);
    }
}

/// mass-specific internal energy of every species, J/kg
pub fn eval_u(thermo: &[NASA7], molar_masses: &[f64], T: f64, u: &mut [f64]) {
    for ((u_i, poly), M) in u.iter_mut().zip(thermo).zip(molar_masses) {
        *u_i = (R_U / M) * poly.u_R(T);
    }
}

/// dimensionless Gibbs energy G/RT of every species
pub fn eval_g_RT(thermo: &[NASA7], T: f64, g_RT: &mut [f64]) {
    let logT = T.ln();
    for (g, poly) in g_RT.iter_mut().zip(thermo) {
        *g = poly.g_RT(T, logT);
    }
}
