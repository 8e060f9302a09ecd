//! Molar concentrations of all species from temperature, mass fractions and either pressure
//! (constant-pressure reactor) or density (constant-volume reactor).
//!
//! The mass fraction of the bath species is the complement 1 - ΣY_i; the mean molar mass is
//! 1/(ΣY_i/M_i) over all species including the bath.
use crate::Kinetics::mechanism::Mechanism;
use crate::Thermodynamics::DBhandlers::NASAdata::R_U;

/// mixture quantities derived while computing concentrations
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConcState {
    /// mass fraction of the bath species
    pub y_N: f64,
    /// mean molar mass, kg/kmol
    pub mw_avg: f64,
    /// density, kg/m^3
    pub rho: f64,
    /// pressure, Pa
    pub pres: f64,
}

/// bath mass fraction and mean molar mass
#[inline]
fn mean_molar_mass(mech: &Mechanism, Y: &[f64]) -> (f64, f64) {
    let n = mech.n_species();
    let mw = &mech.molar_masses;
    let mut y_N = 1.0;
    let mut inv_mw = 0.0;
    for (Y_i, M_i) in Y.iter().zip(&mw[..n - 1]) {
        y_N -= Y_i;
        inv_mw += Y_i / M_i;
    }
    inv_mw += y_N / mw[n - 1];
    (y_N, 1.0 / inv_mw)
}

#[inline]
fn fill_conc(mech: &Mechanism, rho: f64, Y: &[f64], y_N: f64, conc: &mut [f64]) {
    let n = mech.n_species();
    let mw = &mech.molar_masses;
    for ((c, Y_i), M_i) in conc.iter_mut().zip(Y).zip(&mw[..n - 1]) {
        *c = rho * Y_i / M_i;
    }
    conc[n - 1] = rho * y_N / mw[n - 1];
}

/// Constant pressure: concentrations (kmol/m^3) at temperature `T` (K), pressure `P` (Pa)
/// and the N-1 independent mass fractions `Y`; density from the ideal gas law.
pub fn eval_conc(mech: &Mechanism, T: f64, P: f64, Y: &[f64], conc: &mut [f64]) -> ConcState {
    let (y_N, mw_avg) = mean_molar_mass(mech, Y);
    let rho = P * mw_avg / (R_U * T);
    fill_conc(mech, rho, Y, y_N, conc);
    ConcState {
        y_N,
        mw_avg,
        rho,
        pres: P,
    }
}

/// Constant volume: concentrations (kmol/m^3) at temperature `T` (K), density `rho` (kg/m^3)
/// and the N-1 independent mass fractions `Y`; pressure from the ideal gas law.
pub fn eval_conc_rho(mech: &Mechanism, T: f64, rho: f64, Y: &[f64], conc: &mut [f64]) -> ConcState {
    let (y_N, mw_avg) = mean_molar_mass(mech, Y);
    let pres = rho * R_U * T / mw_avg;
    fill_conc(mech, rho, Y, y_N, conc);
    ConcState {
        y_N,
        mw_avg,
        rho,
        pres,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_pressure_round_trip() {
        let mech = Mechanism::h2o2_usc().unwrap();
        let (y, P) = mech.default_state().unwrap();
        let T = y[0];
        let mut conc = vec![0.0; mech.n_species()];
        let state = eval_conc(&mech, T, P, &y[1..], &mut conc);
        let total: f64 = conc.iter().sum();
        assert_relative_eq!(total * R_U * T, P, max_relative = 1e-12);
        let mass: f64 = conc.iter().zip(&mech.molar_masses).map(|(c, M)| c * M).sum();
        assert_relative_eq!(mass, state.rho, max_relative = 1e-12);
        assert_relative_eq!(state.y_N + y[1..].iter().sum::<f64>(), 1.0, max_relative = 1e-14);
        assert_relative_eq!(state.rho, P * state.mw_avg / (R_U * T), max_relative = 1e-14);
        // 2:1:3.76 H2/O2/N2, mean molar mass about 20.91 kg/kmol
        assert_relative_eq!(state.mw_avg, 20.9114, max_relative = 1e-4);
        assert!(state.rho > 0.25 && state.rho < 0.26);
    }

    #[test]
    fn test_density_round_trip() {
        let mech = Mechanism::h2o2_usc().unwrap();
        let (y, _) = mech.default_state().unwrap();
        let T = 1350.0;
        let rho = 2.5;
        let mut conc = vec![0.0; mech.n_species()];
        let state = eval_conc_rho(&mech, T, rho, &y[1..], &mut conc);
        let mass: f64 = conc.iter().zip(&mech.molar_masses).map(|(c, M)| c * M).sum();
        assert_relative_eq!(mass, rho, max_relative = 1e-12);
        let total: f64 = conc.iter().sum();
        assert_relative_eq!(total * R_U * T, state.pres, max_relative = 1e-12);

        // both modes agree on the same thermodynamic state
        let mut conc_p = vec![0.0; mech.n_species()];
        let back = eval_conc(&mech, T, state.pres, &y[1..], &mut conc_p);
        assert_relative_eq!(back.rho, rho, max_relative = 1e-12);
        for (a, b) in conc.iter().zip(&conc_p) {
            assert_relative_eq!(*a, *b, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_pure_bath() {
        let mech = Mechanism::h2o2_usc().unwrap();
        let n = mech.n_species();
        let Y = vec![0.0; n - 1];
        let mut conc = vec![1.0; n];
        let state = eval_conc(&mech, 300.0, 101325.0, &Y, &mut conc);
        assert_eq!(state.y_N, 1.0);
        assert_relative_eq!(state.mw_avg, mech.molar_masses[n - 1], max_relative = 1e-15);
        assert!(conc[..n - 1].iter().all(|&c| c == 0.0));
        assert_relative_eq!(conc[n - 1], 101325.0 / (R_U * 300.0), max_relative = 1e-14);
    }
}
