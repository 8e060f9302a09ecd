//! Pressure modification of third-body and falloff reactions.
//!
//! For every pressure-dependent reaction (in ascending reaction order) the factor that
//! multiplies its net rate of progress:
//! - third body: the effective collider concentration [M] = P/(R·T) + Σ (eff_i - 1)·C_i
//! - Lindemann: Pr/(1+Pr), with reduced pressure Pr = k0·[M]/k_inf
//! - Troe: F·Pr/(1+Pr) with the Troe broadening factor F
use crate::Kinetics::mechanism::Mechanism;
use crate::Kinetics::mechanism::kinetics::{Blending, PressureDependence, PressureModifiedReaction};
use crate::Thermodynamics::DBhandlers::NASAdata::R_U;

/// Lower clamp of the arguments of log10 in the Troe form. Keeps F_cent = 0 or Pr = 0 finite.
pub const LOG10_ARGUMENT_FLOOR: f64 = 1e-300;

/// effective third-body concentration, kmol/m^3
#[inline]
pub fn third_body_concentration(rxn: &PressureModifiedReaction, total_conc: f64, conc: &[f64]) -> f64 {
    let mut thd = total_conc;
    for &(i, offset) in &rxn.efficiency_offsets {
        thd += offset * conc[i];
    }
    thd
}

/// Troe broadening factor F for centering factor `F_cent` and reduced pressure `Pr`
#[inline]
pub fn troe_broadening(F_cent: f64, Pr: f64) -> f64 {
    let logFcent = f64::log10(F_cent.max(LOG10_ARGUMENT_FLOOR));
    let logPr = f64::log10(Pr.max(LOG10_ARGUMENT_FLOOR));
    let A = logPr - 0.67 * logFcent - 0.4;
    let B = 0.806 - 1.1762 * logFcent - 0.14 * logPr;
    f64::powf(10.0, logFcent / (1.0 + A * A / (B * B)))
}

/// Fills `pres_mod` (one entry per pressure-modified reaction) at temperature `T`, K and
/// pressure `P`, Pa.
pub fn get_rxn_pres_mod(mech: &Mechanism, T: f64, P: f64, conc: &[f64], pres_mod: &mut [f64]) {
    let logT = T.ln();
    let total_conc = P / (R_U * T);
    for (pm, rxn) in pres_mod.iter_mut().zip(&mech.pres_mod) {
        let thd = third_body_concentration(rxn, total_conc, conc);
        *pm = match &rxn.kind {
            PressureDependence::ThirdBody => thd,
            PressureDependence::Falloff {
                low,
                high,
                blending,
            } => {
                let Pr = low.K_const(T, logT) * thd / high.K_const(T, logT);
                let lindemann = Pr / (1.0 + Pr);
                match blending {
                    Blending::Lindemann => lindemann,
                    Blending::Troe(troe) => troe_broadening(troe.F_cent(T), Pr) * lindemann,
                }
            }
        };
    }
}
