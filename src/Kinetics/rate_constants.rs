//! Forward and reverse rates of progress of every reaction.
//!
//! fwd_j = k_f(T)·Π C_i^ord_i for all reactions (k_f is the high-pressure limit for falloff
//! reactions); rev_j = k_r(T)·Π C_i^ν''_i for reversible reactions only, stored at the
//! reaction's reverse index. k_r is either explicit or k_f/Kc with
//! Kc = exp(-Σ ν_i g_i/RT)·(P_atm/(R·T))^Δν.
use crate::Kinetics::mechanism::{Mechanism, ReverseRate};
use crate::Thermodynamics::DBhandlers::NASAdata::{R_U, eval_g_RT};

/// standard pressure of the equilibrium constant, Pa
pub const P_ATM: f64 = 101325.0;

/// Π C_i^e_i with cheap paths for first and second order
#[inline]
pub fn conc_product(conc: &[f64], exponents: &[(usize, f64)]) -> f64 {
    let mut product = 1.0;
    for &(i, e) in exponents {
        let c = conc[i];
        product *= if e == 1.0 {
            c
        } else if e == 2.0 {
            c * c
        } else if e.fract() == 0.0 {
            c.powi(e as i32)
        } else {
            c.powf(e)
        };
    }
    product
}

/// equilibrium constant in concentration units of one reaction, given the species G/RT
#[inline]
pub fn equilibrium_constant(net_stoich: &[(usize, f64)], delta_nu: f64, g_RT: &[f64], C_atm: f64) -> f64 {
    let dG: f64 = net_stoich.iter().map(|&(i, nu)| nu * g_RT[i]).sum();
    let Kp = f64::exp(-dG);
    if delta_nu == 0.0 {
        Kp
    } else if delta_nu.fract() == 0.0 {
        Kp * C_atm.powi(delta_nu as i32)
    } else {
        Kp * C_atm.powf(delta_nu)
    }
}

/// Evaluates forward (`fwd`, one per reaction) and reverse (`rev`, one per reversible
/// reaction) rates of progress, kmol/(m^3 s). `g_RT` is scratch of length n_species.
/// Falloff and third-body corrections are applied later through the pressure modification.
pub fn eval_rxn_rates(
    mech: &Mechanism,
    T: f64,
    conc: &[f64],
    g_RT: &mut [f64],
    fwd: &mut [f64],
    rev: &mut [f64],
) {
    let logT = T.ln();
    if mech.n_reversible > 0 {
        eval_g_RT(&mech.thermo, T, g_RT);
    }
    let C_atm = P_ATM / (R_U * T);
    for (j, r) in mech.reactions.iter().enumerate() {
        let kf = r.rate.K_const(T, logT);
        fwd[j] = kf * conc_product(conc, &r.orders);
        if let Some(k) = r.rev_index {
            let kr = match &r.reverse {
                ReverseRate::Explicit(rate) => rate.K_const(T, logT),
                _ => kf / equilibrium_constant(&r.net_stoich, r.delta_nu, g_RT, C_atm),
            };
            rev[k] = kr * conc_product(conc, &r.products);
        }
    }
}
