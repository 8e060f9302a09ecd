//! Right-hand side of the homogeneous reactor ODE system.
//!
//! State `y = [T, Y_0, ..., Y_{N-2}]`, derivative `dy` of the same shape. One evaluation:
//! concentrations -> rates of progress -> pressure modification -> net production rates ->
//! temperature and mass fraction derivatives.
//!
//! Two operation modes are two strategies behind [`ReactorRHS`]: [`ConstantPressure`] holds the
//! pressure, [`ConstantVolume`] the density. The mode is chosen once (see `reactor_config`)
//! and wrapped in the [`Reactor`] enum.
use crate::Kinetics::mechanism::Mechanism;
use crate::Kinetics::pressure_modification::get_rxn_pres_mod;
use crate::Kinetics::rate_constants::eval_rxn_rates;
use crate::Kinetics::species_rates::eval_spec_rates;
use crate::ReactorsIVP::concentrations::{eval_conc, eval_conc_rho};
use crate::Thermodynamics::DBhandlers::NASAdata::{eval_cp, eval_cv, eval_h, eval_u};
use enum_dispatch::enum_dispatch;
use nalgebra::DVector;
use rayon::prelude::*;
use std::sync::Arc;

/// Scratch arrays of one evaluation. Owned by the caller and reused between calls; every
/// array is fully overwritten before it is read.
#[derive(Debug, Clone, PartialEq)]
pub struct Workspace {
    /// concentrations, kmol/m^3 [N]
    pub conc: Vec<f64>,
    /// forward rates of progress [n_reactions]
    pub fwd: Vec<f64>,
    /// reverse rates of progress [n_reversible]
    pub rev: Vec<f64>,
    /// pressure modifications [n_pres_mod]
    pub pres_mod: Vec<f64>,
    /// G/RT of every species [N]
    pub g_RT: Vec<f64>,
    /// cp or cv of every species [N]
    pub heat_capacity: Vec<f64>,
    /// h or u of every species [N]
    pub energy: Vec<f64>,
}

impl Workspace {
    pub fn new(mech: &Mechanism) -> Self {
        let n = mech.n_species();
        Self {
            conc: vec![0.0; n],
            fwd: vec![0.0; mech.n_reactions()],
            rev: vec![0.0; mech.n_reversible()],
            pres_mod: vec![0.0; mech.n_pres_mod()],
            g_RT: vec![0.0; n],
            heat_capacity: vec![0.0; n],
            energy: vec![0.0; n],
        }
    }
}

/// kinetics shared by both modes: net molar production rates into `dY` [N-1]
#[inline]
fn production_rates(mech: &Mechanism, T: f64, P: f64, dY: &mut [f64], ws: &mut Workspace) {
    eval_rxn_rates(mech, T, &ws.conc, &mut ws.g_RT, &mut ws.fwd, &mut ws.rev);
    get_rxn_pres_mod(mech, T, P, &ws.conc, &mut ws.pres_mod);
    eval_spec_rates(mech, &ws.fwd, &ws.rev, &ws.pres_mod, dY);
}

/// Turns molar production rates in `dy[1..]` into mass fraction derivatives and writes the
/// temperature derivative -(Σ ṅ_i·e_i·M_i)/(rho·c_avg), where c/e are cp/h or cv/u.
#[inline]
fn assemble(mech: &Mechanism, rho: f64, y: &[f64], y_N: f64, dy: &mut [f64], ws: &Workspace) {
    let n = mech.n_species();
    let mw = &mech.molar_masses;
    let c = &ws.heat_capacity;
    let e = &ws.energy;
    let mut c_avg = 0.0;
    for i in 0..n - 1 {
        c_avg += c[i] * y[i + 1];
    }
    c_avg += c[n - 1] * y_N;

    let mut sum = 0.0;
    for i in 0..n - 1 {
        sum += dy[i + 1] * e[i] * mw[i];
    }
    dy[0] = (-1.0 / (rho * c_avg)) * sum;
    for i in 0..n - 1 {
        dy[i + 1] *= mw[i] / rho;
    }
}

/// Constant-pressure right-hand side at pressure `pressure`, Pa. `t` is unused: the system is
/// autonomous.
pub fn dydt_conp(mech: &Mechanism, _t: f64, pressure: f64, y: &[f64], dy: &mut [f64], ws: &mut Workspace) {
    let n = mech.n_species();
    let T = y[0];
    let state = eval_conc(mech, T, pressure, &y[1..n], &mut ws.conc);
    production_rates(mech, T, pressure, &mut dy[1..n], ws);
    eval_cp(&mech.thermo, &mech.molar_masses, T, &mut ws.heat_capacity);
    eval_h(&mech.thermo, &mech.molar_masses, T, &mut ws.energy);
    assemble(mech, state.rho, y, state.y_N, dy, ws);
}

/// Constant-volume right-hand side at density `density`, kg/m^3.
pub fn dydt_conv(mech: &Mechanism, _t: f64, density: f64, y: &[f64], dy: &mut [f64], ws: &mut Workspace) {
    let n = mech.n_species();
    let T = y[0];
    let state = eval_conc_rho(mech, T, density, &y[1..n], &mut ws.conc);
    production_rates(mech, T, state.pres, &mut dy[1..n], ws);
    eval_cv(&mech.thermo, &mech.molar_masses, T, &mut ws.heat_capacity);
    eval_u(&mech.thermo, &mech.molar_masses, T, &mut ws.energy);
    assemble(mech, density, y, state.y_N, dy, ws);
}

/// Right-hand side of a reactor model with a fixed operation mode
#[enum_dispatch]
pub trait ReactorRHS {
    fn mechanism(&self) -> &Mechanism;
    /// writes dy/dt at state `y` into `dy`; both have length n_species
    fn evaluate(&self, t: f64, y: &[f64], dy: &mut [f64], ws: &mut Workspace);
    /// scratch arrays sized for the mechanism
    fn workspace(&self) -> Workspace {
        Workspace::new(self.mechanism())
    }
    /// form for integrators working on nalgebra vectors; only the returned vector is allocated
    fn rhs(&self, t: f64, y: &DVector<f64>, ws: &mut Workspace) -> DVector<f64> {
        let mut dy = DVector::zeros(y.len());
        self.evaluate(t, y.as_slice(), dy.as_mut_slice(), ws);
        dy
    }
}

#[derive(Debug, Clone)]
pub struct ConstantPressure {
    pub mech: Arc<Mechanism>,
    /// Pa
    pub pressure: f64,
}

impl ConstantPressure {
    pub fn new(mech: Arc<Mechanism>, pressure: f64) -> Self {
        Self { mech, pressure }
    }
}

impl ReactorRHS for ConstantPressure {
    fn mechanism(&self) -> &Mechanism {
        &self.mech
    }
    fn evaluate(&self, t: f64, y: &[f64], dy: &mut [f64], ws: &mut Workspace) {
        dydt_conp(&self.mech, t, self.pressure, y, dy, ws)
    }
}

#[derive(Debug, Clone)]
pub struct ConstantVolume {
    pub mech: Arc<Mechanism>,
    /// kg/m^3
    pub density: f64,
}

impl ConstantVolume {
    pub fn new(mech: Arc<Mechanism>, density: f64) -> Self {
        Self { mech, density }
    }
}

impl ReactorRHS for ConstantVolume {
    fn mechanism(&self) -> &Mechanism {
        &self.mech
    }
    fn evaluate(&self, t: f64, y: &[f64], dy: &mut [f64], ws: &mut Workspace) {
        dydt_conv(&self.mech, t, self.density, y, dy, ws)
    }
}

#[enum_dispatch(ReactorRHS)]
#[derive(Debug, Clone)]
pub enum Reactor {
    ConstantPressure(ConstantPressure),
    ConstantVolume(ConstantVolume),
}

/// Evaluates the right-hand side for many independent states in parallel, one workspace per
/// rayon worker. Results equal serial evaluation bit for bit.
pub fn evaluate_batch<R: ReactorRHS + Sync>(reactor: &R, t: f64, states: &[Vec<f64>]) -> Vec<Vec<f64>> {
    states
        .par_iter()
        .map_init(
            || reactor.workspace(),
            |ws, y| {
                let mut dy = vec![0.0; y.len()];
                reactor.evaluate(t, y, &mut dy, ws);
                dy
            },
        )
        .collect()
}
