/// eng
/// The module turns mass fractions, temperature and either pressure or density into molar
/// concentrations of every species, the bath species included.
///
/// # Examples
/// ```
/// use ChemRHS::Kinetics::mechanism::Mechanism;
/// use ChemRHS::ReactorsIVP::concentrations::eval_conc;
/// let mech = Mechanism::h2o2_usc().unwrap();
/// let (y, P) = mech.default_state().unwrap();
/// let mut conc = vec![0.0; mech.n_species()];
/// let state = eval_conc(&mech, y[0], P, &y[1..], &mut conc);
/// assert!(state.rho > 0.0);
/// ```
#[allow(non_snake_case)]
pub mod concentrations;
/// eng
/// Right-hand side of the homogeneous reactor ODE system dy/dt = f(t, y) with
/// y = [T, Y_0, ..., Y_{N-2}], for a constant-pressure or a constant-volume reactor.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use ChemRHS::Kinetics::mechanism::Mechanism;
/// use ChemRHS::ReactorsIVP::dydt::{ConstantPressure, ReactorRHS};
/// let mech = Arc::new(Mechanism::h2o2_usc().unwrap());
/// let (y, P) = mech.default_state().unwrap();
/// let reactor = ConstantPressure::new(mech.clone(), P);
/// let mut ws = reactor.workspace();
/// let mut dy = vec![0.0; mech.state_len()];
/// reactor.evaluate(0.0, y, &mut dy, &mut ws);
/// // initiation is endothermic
/// assert!(dy[0] < 0.0);
/// ```
#[allow(non_snake_case)]
pub mod dydt;
/// reactor configuration file: mechanism source and operation mode
pub mod reactor_config;
