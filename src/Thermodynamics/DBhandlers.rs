/// NASA 7-coefficient polynomials: Cp, Cv, h, u, s and G/RT of ideal gas species
///
/// # Examples
/// ```
/// use ChemRHS::Thermodynamics::DBhandlers::NASAdata::NASA7;
/// // monatomic gas: Cp/R = 5/2 everywhere
/// let poly = NASA7::new(1000.0, [2.5, 0.0, 0.0, 0.0, 0.0, 2.547e4, -0.4467], [2.5, 0.0, 0.0, 0.0, 0.0, 2.547e4, -0.4467]);
/// assert_eq!(poly.Cp_R(1500.0), 2.5);
/// ```
pub mod NASAdata;
