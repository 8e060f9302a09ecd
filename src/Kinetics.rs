/// eng
/// The module compiles a reaction mechanism file into the immutable `Mechanism` structure:
/// species with their molar masses and NASA polynomials, reactions with unit-converted Arrhenius
/// parameters, third-body efficiencies, Lindemann/Troe falloff data and the sparse
/// stoichiometric table. The last species is the bath species.
///
/// # Examples
/// ```
/// use ChemRHS::Kinetics::mechanism::Mechanism;
/// let mech = Mechanism::h2o2_usc().unwrap();
/// println!("{} species, {} reactions", mech.n_species(), mech.n_reactions());
/// assert_eq!(mech.bath_species(), "N2");
/// ```
#[allow(non_snake_case)]
pub mod mechanism;
#[allow(non_snake_case)]
mod mechanism_tests;
/// eng
/// The module takes a reaction equation such as "H + O2 (+M) <=> HO2 (+M)" and produces the
/// stoichiometric coefficients of reactants and products, the reversibility of the reaction and
/// the kind of bath marker it carries ("+ M" third body or "(+M)" falloff).
///
/// # Examples
/// ```
/// use ChemRHS::Kinetics::stoichiometry_analyzer::{StoichAnalyzer, ThirdBodyMarker};
/// let analyzer = StoichAnalyzer::new().unwrap();
/// let eq = analyzer.parse("2H + M <=> H2 + M").unwrap();
/// assert_eq!(eq.marker, ThirdBodyMarker::ThirdBody);
/// assert_eq!(eq.reactants, vec![("H".to_string(), 2.0)]);
/// ```
pub mod stoichiometry_analyzer;
/// units of kinetic parameters and their conversion to m, kmol, s, K
#[allow(non_snake_case)]
pub mod units;
/// forward and reverse rates of progress, equilibrium constants
#[allow(non_snake_case)]
pub mod rate_constants;
/// third-body, Lindemann and Troe pressure modification
#[allow(non_snake_case)]
pub mod pressure_modification;
/// net species production rates
pub mod species_rates;
