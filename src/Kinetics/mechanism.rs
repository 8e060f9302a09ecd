//! Reaction mechanism: the immutable data structure every evaluator works on.
//!
//! A mechanism file (JSON) is deserialized into [`MechanismData`] and compiled once into a
//! [`Mechanism`]: species are resolved to indices, kinetic parameters are converted to
//! SI-kmol units, every reaction gets its pressure-modification record and reverse-rate
//! index, and the sparse stoichiometric table used for the production rates is built.
//! All validation happens here; the evaluators trust the compiled structure.
//!
//! The last species of the file is the bath species. It must be inert, and its mass fraction
//! is implicit in the state vector.
pub mod kinetics;

use crate::Kinetics::stoichiometry_analyzer::{StoichAnalyzer, ThirdBodyMarker};
use crate::Kinetics::units::KineticUnits;
use crate::Thermodynamics::DBhandlers::NASAdata::NASA7;
use crate::Utils::load_from_file::{ConfigError, parse_mechanism};
use kinetics::{
    Arrhenius, Blending, ElementaryStruct, FalloffStruct, PressureDependence,
    PressureModifiedReaction, ThreeBodyStruct, Troe, efficiency_offsets,
};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// bundled mechanism file
pub const H2O2_USC_MECH2: &str = include_str!("../../data/h2o2_usc_mech2.json");
/// tolerance of the per-reaction mass balance, relative to Σ|ν|M
pub const MASS_BALANCE_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Error)]
pub enum MechanismError {
    #[error("mechanism has no species")]
    NoSpecies,
    #[error("species '{0}' is listed more than once")]
    DuplicateSpecies(String),
    #[error("species '{name}' has non-positive molar mass {molar_mass}")]
    InvalidMolarMass { name: String, molar_mass: f64 },
    #[error("reaction {index} '{eq}': unknown species '{species}'")]
    UnknownSpecies {
        index: usize,
        eq: String,
        species: String,
    },
    #[error("malformed reaction equation '{eq}': {reason}")]
    MalformedEquation { eq: String, reason: String },
    #[error("reaction {index} '{eq}' is declared as {declared} but {found}")]
    ReactionTypeMismatch {
        index: usize,
        eq: String,
        declared: ReactionType,
        found: String,
    },
    #[error("reaction {index} '{eq}': Troe blending needs 3 or 4 parameters, got {got}")]
    TroeParameters { index: usize, eq: String, got: usize },
    #[error("reaction {index} '{eq}' is irreversible but has explicit reverse parameters")]
    ReverseOnIrreversible { index: usize, eq: String },
    #[error("bath species '{species}' is not inert: reaction {index} '{eq}' changes it by {coeff}")]
    BathSpeciesNotInert {
        species: String,
        index: usize,
        eq: String,
        coeff: f64,
    },
    #[error("reaction {index} '{eq}' does not conserve mass (imbalance {imbalance} kg/kmol)")]
    MassImbalance {
        index: usize,
        eq: String,
        imbalance: f64,
    },
    #[error("composition: unknown species '{0}'")]
    UnknownStateSpecies(String),
    #[error("composition: {0}")]
    InvalidComposition(String),
    #[error(transparent)]
    Regex(#[from] regex::Error),
}
/////////////////////////////////////FILE FORMAT//////////////////////////////////////////////////
/// enum for types of rate constant functions
#[derive(Debug, PartialEq, Eq, Serialize, Clone, Copy)]
pub enum ReactionType {
    #[serde(rename = "elem")]
    Elem,
    #[serde(rename = "falloff")]
    Falloff,
    #[serde(rename = "three-body")]
    ThreeBody,
}

impl<'de> Deserialize<'de> for ReactionType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "elem" | "elementary" => Ok(ReactionType::Elem),
            "falloff" => Ok(ReactionType::Falloff),
            "three-body" | "threebody" | "three_body" => Ok(ReactionType::ThreeBody),
            _ => Err(serde::de::Error::custom(format!(
                "Unknown reaction type: {}",
                s
            ))),
        }
    }
}

impl fmt::Display for ReactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ReactionType::Elem => "elem",
            ReactionType::Falloff => "falloff",
            ReactionType::ThreeBody => "three-body",
        };
        write!(f, "{}", s)
    }
}

/// enum for structs of different types of kinetics
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum ReactionKinetics {
    Falloff(FalloffStruct),
    ThreeBody(ThreeBodyStruct),
    Elementary(ElementaryStruct),
}

/// struct for reaction data as written in a mechanism file
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ReactionData {
    #[serde(rename = "type")]
    pub reaction_type: ReactionType,
    pub eq: String,
    /// explicit reverse Arrhenius parameters, replacing the equilibrium constant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rev: Option<[f64; 3]>,
    /// forward reaction orders overriding the stoichiometric coefficients
    #[serde(default, alias = "react", skip_serializing_if = "Option::is_none")]
    pub orders: Option<HashMap<String, f64>>,
    #[serde(default)]
    pub duplicate: bool,
    #[serde(flatten)]
    pub data: ReactionKinetics,
}

impl ReactionData {
    /// checks that the `type` field matches the kinetic data found in the record
    pub fn validate_reaction_type(&self, index: usize) -> Result<(), MechanismError> {
        let found = match (&self.reaction_type, &self.data) {
            (ReactionType::Elem, ReactionKinetics::Elementary(_))
            | (ReactionType::ThreeBody, ReactionKinetics::ThreeBody(_))
            | (ReactionType::Falloff, ReactionKinetics::Falloff(_)) => return Ok(()),
            (_, ReactionKinetics::Elementary(_)) => "its data is elementary (no 'eff')",
            (_, ReactionKinetics::ThreeBody(_)) => "its data is three-body ('Arrhenius' with 'eff')",
            (_, ReactionKinetics::Falloff(_)) => "its data is falloff ('low_rate'/'high_rate')",
        };
        Err(MechanismError::ReactionTypeMismatch {
            index,
            eq: self.eq.clone(),
            declared: self.reaction_type,
            found: found.to_string(),
        })
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SpeciesData {
    pub name: String,
    /// kg/kmol
    pub molar_mass: f64,
    pub thermo: NASA7,
}

/// initial state stored in a mechanism file; composition as mass (`Y`) or mole (`X`) fractions
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct DefaultStateData {
    pub T: f64,
    pub P: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub Y: Option<HashMap<String, f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub X: Option<HashMap<String, f64>>,
}

/// mechanism file contents
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct MechanismData {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub units: KineticUnits,
    pub species: Vec<SpeciesData>,
    pub reactions: Vec<ReactionData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_state: Option<DefaultStateData>,
}
/////////////////////////////////////COMPILED MECHANISM//////////////////////////////////////////////
/// how the reverse rate of a reaction is obtained
#[derive(Debug, Clone, PartialEq)]
pub enum ReverseRate {
    Irreversible,
    /// k_r = k_f/Kc
    Equilibrium,
    /// explicit reverse Arrhenius parameters
    Explicit(Arrhenius),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reaction {
    pub eq: String,
    /// forward rate constant; the high-pressure limit for falloff reactions
    pub rate: Arrhenius,
    pub reverse: ReverseRate,
    /// position among the reversible reactions
    pub rev_index: Option<usize>,
    /// position among the pressure-modified reactions
    pub pres_mod_index: Option<usize>,
    /// (species, exponent) of the forward rate of progress, species ascending
    pub orders: Vec<(usize, f64)>,
    /// (species, coefficient) of the products, species ascending
    pub products: Vec<(usize, f64)>,
    /// (species, ν'' - ν') for species with non-zero net change, species ascending
    pub net_stoich: Vec<(usize, f64)>,
    /// Σν'' - Σν', third bodies excluded
    pub delta_nu: f64,
    pub duplicate: bool,
}

impl Reaction {
    pub fn is_reversible(&self) -> bool {
        self.rev_index.is_some()
    }
}

/// One entry of the sparse stoichiometric table. Entries are ordered reaction-ascending, then
/// species-ascending; `first_touch` marks the first entry of a species in that order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StoichEntry {
    pub reaction: usize,
    pub species: usize,
    pub coeff: f64,
    pub rev_index: Option<usize>,
    pub pres_mod: Option<usize>,
    pub first_touch: bool,
}

/// default state resolved against the species list
#[derive(Debug, Clone, PartialEq)]
pub struct DefaultState {
    /// [T, Y_0, ..., Y_{N-2}]
    pub y: Vec<f64>,
    pub pressure: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Mechanism {
    pub name: String,
    pub species: Vec<String>,
    /// kg/kmol
    pub molar_masses: Vec<f64>,
    pub thermo: Vec<NASA7>,
    pub reactions: Vec<Reaction>,
    pub pres_mod: Vec<PressureModifiedReaction>,
    pub stoich_table: Vec<StoichEntry>,
    /// non-bath species without any stoichiometric table entry
    pub untouched_species: Vec<usize>,
    pub n_reversible: usize,
    pub default_state: Option<DefaultState>,
    species_index: HashMap<String, usize>,
}

/// resolves a species name of reaction `index`
fn lookup(
    species_index: &HashMap<String, usize>,
    name: &str,
    index: usize,
    eq: &str,
) -> Result<usize, MechanismError> {
    species_index
        .get(name)
        .copied()
        .ok_or_else(|| MechanismError::UnknownSpecies {
            index,
            eq: eq.to_string(),
            species: name.to_string(),
        })
}

/// reactant and product lists of one side, resolved and sorted by species index
fn resolve_side(
    side: &[(String, f64)],
    species_index: &HashMap<String, usize>,
    index: usize,
    eq: &str,
) -> Result<Vec<(usize, f64)>, MechanismError> {
    let mut resolved = side
        .iter()
        .map(|(name, nu)| lookup(species_index, name, index, eq).map(|i| (i, *nu)))
        .collect::<Result<Vec<_>, MechanismError>>()?;
    resolved.sort_by_key(|&(i, _)| i);
    Ok(resolved)
}

impl Mechanism {
    /// compiles and validates the contents of a mechanism file
    pub fn from_data(data: MechanismData) -> Result<Self, MechanismError> {
        let MechanismData {
            name,
            units,
            species,
            reactions: reaction_data,
            default_state,
        } = data;
        if species.is_empty() {
            return Err(MechanismError::NoSpecies);
        }
        let mut species_index = HashMap::with_capacity(species.len());
        for (i, sp) in species.iter().enumerate() {
            if species_index.insert(sp.name.clone(), i).is_some() {
                return Err(MechanismError::DuplicateSpecies(sp.name.clone()));
            }
            if !(sp.molar_mass > 0.0) {
                return Err(MechanismError::InvalidMolarMass {
                    name: sp.name.clone(),
                    molar_mass: sp.molar_mass,
                });
            }
        }
        let bath = species.len() - 1;
        let molar_masses: Vec<f64> = species.iter().map(|s| s.molar_mass).collect();
        let analyzer = StoichAnalyzer::new()?;

        let mut reactions = Vec::with_capacity(reaction_data.len());
        let mut pres_mod = Vec::new();
        let mut n_reversible = 0;
        for (j, rd) in reaction_data.iter().enumerate() {
            let eq = rd.eq.as_str();
            rd.validate_reaction_type(j)?;
            let parsed = analyzer.parse(eq)?;
            let expected = match rd.reaction_type {
                ReactionType::Elem => ThirdBodyMarker::None,
                ReactionType::ThreeBody => ThirdBodyMarker::ThirdBody,
                ReactionType::Falloff => ThirdBodyMarker::Falloff,
            };
            if parsed.marker != expected {
                let found = match parsed.marker {
                    ThirdBodyMarker::None => "the equation has no third body",
                    ThirdBodyMarker::ThirdBody => "the equation has a '+ M' third body",
                    ThirdBodyMarker::Falloff => "the equation has a '(+M)' falloff bath",
                };
                return Err(MechanismError::ReactionTypeMismatch {
                    index: j,
                    eq: eq.to_string(),
                    declared: rd.reaction_type,
                    found: found.to_string(),
                });
            }
            let reactants = resolve_side(&parsed.reactants, &species_index, j, eq)?;
            let products = resolve_side(&parsed.products, &species_index, j, eq)?;

            // forward orders default to the reactant coefficients
            let mut orders = reactants.clone();
            if let Some(overrides) = &rd.orders {
                for (name, &order) in overrides {
                    let i = lookup(&species_index, name, j, eq)?;
                    match orders.iter_mut().find(|(k, _)| *k == i) {
                        Some((_, o)) => *o = order,
                        None => {
                            warn!("reaction {} '{}': order given for non-reactant {}", j, eq, name);
                            orders.push((i, order));
                        }
                    }
                }
                orders.retain(|&(_, o)| o != 0.0);
                orders.sort_by_key(|&(i, _)| i);
            }

            let mut net: Vec<(usize, f64)> = Vec::new();
            for &(i, nu) in &products {
                net.push((i, nu));
            }
            for &(i, nu) in &reactants {
                match net.iter_mut().find(|(k, _)| *k == i) {
                    Some((_, c)) => *c -= nu,
                    None => net.push((i, -nu)),
                }
            }
            net.retain(|&(_, c)| c != 0.0);
            net.sort_by_key(|&(i, _)| i);
            let delta_nu = net.iter().map(|&(_, c)| c).sum::<f64>();

            if let Some(&(_, coeff)) = net.iter().find(|&&(i, _)| i == bath) {
                return Err(MechanismError::BathSpeciesNotInert {
                    species: species[bath].name.clone(),
                    index: j,
                    eq: eq.to_string(),
                    coeff,
                });
            }
            let imbalance: f64 = net.iter().map(|&(i, c)| c * molar_masses[i]).sum();
            let scale: f64 = net.iter().map(|&(i, c)| c.abs() * molar_masses[i]).sum();
            if imbalance.abs() > MASS_BALANCE_TOLERANCE * scale {
                return Err(MechanismError::MassImbalance {
                    index: j,
                    eq: eq.to_string(),
                    imbalance,
                });
            }

            let forward_order: f64 = orders.iter().map(|&(_, o)| o).sum();
            let reverse_order: f64 = products.iter().map(|&(_, nu)| nu).sum();
            let (rate, third_body_order) = match &rd.data {
                ReactionKinetics::Elementary(el) => {
                    (Arrhenius::from_raw(&el.Arrhenius, forward_order, &units), 0.0)
                }
                ReactionKinetics::ThreeBody(tb) => {
                    let offsets = efficiency_offsets(&tb.eff, &species_index, j, eq)?;
                    pres_mod.push(PressureModifiedReaction {
                        reaction: j,
                        efficiency_offsets: offsets,
                        kind: PressureDependence::ThirdBody,
                    });
                    (
                        Arrhenius::from_raw(&tb.Arrhenius, forward_order + 1.0, &units),
                        1.0,
                    )
                }
                ReactionKinetics::Falloff(fo) => {
                    let offsets = match &fo.eff {
                        Some(eff) => efficiency_offsets(eff, &species_index, j, eq)?,
                        None => Vec::new(),
                    };
                    let high = Arrhenius::from_raw(&fo.high_rate, forward_order, &units);
                    let low = Arrhenius::from_raw(&fo.low_rate, forward_order + 1.0, &units);
                    let blending = match &fo.troe {
                        Some(params) => Blending::Troe(Troe::from_params(params).ok_or(
                            MechanismError::TroeParameters {
                                index: j,
                                eq: eq.to_string(),
                                got: params.len(),
                            },
                        )?),
                        None => Blending::Lindemann,
                    };
                    pres_mod.push(PressureModifiedReaction {
                        reaction: j,
                        efficiency_offsets: offsets,
                        kind: PressureDependence::Falloff {
                            low,
                            high,
                            blending,
                        },
                    });
                    (high, 0.0)
                }
            };
            let pres_mod_index = match rd.reaction_type {
                ReactionType::Elem => None,
                _ => Some(pres_mod.len() - 1),
            };

            let reverse = match (parsed.reversible, &rd.rev) {
                (false, Some(_)) => {
                    return Err(MechanismError::ReverseOnIrreversible {
                        index: j,
                        eq: eq.to_string(),
                    });
                }
                (false, None) => ReverseRate::Irreversible,
                (true, None) => ReverseRate::Equilibrium,
                (true, Some(raw)) => ReverseRate::Explicit(Arrhenius::from_raw(
                    raw,
                    reverse_order + third_body_order,
                    &units,
                )),
            };
            let rev_index = if parsed.reversible {
                n_reversible += 1;
                Some(n_reversible - 1)
            } else {
                None
            };
            debug!(
                "reaction {} '{}': {} reversible={} pres_mod={:?}",
                j, eq, rd.reaction_type, parsed.reversible, pres_mod_index
            );
            reactions.push(Reaction {
                eq: eq.to_string(),
                rate,
                reverse,
                rev_index,
                pres_mod_index,
                orders,
                products,
                net_stoich: net,
                delta_nu,
                duplicate: rd.duplicate,
            });
        }
        warn_undeclared_duplicates(&reactions);
        let stoich_table = build_stoich_table(&reactions);
        let untouched_species: Vec<usize> = (0..bath)
            .filter(|&i| !stoich_table.iter().any(|e| e.species == i))
            .collect();

        let (names, thermo): (Vec<String>, Vec<NASA7>) =
            species.into_iter().map(|s| (s.name, s.thermo)).unzip();
        let mut mech = Mechanism {
            name,
            species: names,
            molar_masses,
            thermo,
            reactions,
            pres_mod,
            stoich_table,
            untouched_species,
            n_reversible,
            default_state: None,
            species_index,
        };
        if let Some(state) = default_state {
            let y = match (&state.Y, &state.X) {
                (Some(Y), _) => mech.state_vector(state.T, Y)?,
                (None, Some(X)) => {
                    let Y = mech.mass_fractions_from_moles(X)?;
                    mech.state_vector(state.T, &Y)?
                }
                (None, None) => {
                    return Err(MechanismError::InvalidComposition(
                        "default state needs 'Y' or 'X'".to_string(),
                    ));
                }
            };
            mech.default_state = Some(DefaultState {
                y,
                pressure: state.P,
            });
        }
        info!(
            "mechanism '{}': {} species, {} reactions, {} reversible, {} pressure-dependent",
            mech.name,
            mech.n_species(),
            mech.n_reactions(),
            mech.n_reversible,
            mech.n_pres_mod()
        );
        Ok(mech)
    }

    /// bundled USC Mech II H2/O2 core: 9 species with N2 as bath, 28 reactions
    pub fn h2o2_usc() -> Result<Self, ConfigError> {
        parse_mechanism(H2O2_USC_MECH2, "h2o2_usc_mech2.json")
    }

    pub fn n_species(&self) -> usize {
        self.species.len()
    }
    pub fn n_reactions(&self) -> usize {
        self.reactions.len()
    }
    pub fn n_reversible(&self) -> usize {
        self.n_reversible
    }
    pub fn n_pres_mod(&self) -> usize {
        self.pres_mod.len()
    }
    /// length of the state vector: temperature plus all species but the bath
    pub fn state_len(&self) -> usize {
        self.species.len()
    }
    pub fn species_index(&self, name: &str) -> Option<usize> {
        self.species_index.get(name).copied()
    }
    pub fn bath_species(&self) -> &str {
        &self.species[self.species.len() - 1]
    }

    /// Builds the state vector [T, Y_0, ..., Y_{N-2}] from named mass fractions. Missing
    /// species are zero; a bath entry is ignored since the bath fraction is implicit.
    pub fn state_vector(
        &self,
        T: f64,
        composition: &HashMap<String, f64>,
    ) -> Result<Vec<f64>, MechanismError> {
        let n = self.n_species();
        let mut y = vec![0.0; n];
        y[0] = T;
        let mut sum = 0.0;
        for (name, &Y) in composition {
            let i = self
                .species_index(name)
                .ok_or_else(|| MechanismError::UnknownStateSpecies(name.clone()))?;
            if !(Y >= 0.0) {
                return Err(MechanismError::InvalidComposition(format!(
                    "negative mass fraction {} for {}",
                    Y, name
                )));
            }
            if i < n - 1 {
                y[i + 1] = Y;
                sum += Y;
            }
        }
        if sum > 1.0 + 1e-10 {
            warn!("mass fractions of non-bath species sum to {} > 1", sum);
        }
        Ok(y)
    }

    /// converts named mole fractions (any positive scale) into mass fractions
    pub fn mass_fractions_from_moles(
        &self,
        X: &HashMap<String, f64>,
    ) -> Result<HashMap<String, f64>, MechanismError> {
        let mut mass = 0.0;
        for (name, &x) in X {
            let i = self
                .species_index(name)
                .ok_or_else(|| MechanismError::UnknownStateSpecies(name.clone()))?;
            if !(x >= 0.0) {
                return Err(MechanismError::InvalidComposition(format!(
                    "negative mole fraction {} for {}",
                    x, name
                )));
            }
            mass += x * self.molar_masses[i];
        }
        if !(mass > 0.0) {
            return Err(MechanismError::InvalidComposition(
                "mole fractions sum to zero".to_string(),
            ));
        }
        Ok(X.iter()
            .map(|(name, &x)| {
                let M = self.molar_masses[self.species_index[name]];
                (name.clone(), x * M / mass)
            })
            .collect())
    }

    /// default state of the mechanism file: state vector and pressure
    pub fn default_state(&self) -> Option<(&[f64], f64)> {
        self.default_state
            .as_ref()
            .map(|s| (s.y.as_slice(), s.pressure))
    }
}

/// sparse (reaction, species) table in reaction-ascending then species-ascending order
fn build_stoich_table(reactions: &[Reaction]) -> Vec<StoichEntry> {
    let mut touched: Vec<usize> = Vec::new();
    let mut table = Vec::new();
    for (j, r) in reactions.iter().enumerate() {
        for &(i, coeff) in &r.net_stoich {
            let first_touch = !touched.contains(&i);
            if first_touch {
                touched.push(i);
            }
            table.push(StoichEntry {
                reaction: j,
                species: i,
                coeff,
                rev_index: r.rev_index,
                pres_mod: r.pres_mod_index,
                first_touch,
            });
        }
    }
    table
}

/// warns about reactions sharing reactants and products without the `duplicate` flag
fn warn_undeclared_duplicates(reactions: &[Reaction]) {
    let mut seen: HashMap<String, usize> = HashMap::new();
    for (j, r) in reactions.iter().enumerate() {
        let key = format!("{:?}|{:?}", r.orders, r.products);
        if let Some(&first) = seen.get(&key) {
            if !(r.duplicate && reactions[first].duplicate) {
                warn!(
                    "reactions {} and {} ('{}') look like duplicates but are not flagged as such",
                    first, j, r.eq
                );
            }
        } else {
            seen.insert(key, j);
        }
    }
}
