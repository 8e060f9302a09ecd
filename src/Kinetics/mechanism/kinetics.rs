//! Kinetic data of a single reaction: the raw structs read from a mechanism file and the
//! unit-converted rate laws the evaluators work with.
use crate::Kinetics::mechanism::MechanismError;
use crate::Kinetics::units::KineticUnits;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
/////////////////////////ELEMENTARY KINETICS///////////////////////////////////////////////////////////////
// Struct for reaction type "elem" - modified Arrhenius form A*T^b*exp(-Ea/RT),
// parameters [A, b, Ea] in the units of the mechanism file
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ElementaryStruct {
    #[serde(alias = "Arrenius")]
    pub Arrhenius: [f64; 3],
}

/////////////////////////THREE-BODY KINETICS///////////////////////////////////////////////////////////////
// Struct for reaction type "three-body": Arrhenius rate multiplied by the effective collider
// concentration; `eff` holds the collision efficiencies that differ from 1 (may be empty)
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ThreeBodyStruct {
    #[serde(alias = "Arrenius")]
    pub Arrhenius: [f64; 3],
    pub eff: HashMap<String, f64>,
}

/////////////////////////FALLOFF KINETICS///////////////////////////////////////////////////////////////
// Struct for reaction type "falloff": low- and high-pressure limits, optional efficiencies and
// optional Troe parameters [a, T3, T1] or [a, T3, T1, T2]; Lindemann form without them
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct FalloffStruct {
    pub low_rate: [f64; 3],
    pub high_rate: [f64; 3],
    pub eff: Option<HashMap<String, f64>>,
    pub troe: Option<Vec<f64>>,
}

/////////////////////////COMPILED RATE LAWS///////////////////////////////////////////////////////////////
/// Modified Arrhenius rate constant k = A*T^b*exp(-Ta/T) in SI-kmol units (m, kmol, s, K)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arrhenius {
    pub A: f64,
    pub b: f64,
    /// activation temperature Ea/R, K
    pub Ta: f64,
}

impl Arrhenius {
    pub fn new(A: f64, b: f64, Ta: f64) -> Self {
        Self { A, b, Ta }
    }
    /// converts raw file parameters [A, b, Ea] of a rate constant of the given overall order
    pub fn from_raw(raw: &[f64; 3], order: f64, units: &KineticUnits) -> Self {
        Self {
            A: raw[0] * units.pre_exponential_factor(order),
            b: raw[1],
            Ta: units.activation_temperature(raw[2]),
        }
    }
    /// rate constant at temperature T; `logT` is ln(T) computed once by the caller
    #[inline]
    pub fn K_const(&self, T: f64, logT: f64) -> f64 {
        if self.b == 0.0 && self.Ta == 0.0 {
            self.A
        } else {
            self.A * f64::exp(self.b * logT - self.Ta / T)
        }
    }
}

/// Troe broadening parameters. Fcent = (1-a)exp(-T/T3) + a*exp(-T/T1) [+ exp(-T2/T)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Troe {
    pub a: f64,
    pub T3: f64,
    pub T1: f64,
    pub T2: Option<f64>,
}

impl Troe {
    pub fn from_params(params: &[f64]) -> Option<Self> {
        match *params {
            [a, T3, T1] => Some(Self { a, T3, T1, T2: None }),
            [a, T3, T1, T2] => Some(Self {
                a,
                T3,
                T1,
                T2: Some(T2),
            }),
            _ => None,
        }
    }
    #[inline]
    pub fn F_cent(&self, T: f64) -> f64 {
        let F = (1.0 - self.a) * f64::exp(-T / self.T3) + self.a * f64::exp(-T / self.T1);
        match self.T2 {
            Some(T2) => F + f64::exp(-T2 / T),
            None => F,
        }
    }
}

/// shape of the falloff curve between the low- and high-pressure limits
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Blending {
    Lindemann,
    Troe(Troe),
}

/// how a pressure-modified reaction depends on the bath
#[derive(Debug, Clone, PartialEq)]
pub enum PressureDependence {
    /// rate multiplied by the effective third-body concentration
    ThirdBody,
    /// k = k_inf * Pr/(1+Pr) * F with Pr = k0*[M]/k_inf
    Falloff {
        low: Arrhenius,
        high: Arrhenius,
        blending: Blending,
    },
}

/// Pressure modification record of one reaction. Records are kept in ascending reaction order.
#[derive(Debug, Clone, PartialEq)]
pub struct PressureModifiedReaction {
    /// index of the modified reaction
    pub reaction: usize,
    /// (species index, efficiency - 1) for colliders whose efficiency differs from 1, species ascending
    pub efficiency_offsets: Vec<(usize, f64)>,
    pub kind: PressureDependence,
}

/// resolves species names of an efficiency map into sorted (index, efficiency - 1) pairs
pub fn efficiency_offsets(
    eff: &HashMap<String, f64>,
    species_index: &HashMap<String, usize>,
    reaction: usize,
    eq: &str,
) -> Result<Vec<(usize, f64)>, MechanismError> {
    let mut offsets = Vec::with_capacity(eff.len());
    for (name, &value) in eff {
        let Some(&i) = species_index.get(name) else {
            return Err(MechanismError::UnknownSpecies {
                index: reaction,
                eq: eq.to_string(),
                species: name.clone(),
            });
        };
        if value != 1.0 {
            offsets.push((i, value - 1.0));
        }
    }
    offsets.sort_by_key(|&(i, _)| i);
    Ok(offsets)
}
