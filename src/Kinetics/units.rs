//! Units of the kinetic parameters in a mechanism file and their conversion to the
//! SI-kmol system used by the evaluators (m, kmol, s, K).
//!
//! Pre-exponential factors carry units of (concentration)^(1 - order)/s, so the conversion
//! factor depends on the reaction order; activation energies are turned into activation
//! temperatures Ta = Ea/R.
use crate::Thermodynamics::DBhandlers::NASAdata::R_U;
use serde::{Deserialize, Serialize};

/// Avogadro constant, 1/mol
pub const N_A: f64 = 6.02214076e23;
/// thermochemical calorie, J
pub const CAL: f64 = 4.184;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum LengthUnit {
    #[default]
    #[serde(rename = "cm")]
    Cm,
    #[serde(rename = "m")]
    M,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuantityUnit {
    #[default]
    #[serde(rename = "mol")]
    Mol,
    #[serde(rename = "kmol")]
    Kmol,
    #[serde(rename = "molecule", alias = "molecules")]
    Molecule,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnergyUnit {
    #[default]
    #[serde(rename = "cal/mol")]
    CalPerMol,
    #[serde(rename = "kcal/mol")]
    KcalPerMol,
    #[serde(rename = "J/mol")]
    JPerMol,
    #[serde(rename = "kJ/mol")]
    KJPerMol,
    #[serde(rename = "J/kmol")]
    JPerKmol,
    /// activation temperature given directly
    #[serde(rename = "K")]
    Kelvin,
}

/// units of the kinetic data of a mechanism file; Chemkin conventions by default
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Default)]
pub struct KineticUnits {
    #[serde(default)]
    pub length: LengthUnit,
    #[serde(default)]
    pub quantity: QuantityUnit,
    #[serde(default)]
    pub activation_energy: EnergyUnit,
}

impl KineticUnits {
    /// size of the file's concentration unit expressed in kmol/m^3
    pub fn concentration_factor(&self) -> f64 {
        let length = match self.length {
            LengthUnit::Cm => 1e-2,
            LengthUnit::M => 1.0,
        };
        let quantity = match self.quantity {
            QuantityUnit::Mol => 1e-3,
            QuantityUnit::Kmol => 1.0,
            QuantityUnit::Molecule => 1e-3 / N_A,
        };
        quantity / (length * length * length)
    }
    /// multiplier turning a pre-exponential factor of a rate constant of the given overall
    /// order into SI-kmol units
    pub fn pre_exponential_factor(&self, order: f64) -> f64 {
        let c = self.concentration_factor();
        if c == 1.0 {
            return 1.0;
        }
        let exponent = 1.0 - order;
        if exponent.fract() == 0.0 {
            c.powi(exponent as i32)
        } else {
            c.powf(exponent)
        }
    }
    /// converts an activation energy into an activation temperature, K
    pub fn activation_temperature(&self, Ea: f64) -> f64 {
        match self.activation_energy {
            EnergyUnit::CalPerMol => Ea * CAL * 1e3 / R_U,
            EnergyUnit::KcalPerMol => Ea * CAL * 1e6 / R_U,
            EnergyUnit::JPerMol => Ea * 1e3 / R_U,
            EnergyUnit::KJPerMol => Ea * 1e6 / R_U,
            EnergyUnit::JPerKmol => Ea / R_U,
            EnergyUnit::Kelvin => Ea,
        }
    }
}
