//! Net molar production rates of the species from the rates of progress.
use crate::Kinetics::mechanism::Mechanism;

/// Accumulates the net production rates of all species but the bath, kmol/(m^3 s), walking
/// the sparse stoichiometric table of the mechanism in reaction-ascending order. The first
/// contribution to a species assigns, later ones accumulate; species that no reaction changes
/// are set to 0. Returns the production rate of the bath species, always 0.
pub fn eval_spec_rates(
    mech: &Mechanism,
    fwd: &[f64],
    rev: &[f64],
    pres_mod: &[f64],
    sp_rates: &mut [f64],
) -> f64 {
    for entry in &mech.stoich_table {
        let j = entry.reaction;
        let net = match entry.rev_index {
            Some(k) => fwd[j] - rev[k],
            None => fwd[j],
        };
        let contribution = match entry.pres_mod {
            Some(m) => (entry.coeff * net) * pres_mod[m],
            None => entry.coeff * net,
        };
        if entry.first_touch {
            sp_rates[entry.species] = contribution;
        } else {
            sp_rates[entry.species] += contribution;
        }
    }
    for &i in &mech.untouched_species {
        sp_rates[i] = 0.0;
    }
    0.0
}
