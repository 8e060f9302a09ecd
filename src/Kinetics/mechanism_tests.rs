///////////////////////////TESTING////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use crate::Kinetics::mechanism::kinetics::{Blending, PressureDependence};
    use crate::Kinetics::mechanism::{
        Mechanism, MechanismData, MechanismError, ReactionType, ReverseRate,
    };
    use crate::Kinetics::species_rates::eval_spec_rates;
    use approx::assert_relative_eq;
    use serde_json::{Value, json};

    fn species(name: &str, molar_mass: f64) -> Value {
        json!({"name": name, "molar_mass": molar_mass,
               "thermo": {"low": [3.5, 0, 0, 0, 0, -1000, 4], "high": [3.5, 0, 0, 0, 0, -1000, 4]}})
    }

    fn small_mechanism(reactions: Value) -> Value {
        json!({
            "name": "small",
            "species": [species("H", 1.00794), species("O", 15.9994), species("OH", 17.00734),
                        species("H2", 2.01588), species("O2", 31.9988), species("N2", 28.0134)],
            "reactions": reactions
        })
    }

    fn compile(json: Value) -> Result<Mechanism, MechanismError> {
        let data: MechanismData = serde_json::from_value(json).unwrap();
        Mechanism::from_data(data)
    }

    #[test]
    fn test_bundled_mechanism_counts() {
        let mech = Mechanism::h2o2_usc().unwrap();
        assert_eq!(mech.n_species(), 9);
        assert_eq!(mech.n_reactions(), 28);
        assert_eq!(mech.n_reversible(), 28);
        assert_eq!(mech.n_pres_mod(), 6);
        assert_eq!(mech.bath_species(), "N2");
        let third_body = mech
            .pres_mod
            .iter()
            .filter(|p| p.kind == PressureDependence::ThirdBody)
            .count();
        assert_eq!(third_body, 4);
        let troe = mech
            .pres_mod
            .iter()
            .filter(|p| {
                matches!(
                    p.kind,
                    PressureDependence::Falloff {
                        blending: Blending::Troe(_),
                        ..
                    }
                )
            })
            .count();
        assert_eq!(troe, 2);
        // pressure-modified reactions are kept in ascending reaction order
        let order: Vec<usize> = mech.pres_mod.iter().map(|p| p.reaction).collect();
        assert_eq!(order, vec![4, 7, 8, 9, 10, 12]);
        assert_eq!(mech.reactions[10].pres_mod_index, Some(4));
        assert!(mech.untouched_species.is_empty());
    }

    #[test]
    fn test_bundled_mechanism_units_and_efficiencies() {
        let mech = Mechanism::h2o2_usc().unwrap();
        // H + O2 <=> O + OH, bimolecular: A in m^3/(kmol s)
        let r0 = &mech.reactions[0];
        assert_relative_eq!(r0.rate.A, 2.644e13, max_relative = 1e-12);
        assert_relative_eq!(r0.rate.Ta, 17041.0 * 4184.0 / 8314.4621, max_relative = 1e-12);
        // 2H + M: termolecular counting the third body
        assert_relative_eq!(mech.reactions[4].rate.A, 1.78e12, max_relative = 1e-12);
        // efficiency 0 is an offset of -1
        let h2 = mech.species_index("H2").unwrap();
        let h2o = mech.species_index("H2O").unwrap();
        assert_eq!(mech.pres_mod[0].efficiency_offsets, vec![(h2, -1.0), (h2o, -1.0)]);
        // H + O2 (+M): k_inf is second order, k0 third order
        match &mech.pres_mod[4].kind {
            PressureDependence::Falloff { low, high, .. } => {
                assert_relative_eq!(high.A, 5.116e9, max_relative = 1e-12);
                assert_relative_eq!(low.A, 6.328e13, max_relative = 1e-12);
            }
            other => panic!("expected falloff, got {:?}", other),
        }
    }

    #[test]
    fn test_stoich_table_order_and_first_touch() {
        let mech = Mechanism::h2o2_usc().unwrap();
        let table = &mech.stoich_table;
        for pair in table.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            assert!(a.reaction < b.reaction || (a.reaction == b.reaction && a.species < b.species));
        }
        let n = mech.n_species();
        let mut seen = vec![false; n];
        for e in table {
            assert_eq!(e.first_touch, !seen[e.species]);
            seen[e.species] = true;
            assert_ne!(e.species, n - 1, "bath species must not appear");
            assert!(e.coeff != 0.0);
        }
        // 2H + H2O <=> H2 + H2O: H2O has zero net change and no entry
        let h2o = mech.species_index("H2O").unwrap();
        assert!(!table.iter().any(|e| e.reaction == 6 && e.species == h2o));
    }

    #[test]
    fn test_default_state_from_mole_fractions() {
        let mech = Mechanism::h2o2_usc().unwrap();
        let (y, P) = mech.default_state().unwrap();
        assert_eq!(P, 101325.0);
        assert_eq!(y.len(), 9);
        assert_eq!(y[0], 1000.0);
        let i_h2 = mech.species_index("H2").unwrap();
        let i_o2 = mech.species_index("O2").unwrap();
        let mass = 2.0 * 2.01588 + 31.9988 + 3.76 * 28.0134;
        assert_relative_eq!(y[i_h2 + 1], 2.0 * 2.01588 / mass, max_relative = 1e-12);
        assert_relative_eq!(y[i_o2 + 1], 31.9988 / mass, max_relative = 1e-12);
        assert_relative_eq!(y[i_h2 + 1], 0.0285, max_relative = 1e-2);
        assert_relative_eq!(y[i_o2 + 1], 0.2264, max_relative = 1e-2);
    }

    #[test]
    fn test_state_vector_errors() {
        let mech = Mechanism::h2o2_usc().unwrap();
        let bad = [("XE".to_string(), 0.1)].into_iter().collect();
        assert!(matches!(
            mech.state_vector(1000.0, &bad),
            Err(MechanismError::UnknownStateSpecies(_))
        ));
        let negative = [("H2".to_string(), -0.1)].into_iter().collect();
        assert!(matches!(
            mech.state_vector(1000.0, &negative),
            Err(MechanismError::InvalidComposition(_))
        ));
        // bath entry is ignored
        let with_bath = [("H2".to_string(), 0.1), ("N2".to_string(), 0.9)]
            .into_iter()
            .collect();
        let y = mech.state_vector(1500.0, &with_bath).unwrap();
        assert_eq!(y.iter().skip(1).sum::<f64>(), 0.1);
    }

    #[test]
    fn test_validation_errors() {
        let unknown = small_mechanism(json!([
            {"type": "elem", "eq": "H + HO2 <=> 2OH", "Arrhenius": [1e13, 0, 0]}
        ]));
        assert!(matches!(
            compile(unknown),
            Err(MechanismError::UnknownSpecies { index: 0, .. })
        ));

        let mismatch = small_mechanism(json!([
            {"type": "elem", "eq": "2O + M <=> O2 + M", "Arrhenius": [1.2e17, -1, 0]}
        ]));
        assert!(matches!(
            compile(mismatch),
            Err(MechanismError::ReactionTypeMismatch {
                declared: ReactionType::Elem,
                ..
            })
        ));

        let falloff_as_three_body = small_mechanism(json!([
            {"type": "three-body", "eq": "H + O (+M) <=> OH (+M)", "Arrhenius": [1e13, 0, 0], "eff": {}}
        ]));
        assert!(matches!(
            compile(falloff_as_three_body),
            Err(MechanismError::ReactionTypeMismatch { .. })
        ));

        let bad_troe = small_mechanism(json!([
            {"type": "falloff", "eq": "H + O (+M) <=> OH (+M)", "low_rate": [1e18, -1, 0],
             "high_rate": [1e13, 0, 0], "troe": [0.5, 100.0]}
        ]));
        assert!(matches!(
            compile(bad_troe),
            Err(MechanismError::TroeParameters { got: 2, .. })
        ));

        let imbalance = small_mechanism(json!([
            {"type": "elem", "eq": "H + O2 <=> OH", "Arrhenius": [1e13, 0, 0]}
        ]));
        assert!(matches!(
            compile(imbalance),
            Err(MechanismError::MassImbalance { .. })
        ));

        let bath = small_mechanism(json!([
            {"type": "elem", "eq": "N2 + O2 <=> O2 + N2 + N2", "Arrhenius": [1e13, 0, 0]}
        ]));
        // the bath check comes before the mass balance
        assert!(matches!(
            compile(bath),
            Err(MechanismError::BathSpeciesNotInert { .. })
        ));

        let reverse_on_irreversible = small_mechanism(json!([
            {"type": "elem", "eq": "H + O => OH", "Arrhenius": [1e13, 0, 0], "rev": [1e12, 0, 0]}
        ]));
        assert!(matches!(
            compile(reverse_on_irreversible),
            Err(MechanismError::ReverseOnIrreversible { .. })
        ));

        let unknown_collider = small_mechanism(json!([
            {"type": "three-body", "eq": "H + O + M <=> OH + M", "Arrhenius": [1e18, -1, 0], "eff": {"AR": 0.7}}
        ]));
        assert!(matches!(
            compile(unknown_collider),
            Err(MechanismError::UnknownSpecies { .. })
        ));
    }

    #[test]
    fn test_species_list_errors() {
        let duplicate = json!({"species": [species("H", 1.0), species("H", 1.0)], "reactions": []});
        assert!(matches!(
            compile(duplicate),
            Err(MechanismError::DuplicateSpecies(_))
        ));
        let mass = json!({"species": [species("H", 0.0), species("N2", 28.0)], "reactions": []});
        assert!(matches!(
            compile(mass),
            Err(MechanismError::InvalidMolarMass { .. })
        ));
        let empty = json!({"species": [], "reactions": []});
        assert!(matches!(compile(empty), Err(MechanismError::NoSpecies)));
    }

    #[test]
    fn test_unknown_reaction_type_is_a_parse_error() {
        let data = small_mechanism(json!([
            {"type": "plog", "eq": "H + O <=> OH", "Arrhenius": [1e13, 0, 0]}
        ]));
        assert!(serde_json::from_value::<MechanismData>(data).is_err());
    }

    #[test]
    fn test_irreversible_orders_and_explicit_reverse() {
        let mech = compile(small_mechanism(json!([
            {"type": "elem", "eq": "2H + O2 => 2OH", "Arrhenius": [1e13, 0, 0],
             "orders": {"H": 1.5, "O2": 0.5}},
            {"type": "elem", "eq": "H + O = OH", "Arrhenius": [1e13, 0, 0], "rev": [2e14, 0, 1000]}
        ])))
        .unwrap();
        assert_eq!(mech.n_reversible(), 1);
        let r0 = &mech.reactions[0];
        assert!(!r0.is_reversible());
        assert_eq!(r0.reverse, ReverseRate::Irreversible);
        assert_eq!(r0.orders, vec![(0, 1.5), (4, 0.5)]);
        // overall order 2: cm^3/mol -> m^3/kmol
        assert_relative_eq!(r0.rate.A, 1e10, max_relative = 1e-12);
        assert_eq!(r0.delta_nu, -1.0);
        let r1 = &mech.reactions[1];
        assert_eq!(r1.rev_index, Some(0));
        match r1.reverse {
            ReverseRate::Explicit(rate) => assert_relative_eq!(rate.A, 2e14, max_relative = 1e-12),
            ref other => panic!("expected explicit reverse rate, got {:?}", other),
        }
        // no reaction changes H2
        assert_eq!(mech.untouched_species, vec![3]);
    }

    #[test]
    fn test_untouched_species_are_zeroed() {
        let mech = compile(small_mechanism(json!([
            {"type": "elem", "eq": "H + O <=> OH", "Arrhenius": [1e13, 0, 0]}
        ])))
        .unwrap();
        let mut sp_rates = vec![f64::NAN; mech.n_species() - 1];
        let dy_N = eval_spec_rates(&mech, &[3.0], &[1.0], &[], &mut sp_rates);
        assert_eq!(dy_N, 0.0);
        assert_eq!(sp_rates, vec![-2.0, -2.0, 2.0, 0.0, 0.0]);
    }

    #[test]
    fn test_species_rates_pressure_modified() {
        let mech = compile(small_mechanism(json!([
            {"type": "elem", "eq": "H + O <=> OH", "Arrhenius": [1e13, 0, 0]},
            {"type": "three-body", "eq": "2H + M <=> H2 + M", "Arrhenius": [1e18, -1, 0], "eff": {}},
            {"type": "elem", "eq": "O + H2 => OH + H", "Arrhenius": [1e13, 0, 0]}
        ])))
        .unwrap();
        assert_eq!(mech.n_reversible(), 2);
        let fwd = [3.0, 5.0, 7.0];
        let rev = [1.0, 2.0];
        let pres_mod = [10.0];
        let mut sp = vec![0.0; 5];
        eval_spec_rates(&mech, &fwd, &rev, &pres_mod, &mut sp);
        // H: -(3-1) - 2*(5-2)*10 + 7
        assert_eq!(sp[0], -2.0 - 60.0 + 7.0);
        // O: -(3-1) - 7
        assert_eq!(sp[1], -9.0);
        // OH: (3-1) + 7
        assert_eq!(sp[2], 9.0);
        // H2: (5-2)*10 - 7
        assert_eq!(sp[3], 23.0);
        assert_eq!(sp[4], 0.0);

        // doubling every rate of progress exactly doubles every production rate
        let fwd2: Vec<f64> = fwd.iter().map(|r| 2.0 * r).collect();
        let rev2: Vec<f64> = rev.iter().map(|r| 2.0 * r).collect();
        let mut sp2 = vec![0.0; 5];
        eval_spec_rates(&mech, &fwd2, &rev2, &pres_mod, &mut sp2);
        for (a, b) in sp.iter().zip(&sp2) {
            assert_eq!(2.0 * a, *b);
        }
    }
}
