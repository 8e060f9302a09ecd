use crate::Kinetics::mechanism::Mechanism;
use crate::ReactorsIVP::concentrations::eval_conc;
use crate::ReactorsIVP::dydt::{ConstantPressure, ConstantVolume, Reactor, ReactorRHS, evaluate_batch};
use log::error;
use prettytable::{Cell, Row, Table, row};
use std::sync::Arc;

pub fn rhs_examples(task: usize) {
    let mech = match Mechanism::h2o2_usc() {
        Ok(mech) => Arc::new(mech),
        Err(e) => {
            error!("bundled mechanism failed to load: {}", e);
            return;
        }
    };
    let Some((y, P)) = mech.default_state() else {
        error!("bundled mechanism has no default state");
        return;
    };
    let y = y.to_vec();

    match task {
        0 => {
            // DERIVATIVES IN BOTH OPERATION MODES
            let mut conc = vec![0.0; mech.n_species()];
            let rho = eval_conc(&mech, y[0], P, &y[1..], &mut conc).rho;
            let conp: Reactor = ConstantPressure::new(mech.clone(), P).into();
            let conv: Reactor = ConstantVolume::new(mech.clone(), rho).into();
            let mut ws = conp.workspace();
            let mut dy_p = vec![0.0; mech.state_len()];
            let mut dy_v = vec![0.0; mech.state_len()];
            conp.evaluate(0.0, &y, &mut dy_p, &mut ws);
            conv.evaluate(0.0, &y, &mut dy_v, &mut ws);

            println!("____________________RIGHT-HAND SIDE AT T = {} K, P = {} Pa_____________", y[0], P);
            let mut table = Table::new();
            table.add_row(row!["Variable", "Value", "d/dt, const P", "d/dt, const V"]);
            table.add_row(row!["T", y[0], format!("{:.6e}", dy_p[0]), format!("{:.6e}", dy_v[0])]);
            for i in 0..mech.n_species() - 1 {
                table.add_row(Row::new(vec![
                    Cell::new(&format!("Y_{}", mech.species[i])),
                    Cell::new(&format!("{:.6}", y[i + 1])),
                    Cell::new(&format!("{:.6e}", dy_p[i + 1])),
                    Cell::new(&format!("{:.6e}", dy_v[i + 1])),
                ]));
            }
            table.printstd();
        }
        1 => {
            // RATES OF PROGRESS OF EVERY REACTION
            let reactor = ConstantPressure::new(mech.clone(), P);
            let mut ws = reactor.workspace();
            let mut dy = vec![0.0; mech.state_len()];
            let mut hot = y.clone();
            hot[0] = 1500.0;
            reactor.evaluate(0.0, &hot, &mut dy, &mut ws);

            println!("____________________REACTION RATES AT T = 1500 K_________________________");
            let mut table = Table::new();
            table.add_row(row!["Reaction", "Reversible", "Forward", "Reverse", "Pressure modification"]);
            for (j, rxn) in mech.reactions.iter().enumerate() {
                let rev = rxn.rev_index.map(|k| ws.rev[k]).unwrap_or(0.0);
                let pm = rxn.pres_mod_index.map(|k| format!("{:.4e}", ws.pres_mod[k]));
                table.add_row(Row::new(vec![
                    Cell::new(&rxn.eq),
                    Cell::new(if rxn.is_reversible() { "yes" } else { "no" }),
                    Cell::new(&format!("{:.4e}", ws.fwd[j])),
                    Cell::new(&format!("{:.4e}", rev)),
                    Cell::new(&pm.unwrap_or_else(|| "-".to_string())),
                ]));
            }
            table.printstd();
        }
        2 => {
            // TEMPERATURE SWEEP, STATES EVALUATED IN PARALLEL
            let reactor: Reactor = ConstantPressure::new(mech.clone(), P).into();
            let states: Vec<Vec<f64>> = (0..16)
                .map(|k| {
                    let mut s = y.clone();
                    s[0] = 800.0 + 100.0 * k as f64;
                    s
                })
                .collect();
            let derivatives = evaluate_batch(&reactor, 0.0, &states);
            let mut table = Table::new();
            table.add_row(row!["T, K", "dT/dt, K/s"]);
            for (s, dy) in states.iter().zip(&derivatives) {
                table.add_row(row![s[0], format!("{:.6e}", dy[0])]);
            }
            table.printstd();
        }
        _ => {
            println!("no such task: {}", task);
        }
    }
}
