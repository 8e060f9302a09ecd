/// evaluation of the reactor right-hand side at the bundled hydrogen/air state
pub mod rhs_examples;
