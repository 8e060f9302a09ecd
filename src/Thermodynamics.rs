/// handlers for thermodynamic data formats of the species of a mechanism
#[allow(non_snake_case)]
pub mod DBhandlers;
