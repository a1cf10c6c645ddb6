pub mod check;
pub mod generate;
pub mod input;
pub mod names;

#[cfg(test)]
mod input_tests;
