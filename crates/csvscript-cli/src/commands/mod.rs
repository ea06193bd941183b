pub mod matrix;
pub mod run;
