pub mod alphabet;
pub mod breakpoints;
pub mod series;
pub mod symbolic;
