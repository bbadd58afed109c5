//! Ready-made effect demos: a snapshot type, the effect it drives, and a
//! conductor alias tying the two together.

mod auto_wah;
mod high_shelf;

pub use auto_wah::{AutoWah, AutoWahConductor, AutoWahData, AutoWahParam};
pub use high_shelf::{HighShelfConductor, HighShelfData, HighShelfEq, HighShelfParam};
