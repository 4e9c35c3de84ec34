pub use self::{bases::*, participant::*, roster::*};

pub(crate) mod bases;
pub(crate) mod participant;
pub(crate) mod roster;
