//! Concrete token implementations.

pub mod damage;
pub mod reference_list;
pub mod tags;

pub use damage::DamageToken;
pub use reference_list::{MasterListTask, ReferenceListToken};
pub use tags::TagListToken;
