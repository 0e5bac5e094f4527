// Entity Models - the two record kinds read from the input sheets
//
// - Dragon: name, level, stars, element types
// - Habitat: habitat type, level, quantity, spaces per habitat

pub mod dragon;
pub mod habitat;

pub use dragon::Dragon;
pub use habitat::Habitat;
