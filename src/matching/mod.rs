// Player identity resolution: name normalization, fuzzy matching, and
// tiered candidate lookup.

pub mod fuzzy;
pub mod normalize;
pub mod resolver;

pub use fuzzy::names_match;
pub use normalize::normalize_name;
pub use resolver::resolve;
