mod overrides;

pub use overrides::*;
