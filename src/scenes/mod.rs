mod tiger;

pub use tiger::{build_tiger_scene, TigerRig, CHEEK_STRIPE_X, EAR_X, EYE_X, WHISKER_DOTS};
