pub(crate) mod glitter;
pub(crate) mod params;
pub(crate) mod sparkle;
