pub(crate) mod assemble;
pub(crate) mod frame;
pub(crate) mod preview;
pub(crate) mod session;
