pub(crate) mod flip;
pub(crate) mod lines;
pub(crate) mod pulse;
pub(crate) mod scroll;
pub(crate) mod session;
