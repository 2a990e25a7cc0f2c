pub(crate) mod backend;
pub(crate) mod music;
pub(crate) mod voice;
