pub(crate) mod direction;
pub(crate) mod settings;
