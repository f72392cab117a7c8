pub(crate) mod blend;
pub(crate) mod frame;
pub(crate) mod line;
pub(crate) mod scanner;
