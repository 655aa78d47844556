pub(crate) mod common;
mod matching;
