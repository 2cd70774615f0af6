pub mod catalog_check;
pub mod check;
pub mod lesson;
pub mod modules;
pub mod reaction;
pub mod serve;
