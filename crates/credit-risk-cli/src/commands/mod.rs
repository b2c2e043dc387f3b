pub mod altman;
pub mod credit;
pub mod merton;
