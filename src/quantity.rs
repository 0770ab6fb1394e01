pub mod percent;

pub use self::percent::Percent;
