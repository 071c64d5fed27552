pub mod error {
    pub use fsutil::error::*;
}

pub mod workspace;

pub use workspace::*;
