// scenes/mod.rs - The two mountable scenes built on the shared viewport

pub mod lamp;
pub mod puzzle;

pub use lamp::LampScene;
pub use puzzle::PuzzleScene;
