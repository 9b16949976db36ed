// Application layer: the per-unit DEA pipeline and its orchestration

pub mod evaluator;
pub mod formulator;
pub mod interpreter;

pub use evaluator::Evaluator;
pub use formulator::formulate;
pub use interpreter::interpret;
