pub mod clock;
pub mod command;
pub mod config;
pub mod parser;
pub mod version;

// Re-export commonly used types
pub use clock::{Clock, FixedClock, SystemClock};
pub use command::{BookingCommand, Intent};
pub use config::Config;
pub use parser::compile::{CompileWarning, CompiledCommand, Template};
pub use parser::{interpret, interpret_at, InterpretError, Interpreter};
