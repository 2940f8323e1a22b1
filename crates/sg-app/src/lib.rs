/// Command-line front end of signscii: arguments, prompts and the pipeline
/// tying the library, the renderer and the writer together.

pub mod cli;
pub mod pipeline;
pub mod prompt;
