use std::path::PathBuf;

use clap::Parser;

/// Runs a WebAssembly module.
///
/// With no `--invoke`, the CLI looks for a conventional WASI entry point
/// (`_start`) and runs that instead.
#[derive(Parser)]
#[command(name = "wasm5", bin_name = "wasm5")]
pub enum Cli {
    Run(RunArgs),
}

#[derive(Parser)]
pub struct RunArgs {
    /// The host directory to preopen for the guest, made available at `/`.
    #[arg(long = "dir", value_name = "DIRECTORY")]
    pub dir: Option<PathBuf>,

    /// The function to invoke. Defaults to the module's `_start` export.
    #[arg(long = "invoke", value_name = "FUNCTION")]
    pub invoke: Option<String>,

    /// The `.wasm` module to run, followed by literal numeric arguments for
    /// the invoked function.
    #[arg(value_name = "ARGS", trailing_var_arg = true, num_args = 1..)]
    pub module_and_args: Vec<String>,
}

impl RunArgs {
    pub fn module(&self) -> &std::path::Path {
        std::path::Path::new(&self.module_and_args[0])
    }

    pub fn args(&self) -> &[String] {
        &self.module_and_args[1..]
    }
}
