use clap::Args;
use regtoken::tokens;

#[derive(Debug, Args)]
pub(crate) struct CompletionArgs {
    /// Words already typed after `token`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub words: Vec<String>,
}

pub(crate) fn run(args: &CompletionArgs) -> Result<(), String> {
    let candidates = tokens::complete(&args.words).map_err(|error| error.to_string())?;

    #[expect(clippy::print_stdout, reason = "completion candidates are read by the shell")]
    for candidate in candidates {
        println!("{candidate}");
    }

    Ok(())
}
