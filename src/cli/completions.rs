use clap::Parser;
use clap_complete::Shell;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    pdd completions bash > ~/.bash_completion.d/pdd\n\n\
                  Generate zsh completions:\n    pdd completions zsh > ~/.zfunc/_pdd\n\n\
                  Generate fish completions:\n    pdd completions fish > ~/.config/fish/completions/pdd.fish")]
pub struct CompletionsArgs {
    /// Shell type
    #[arg(value_enum, ignore_case = true)]
    pub shell: Shell,
}
