use clap::Parser;
use clio::Input;

#[derive(Debug, Parser)]
#[command(
    name = "gym-auth-server",
    about = "Mock authentication GraphQL service for the gym membership front-end"
)]
pub struct Opt {
    /// Config file path
    #[arg(short, long, value_parser, default_value = "config.toml")]
    pub config: Input,
}
