use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "autoprop")]
#[command(about = "Observable auto-properties, driven from the terminal", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// JSON file declaring the model attributes
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Boot the model and render the page
    Show,

    /// Click "Increment" one or more times
    #[command(alias = "inc")]
    Increment {
        /// Number of clicks
        #[arg(short, long, default_value_t = 1)]
        times: u32,
    },

    /// Click "Change Weather"
    Weather {
        /// New weather
        #[arg(default_value = "rainy")]
        value: String,
    },

    /// Try to clear an attribute to null
    Clear {
        /// Attribute name
        name: String,
    },

    /// Run the console walkthrough (counter, total, weather)
    Script,

    /// List the declared attributes of the model
    Schema,
}
